use super::{ABAFramework, Argument, LiteralId};
use log::info;
use permutator::CartesianProduct;
use std::collections::{BTreeSet, HashSet, VecDeque};

impl ABAFramework {
    /// Computes the arguments of the framework, stores them and returns them.
    ///
    /// An argument is built for each assumption (supporting itself) and for each rule with an empty body (with no leaves).
    /// Then, each time all the body literals of a rule have arguments, each combination of arguments for these literals
    /// gives a new argument for the head of the rule, with the union of their leaves.
    /// Arguments are identified by their claim and leaves, so the computation always ends, even with circular rules.
    ///
    /// Arguments previously computed are discarded.
    pub fn generate_arguments(&mut self) -> &[Argument] {
        self.attacks = None;
        self.preference_attacks = None;
        let arguments = ArgumentClosure::new(self).compute();
        info!("generated {} arguments", arguments.len());
        self.arguments.insert(arguments)
    }
}

struct ArgumentClosure<'a> {
    framework: &'a ABAFramework,
    rules_by_body_literal: Vec<Vec<usize>>,
    arguments: Vec<Argument>,
    arguments_by_claim: Vec<Vec<usize>>,
    known_leaves_by_claim: Vec<HashSet<BTreeSet<LiteralId>>>,
    queue: VecDeque<usize>,
}

impl<'a> ArgumentClosure<'a> {
    fn new(framework: &'a ABAFramework) -> Self {
        let language_len = framework.language.len();
        let mut rules_by_body_literal = vec![vec![]; language_len];
        for (i, rule) in framework.rules.iter().enumerate() {
            rule.body()
                .iter()
                .for_each(|b| rules_by_body_literal[*b].push(i));
        }
        ArgumentClosure {
            framework,
            rules_by_body_literal,
            arguments: Vec::new(),
            arguments_by_claim: vec![vec![]; language_len],
            known_leaves_by_claim: vec![HashSet::new(); language_len],
            queue: VecDeque::new(),
        }
    }

    fn compute(mut self) -> Vec<Argument> {
        let framework = self.framework;
        for assumption in framework.assumptions.iter() {
            self.admit(*assumption, [*assumption].into_iter().collect());
        }
        for rule in framework.rules.iter().filter(|r| r.is_fact()) {
            self.admit(rule.head(), BTreeSet::new());
        }
        while let Some(current) = self.queue.pop_front() {
            let claim = self.arguments[current].claim();
            for rule_index in self.rules_by_body_literal[claim].clone() {
                let rule = &framework.rules[rule_index];
                if rule
                    .body()
                    .iter()
                    .any(|b| self.arguments_by_claim[*b].is_empty())
                {
                    continue;
                }
                // the current argument fills the slot of its claim; combinations without it were built before
                let domains = rule
                    .body()
                    .iter()
                    .map(|b| {
                        if *b == claim {
                            vec![self.arguments[current].leaves().clone()]
                        } else {
                            self.arguments_by_claim[*b]
                                .iter()
                                .map(|i| self.arguments[*i].leaves().clone())
                                .collect()
                        }
                    })
                    .collect::<Vec<Vec<BTreeSet<LiteralId>>>>();
                let domain_refs = domains
                    .iter()
                    .map(|d| d.as_slice())
                    .collect::<Vec<&[BTreeSet<LiteralId>]>>();
                let new_leaves = domain_refs
                    .as_slice()
                    .cart_prod()
                    .map(|p| {
                        p.iter().fold(BTreeSet::new(), |mut acc, leaves| {
                            acc.extend(leaves.iter().copied());
                            acc
                        })
                    })
                    .collect::<Vec<BTreeSet<LiteralId>>>();
                for leaves in new_leaves {
                    self.admit(rule.head(), leaves);
                }
            }
        }
        self.arguments
    }

    fn admit(&mut self, claim: LiteralId, leaves: BTreeSet<LiteralId>) {
        if !self.known_leaves_by_claim[claim].insert(leaves.clone()) {
            return;
        }
        let index = self.arguments.len();
        self.arguments.push(Argument::new(index + 1, claim, leaves));
        self.arguments_by_claim[claim].push(index);
        self.queue.push_back(index);
    }
}
