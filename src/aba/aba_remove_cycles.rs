use super::{ABAFramework, Language, LiteralId, Rule};
use log::debug;
use std::collections::BTreeSet;

impl ABAFramework {
    /// Returns `true` iff the dependency graph of the rules has a cycle.
    ///
    /// The graph has an edge from each body literal of a rule to its head.
    pub fn is_circular(&self) -> bool {
        let mut successors = vec![vec![]; self.language.len()];
        for rule in self.rules.iter() {
            for b in rule.body() {
                successors[*b].push(rule.head());
            }
        }
        let mut marks = vec![DfsMark::New; self.language.len()];
        for root in 0..self.language.len() {
            if marks[root] != DfsMark::New {
                continue;
            }
            marks[root] = DfsMark::OnStack;
            let mut stack = vec![(root, 0)];
            while let Some((node, next)) = stack.pop() {
                if next == successors[node].len() {
                    marks[node] = DfsMark::Done;
                    continue;
                }
                stack.push((node, next + 1));
                let succ = successors[node][next];
                match marks[succ] {
                    DfsMark::OnStack => return true,
                    DfsMark::Done => {}
                    DfsMark::New => {
                        marks[succ] = DfsMark::OnStack;
                        stack.push((succ, 0));
                    }
                }
            }
        }
        false
    }

    /// Returns a non-circular version of this framework.
    ///
    /// Let `k` be the number of literals that are not assumptions.
    /// Each of these literals `x` gets `k-1` staged copies `x1`, ..., `x(k-1)`, the original literal standing for stage `k`.
    /// A rule whose body is made of assumptions is kept, and copied once for each stage with its head replaced by its staged copy.
    /// A rule whose body contains other literals is replaced by `k-1` rules: at stage `i`, the body literals are taken at stage `i`
    /// and the head at stage `i+1`.
    /// Assumptions are never staged.
    ///
    /// As a consequence, a cycle going through assumptions only (for instance `a ← b` and `b ← a` with `a` and `b` assumptions)
    /// is made of rules whose bodies are assumptions; these rules are kept as is, and the result is still circular.
    pub fn to_non_circular(&self) -> ABAFramework {
        let mut language = self.language.clone();
        let staged = StagedLiterals::new(self, &mut language);
        let n_stages = staged.n_stages();
        debug!("removing cycles with {} stages", n_stages);
        let mut rules = Vec::new();
        for rule in self.rules.iter() {
            if rule.body().is_subset(&self.assumptions) {
                rules.push(rule.clone());
                for i in 1..n_stages {
                    rules.push(Rule::new(
                        format!("{}_{}", rule.id(), i),
                        staged.literal(rule.head(), i),
                        rule.body().clone(),
                    ));
                }
            } else {
                for i in 1..n_stages {
                    let body = rule
                        .body()
                        .iter()
                        .map(|b| staged.literal(*b, i))
                        .collect::<BTreeSet<LiteralId>>();
                    rules.push(Rule::new(
                        format!("{}_{}", rule.id(), i),
                        staged.literal(rule.head(), i + 1),
                        body,
                    ));
                }
            }
        }
        self.new_snapshot(
            language,
            rules,
            self.assumptions.clone(),
            self.contraries.clone(),
        )
    }

    /// Returns a non-circular and atomic version of this framework.
    ///
    /// Cycles are removed first if needed; then the atomicity transform is applied if the framework is still not atomic.
    pub fn prepare(&self) -> ABAFramework {
        let non_circular = if self.is_circular() {
            debug!("the framework is circular");
            self.to_non_circular()
        } else {
            self.new_snapshot(
                self.language.clone(),
                self.rules.clone(),
                self.assumptions.clone(),
                self.contraries.clone(),
            )
        };
        non_circular.to_atomic()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DfsMark {
    New,
    OnStack,
    Done,
}

/// The ids of the staged copies of the non-assumption literals.
struct StagedLiterals {
    non_assumption_index: Vec<Option<usize>>,
    staged_ids: Vec<Vec<LiteralId>>,
    n_stages: usize,
}

impl StagedLiterals {
    fn new(framework: &ABAFramework, language: &mut Language) -> Self {
        let init_n_literals = framework.language.len();
        let mut non_assumption_index = vec![None; init_n_literals];
        let mut non_assumptions = Vec::new();
        for l in framework.language.iter() {
            if !framework.is_assumption(l.id()) {
                non_assumption_index[l.id()] = Some(non_assumptions.len());
                non_assumptions.push(l);
            }
        }
        let n_stages = non_assumptions.len();
        let staged_ids = (1..n_stages)
            .map(|i| {
                non_assumptions
                    .iter()
                    .map(|l| language.fresh_literal(&format!("{}{}", l.name(), i), l.is_negated()))
                    .collect::<Vec<LiteralId>>()
            })
            .collect::<Vec<Vec<LiteralId>>>();
        StagedLiterals {
            non_assumption_index,
            staged_ids,
            n_stages,
        }
    }

    fn n_stages(&self) -> usize {
        self.n_stages
    }

    fn literal(&self, init_id: LiteralId, stage: usize) -> LiteralId {
        match self.non_assumption_index[init_id] {
            Some(i) if stage < self.n_stages => self.staged_ids[stage - 1][i],
            _ => init_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aba::tests_utils::{has_argument, toni_tutorial_ex};

    fn rule_strings(f: &ABAFramework) -> Vec<String> {
        let mut rules = f
            .iter_rules()
            .map(|r| format!("{}: {}", r.id(), f.labelled(r)))
            .collect::<Vec<_>>();
        rules.sort_unstable();
        rules
    }

    #[test]
    fn test_self_loop_is_circular() {
        let l = Language::new_with_labels(&["p"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_rule("r1", "p", &["p"]).unwrap();
        assert!(f.is_circular());
    }

    #[test]
    fn test_chain_is_not_circular() {
        let l = Language::new_with_labels(&["p", "q", "r"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_rule("r1", "p", &["q"]).unwrap();
        f.new_rule("r2", "q", &["r"]).unwrap();
        assert!(!f.is_circular());
        assert!(!toni_tutorial_ex().is_circular());
    }

    #[test]
    fn test_diamond_is_not_circular() {
        let l = Language::new_with_labels(&["a", "p", "q", "r"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_rule("r1", "p", &["a"]).unwrap();
        f.new_rule("r2", "q", &["a"]).unwrap();
        f.new_rule("r3", "r", &["p", "q"]).unwrap();
        assert!(!f.is_circular());
    }

    #[test]
    fn test_cycle_reachable_from_any_literal() {
        let l = Language::new_with_labels(&["a", "p", "q", "r"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_rule("r1", "p", &["a"]).unwrap();
        f.new_rule("r2", "q", &["r"]).unwrap();
        f.new_rule("r3", "r", &["q"]).unwrap();
        assert!(f.is_circular());
    }

    #[test]
    fn test_remove_cycles() {
        let l = Language::new_with_labels(&["1", "2", "3"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("1").unwrap();
        f.new_rule("r1", "2", &["1"]).unwrap();
        f.new_rule("r2", "2", &["3"]).unwrap();
        f.new_rule("r3", "3", &["2"]).unwrap();
        let new_f = f.to_non_circular();
        assert_eq!(5, new_f.language().len());
        assert_eq!(1, new_f.n_assumptions());
        assert_eq!(
            vec!["r1: 2 ← 1", "r1_1: 21 ← 1", "r2_1: 2 ← 31", "r3_1: 3 ← 21"],
            rule_strings(&new_f)
        );
        assert!(!new_f.is_circular());
        assert!(f.is_circular());
    }

    #[test]
    fn test_remove_self_loop() {
        let l = Language::new_with_labels(&["a", "p"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_rule("r1", "p", &["p"]).unwrap();
        f.new_rule("r2", "p", &["a"]).unwrap();
        let new_f = f.to_non_circular();
        assert_eq!(vec!["r2: p ← a"], rule_strings(&new_f));
        assert!(!new_f.is_circular());
    }

    #[test]
    fn test_remove_three_cycle_keeps_claims() {
        let l = Language::new_with_labels(&["a", "p", "q", "r"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_rule("r1", "p", &["q"]).unwrap();
        f.new_rule("r2", "q", &["r"]).unwrap();
        f.new_rule("r3", "r", &["p"]).unwrap();
        f.new_rule("r4", "r", &["a"]).unwrap();
        let mut new_f = f.to_non_circular();
        assert!(!new_f.is_circular());
        new_f.generate_arguments();
        assert!(has_argument(&new_f, "p", &["a"]));
        assert!(has_argument(&new_f, "q", &["a"]));
        assert!(has_argument(&new_f, "r", &["a"]));
    }

    #[test]
    fn test_staged_names_do_not_clash() {
        let l = Language::new_with_labels(&["a", "p", "q", "p1"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_rule("r1", "p", &["q"]).unwrap();
        f.new_rule("r2", "q", &["p"]).unwrap();
        let new_f = f.to_non_circular();
        assert_eq!(4 + 2 * 3, new_f.language().len());
        new_f.language().get_literal("p1'").unwrap();
    }

    #[test]
    fn test_prepare_circular() {
        let l = Language::new_with_labels(&["a", "b", "p", "q"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_assumption("b").unwrap();
        f.new_rule("r1", "p", &["q", "a"]).unwrap();
        f.new_rule("r2", "q", &["p"]).unwrap();
        f.new_rule("r3", "q", &["b"]).unwrap();
        f.new_contrary("a", "q").unwrap();
        let prepared = f.prepare();
        assert!(!prepared.is_circular());
        assert!(prepared.is_atomic());
        assert_eq!(f.base_assumptions(), prepared.base_assumptions());
        assert!(prepared.n_assumptions() > f.n_assumptions());
    }

    #[test]
    fn test_prepare_non_circular() {
        let f = toni_tutorial_ex();
        assert_eq!(f.to_atomic(), f.prepare());
    }

    #[test]
    fn test_prepare_nothing_to_do() {
        let l = Language::new_with_labels(&["a", "p"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_rule("r1", "p", &["a"]).unwrap();
        assert_eq!(f, f.prepare());
    }

    #[test]
    fn test_cycle_through_assumptions_is_kept() {
        let l = Language::new_with_labels(&["a", "b", "p"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_assumption("b").unwrap();
        f.new_rule("r1", "a", &["b"]).unwrap();
        f.new_rule("r2", "b", &["a"]).unwrap();
        f.new_rule("r3", "p", &["a"]).unwrap();
        assert!(f.is_circular());
        let mut prepared = f.prepare();
        assert!(prepared.is_circular());
        assert!(prepared.is_atomic());
        assert_eq!(
            vec!["r1: a ← b", "r2: b ← a", "r3: p ← a"],
            rule_strings(&prepared)
        );
        prepared.generate_arguments();
        assert!(has_argument(&prepared, "a", &["b"]));
        assert!(has_argument(&prepared, "p", &["b"]));
    }
}
