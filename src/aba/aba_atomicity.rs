use super::{ABAFramework, Contrary, LiteralId, Rule};
use log::debug;
use std::collections::{BTreeSet, HashMap};

impl ABAFramework {
    /// Returns `true` iff the body of each rule is made of assumptions only.
    pub fn is_atomic(&self) -> bool {
        self.rules
            .iter()
            .all(|r| r.body().is_subset(&self.assumptions))
    }

    /// Returns an atomic version of this framework.
    ///
    /// For each literal `x` that is not an assumption, two new assumptions `xd` and `xnd` are created.
    /// The contrary of `xd` is `xnd` and the contrary of `xnd` is `x`.
    /// Then, each occurrence of `x` in a rule body is replaced by `xd`.
    ///
    /// If the framework is already atomic, an identical copy is returned.
    /// The framework is expected to be non-circular; this is not checked.
    pub fn to_atomic(&self) -> ABAFramework {
        if self.is_atomic() {
            debug!("the framework is already atomic");
            return self.new_snapshot(
                self.language.clone(),
                self.rules.clone(),
                self.assumptions.clone(),
                self.contraries.clone(),
            );
        }
        let mut language = self.language.clone();
        let mut assumptions = self.assumptions.clone();
        let mut contraries = self.contraries.clone();
        let non_assumptions = self
            .language
            .iter()
            .map(|l| l.id())
            .filter(|id| !self.assumptions.contains(id))
            .collect::<Vec<LiteralId>>();
        let mut derivable = HashMap::with_capacity(non_assumptions.len());
        for x in non_assumptions {
            let literal = self.language.get_literal_by_id(x);
            let xd = language.fresh_literal(&format!("{}d", literal.name()), literal.is_negated());
            let xnd = language.fresh_literal(&format!("{}nd", literal.name()), literal.is_negated());
            assumptions.insert(xd);
            assumptions.insert(xnd);
            contraries.insert(Contrary::new(xd, xnd));
            contraries.insert(Contrary::new(xnd, x));
            derivable.insert(x, xd);
        }
        let rules = self
            .rules
            .iter()
            .map(|r| {
                let body = r
                    .body()
                    .iter()
                    .map(|b| *derivable.get(b).unwrap_or(b))
                    .collect::<BTreeSet<LiteralId>>();
                Rule::new(r.id().to_string(), r.head(), body)
            })
            .collect::<Vec<Rule>>();
        debug!(
            "atomicity transform added {} assumptions",
            assumptions.len() - self.assumptions.len()
        );
        self.new_snapshot(language, rules, assumptions, contraries)
    }
}
