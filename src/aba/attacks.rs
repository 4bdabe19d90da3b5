use super::{ABAError, ABAFramework, Argument, Attack, Contrary, LiteralId};
use anyhow::Result;
use log::info;
use std::collections::{BTreeSet, HashMap};

/// An index of the contrary relations by attacking literal.
pub(crate) struct ContraryIndex {
    contraried_by_attacker: HashMap<LiteralId, Vec<LiteralId>>,
}

impl ContraryIndex {
    pub(crate) fn new<'a, I>(contraries: I) -> Self
    where
        I: IntoIterator<Item = &'a Contrary>,
    {
        let mut contraried_by_attacker: HashMap<LiteralId, Vec<LiteralId>> = HashMap::new();
        for c in contraries {
            contraried_by_attacker
                .entry(c.attacker())
                .or_default()
                .push(c.contraried());
        }
        ContraryIndex {
            contraried_by_attacker,
        }
    }

    /// Returns `true` iff the claim of `attacker` is a contrary of a leaf of `target`.
    pub(crate) fn attacks(&self, attacker: &Argument, target: &Argument) -> bool {
        self.contraried_by_attacker
            .get(&attacker.claim())
            .map(|contraried| contraried.iter().any(|c| target.leaves().contains(c)))
            .unwrap_or(false)
    }
}

impl ABAFramework {
    /// Computes the attacks between the arguments, stores them and returns them.
    ///
    /// An argument attacks another one iff its claim is a contrary of one of the leaves of the other.
    /// Self-attacks are allowed.
    ///
    /// The arguments must have been generated before, or an [ABAError::Sequencing] error is returned.
    pub fn generate_attacks(&mut self) -> Result<&BTreeSet<Attack>> {
        let arguments = self
            .arguments
            .as_ref()
            .ok_or_else(|| ABAError::sequencing("arguments", "generating attacks"))?;
        let index = ContraryIndex::new(&self.contraries);
        let attacks = arguments
            .iter()
            .flat_map(|a1| {
                let index = &index;
                arguments
                    .iter()
                    .filter(move |a2| index.attacks(a1, a2))
                    .map(move |a2| Attack::new(a1.id(), a2.id()))
            })
            .collect::<BTreeSet<Attack>>();
        info!("generated {} attacks", attacks.len());
        self.preference_attacks = None;
        Ok(self.attacks.insert(attacks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aba::{tests_utils::toni_tutorial_ex, Language};

    fn arg_id(f: &ABAFramework, claim: &str, leaves: &[&str]) -> usize {
        let l = f.language();
        let claim = l.get_literal(claim).unwrap().id();
        let leaves = leaves
            .iter()
            .map(|s| l.get_literal(s).unwrap().id())
            .collect::<BTreeSet<_>>();
        f.arguments()
            .unwrap()
            .iter()
            .find(|a| a.claim() == claim && a.leaves() == &leaves)
            .unwrap()
            .id()
    }

    #[test]
    fn test_toni_attacks() {
        let mut f = toni_tutorial_ex();
        f.generate_arguments();
        f.generate_attacks().unwrap();
        let r = arg_id(&f, "r", &["b", "c"]);
        let expected = [
            Attack::new(r, arg_id(&f, "a", &["a"])),
            Attack::new(r, arg_id(&f, "p", &["a", "b", "c"])),
        ]
        .into_iter()
        .collect::<BTreeSet<_>>();
        assert_eq!(&expected, f.attacks().unwrap());
    }

    #[test]
    fn test_attack_on_any_leaf() {
        let mut f = toni_tutorial_ex();
        f.new_rule("r4", "t", &[]).unwrap();
        f.generate_arguments();
        f.generate_attacks().unwrap();
        let t = arg_id(&f, "t", &[]);
        let targets = f
            .attacks()
            .unwrap()
            .iter()
            .filter(|a| a.attacker() == t)
            .map(|a| a.target())
            .collect::<BTreeSet<_>>();
        let expected = [
            arg_id(&f, "c", &["c"]),
            arg_id(&f, "r", &["b", "c"]),
            arg_id(&f, "q", &["b", "c"]),
            arg_id(&f, "p", &["a", "b", "c"]),
        ]
        .into_iter()
        .collect::<BTreeSet<_>>();
        assert_eq!(expected, targets);
    }

    #[test]
    fn test_self_attack() {
        let l = Language::new_with_labels(&["a", "x"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_rule("r1", "x", &["a"]).unwrap();
        f.new_contrary("a", "x").unwrap();
        f.generate_arguments();
        let x = arg_id(&f, "x", &["a"]);
        assert!(f
            .generate_attacks()
            .unwrap()
            .contains(&Attack::new(x, x)));
    }

    #[test]
    fn test_attacks_need_arguments() {
        let mut f = toni_tutorial_ex();
        let err = f.generate_attacks().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ABAError>(),
            Some(ABAError::Sequencing { .. })
        ));
    }

    #[test]
    fn test_no_contraries() {
        let l = Language::new_with_labels(&["a", "b"]);
        let mut f = ABAFramework::new_with_language(l);
        f.new_assumption("a").unwrap();
        f.new_assumption("b").unwrap();
        f.generate_arguments();
        assert!(f.generate_attacks().unwrap().is_empty());
    }
}
