use super::{attacks::ContraryIndex, ABAError, ABAFramework, Attack, Labelled, LiteralId};
use anyhow::Result;
use log::info;
use permutator::Combination;
use std::collections::BTreeSet;
use std::fmt::Display;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// A set of assumptions, given by their literal ids.
pub type AssumptionSet = BTreeSet<LiteralId>;

/// An ABA+ attack between two sets of assumptions.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetAttack {
    attacker: AssumptionSet,
    target: AssumptionSet,
}

impl SetAttack {
    pub(crate) fn new(attacker: AssumptionSet, target: AssumptionSet) -> Self {
        SetAttack { attacker, target }
    }

    /// Returns the attacking set.
    pub fn attacker(&self) -> &AssumptionSet {
        &self.attacker
    }

    /// Returns the attacked set.
    pub fn target(&self) -> &AssumptionSet {
        &self.target
    }
}

impl Display for Labelled<'_, SetAttack> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.language.labelled(&self.item.attacker),
            self.language.labelled(&self.item.target)
        )
    }
}

/// The way ABA+ attacks are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AsRefStr, EnumIter, EnumString)]
pub enum ABAPlusMode {
    /// Attacks between sets of base assumptions, closed upward in the attacker.
    #[default]
    #[strum(serialize = "assumption-sets")]
    AssumptionSets,
    /// Attacks between arguments, reversed when a leaf of the target is preferred over a leaf of the attacker.
    #[strum(serialize = "arguments")]
    Arguments,
}

/// The normal and reverse attacks between arguments, see [ABAFramework::generate_argument_preference_attacks].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgumentPreferenceAttacks {
    /// The classical attacks that are not reversed.
    pub normal: BTreeSet<Attack>,
    /// The reversed attacks, from the former target to the former attacker.
    pub reverse: BTreeSet<Attack>,
}

impl ABAFramework {
    /// Computes all the subsets of the base assumptions, stores them and returns them.
    ///
    /// Subsets are sorted by size, then in lexicographic order of literal ids.
    /// The empty set comes first.
    pub fn enumerate_assumption_subsets(&mut self) -> &[AssumptionSet] {
        self.preference_attacks = None;
        let base = self.base_assumptions.iter().copied().collect::<Vec<LiteralId>>();
        let mut subsets = vec![AssumptionSet::new()];
        for size in 1..=base.len() {
            let mut block = base
                .as_slice()
                .combination(size)
                .map(|c| c.into_iter().copied().collect::<AssumptionSet>())
                .collect::<Vec<AssumptionSet>>();
            block.sort_unstable();
            subsets.append(&mut block);
        }
        info!("generated {} assumption subsets", subsets.len());
        self.assumption_combinations.insert(subsets)
    }

    /// Computes the normal and reverse ABA+ attacks between the assumption subsets, stores them and returns them.
    ///
    /// For each pair of subsets `(X, Y)` inducing arguments, if an argument of `X` attacks an argument of `Y`,
    /// the attack is reversed (`Y -> X`) if some assumption of `Y` is preferred over some assumption of `X`,
    /// and normal (`X -> Y`) otherwise.
    /// Each attack is then propagated to the proper supersets of its attacker.
    ///
    /// The arguments and the assumption subsets must have been computed before, or an [ABAError::Sequencing] error is returned.
    pub fn generate_preference_attacks(
        &mut self,
    ) -> Result<(&BTreeSet<SetAttack>, &BTreeSet<SetAttack>)> {
        let arguments = self
            .arguments
            .as_ref()
            .ok_or_else(|| ABAError::sequencing("arguments", "generating preference attacks"))?;
        let subsets = self.assumption_combinations.as_ref().ok_or_else(|| {
            ABAError::sequencing("assumption subsets", "generating preference attacks")
        })?;
        let index = ContraryIndex::new(&self.contraries);
        let induced = subsets
            .iter()
            .map(|s| {
                arguments
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| a.leaves().is_subset(s))
                    .map(|(i, _)| i)
                    .collect::<Vec<usize>>()
            })
            .collect::<Vec<Vec<usize>>>();
        let attacked_by = arguments
            .iter()
            .map(|a1| {
                arguments
                    .iter()
                    .map(|a2| index.attacks(a1, a2))
                    .collect::<Vec<bool>>()
            })
            .collect::<Vec<Vec<bool>>>();
        let mut normal = BTreeSet::new();
        let mut reverse = BTreeSet::new();
        for (x, induced_x) in subsets.iter().zip(induced.iter()) {
            if induced_x.is_empty() {
                continue;
            }
            let mut attacked = vec![false; arguments.len()];
            for ax in induced_x {
                attacked
                    .iter_mut()
                    .zip(attacked_by[*ax].iter())
                    .for_each(|(acc, b)| *acc |= *b);
            }
            for (y, induced_y) in subsets.iter().zip(induced.iter()) {
                if !induced_y.iter().any(|ay| attacked[*ay]) {
                    continue;
                }
                if y
                    .iter()
                    .any(|ly| x.iter().any(|lx| self.preferences.is_preferred(*ly, *lx)))
                {
                    reverse.insert(SetAttack::new(y.clone(), x.clone()));
                } else {
                    normal.insert(SetAttack::new(x.clone(), y.clone()));
                }
            }
        }
        let normal = close_upward(normal, subsets);
        let reverse = close_upward(reverse, subsets);
        info!("generated {} normal attacks", normal.len());
        info!("generated {} reverse attacks", reverse.len());
        let attacks = self.preference_attacks.insert((normal, reverse));
        Ok((&attacks.0, &attacks.1))
    }

    /// Computes the ABA+ attacks at the level of arguments.
    ///
    /// Each classical attack from `A1` to `A2` is reversed into an attack from `A2` to `A1` if some leaf of `A2`
    /// is preferred over some leaf of `A1`; it is kept as a normal attack otherwise.
    /// The result is not stored in the framework.
    ///
    /// The arguments must have been computed before, or an [ABAError::Sequencing] error is returned.
    pub fn generate_argument_preference_attacks(&self) -> Result<ArgumentPreferenceAttacks> {
        let arguments = self.arguments()?;
        let index = ContraryIndex::new(&self.contraries);
        let mut result = ArgumentPreferenceAttacks::default();
        for a1 in arguments {
            for a2 in arguments.iter().filter(|a2| index.attacks(a1, a2)) {
                let reversed = a2.leaves().iter().any(|l2| {
                    a1.leaves()
                        .iter()
                        .any(|l1| self.preferences.is_preferred(*l2, *l1))
                });
                if reversed {
                    result.reverse.insert(Attack::new(a2.id(), a1.id()));
                } else {
                    result.normal.insert(Attack::new(a1.id(), a2.id()));
                }
            }
        }
        info!(
            "generated {} normal and {} reverse argument attacks",
            result.normal.len(),
            result.reverse.len()
        );
        Ok(result)
    }
}

fn close_upward(attacks: BTreeSet<SetAttack>, subsets: &[AssumptionSet]) -> BTreeSet<SetAttack> {
    let mut closed = attacks.clone();
    for attack in attacks.iter() {
        for superset in subsets
            .iter()
            .filter(|s| s.len() > attack.attacker.len() && attack.attacker.is_subset(s))
        {
            closed.insert(SetAttack::new(superset.clone(), attack.target.clone()));
        }
    }
    closed
}
