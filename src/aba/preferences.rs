use super::LiteralId;
use std::collections::{BTreeMap, BTreeSet};

/// A strict preference relation over literals.
///
/// The relation maps each literal to the set of literals it is strictly preferred over.
/// No consistency check is made: the relation may be neither antisymmetric nor acyclic.
///
/// # Example
///
/// ```
/// # use crustaba::aba::PreferenceRelation;
/// // a,b > c,d > e with a=0, b=1, c=2, d=3, e=4
/// let mut preferences = PreferenceRelation::default();
/// preferences.add_chain(&[vec![0, 1], vec![2, 3], vec![4]]);
/// assert!(preferences.is_preferred(0, 4));
/// assert!(!preferences.is_preferred(4, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceRelation {
    preferred_over: BTreeMap<LiteralId, BTreeSet<LiteralId>>,
}

impl PreferenceRelation {
    /// Records that `preferred` is strictly preferred over `less_preferred`.
    pub fn add_preference(&mut self, preferred: LiteralId, less_preferred: LiteralId) {
        self.preferred_over
            .entry(preferred)
            .or_default()
            .insert(less_preferred);
    }

    /// Records a chain `g1 > g2 > ... > gn` of groups of literals.
    ///
    /// Each literal of a group is preferred over each literal of every later group.
    pub fn add_chain<G>(&mut self, groups: &[G])
    where
        G: AsRef<[LiteralId]>,
    {
        for (preferred, less_preferred) in expand_chain(groups) {
            self.preferred_over
                .entry(preferred)
                .or_default()
                .extend(less_preferred);
        }
    }

    /// Adds all the preferences of another relation to this one.
    pub fn merge(&mut self, other: &PreferenceRelation) {
        for (preferred, less_preferred) in other.iter() {
            self.preferred_over
                .entry(preferred)
                .or_default()
                .extend(less_preferred.iter().copied());
        }
    }

    /// Returns `true` iff `x` is strictly preferred over `y`.
    pub fn is_preferred(&self, x: LiteralId, y: LiteralId) -> bool {
        self.preferred_over
            .get(&x)
            .map(|less_preferred| less_preferred.contains(&y))
            .unwrap_or(false)
    }

    /// Returns `true` iff no preference is recorded.
    pub fn is_empty(&self) -> bool {
        self.preferred_over.values().all(|s| s.is_empty())
    }

    /// Returns the number of (preferred, less preferred) pairs.
    pub fn len(&self) -> usize {
        self.preferred_over.values().map(|s| s.len()).sum()
    }

    /// Iterates over the literals having preferences, together with the literals they are preferred over.
    pub fn iter(&self) -> impl Iterator<Item = (LiteralId, &BTreeSet<LiteralId>)> + '_ {
        self.preferred_over
            .iter()
            .filter(|(_, s)| !s.is_empty())
            .map(|(l, s)| (*l, s))
    }
}

/// Expands a preference chain `g1 > g2 > ... > gn` into a map from each element to the elements of the later groups.
///
/// # Example
///
/// ```
/// # use crustaba::aba::expand_chain;
/// let expanded = expand_chain(&[vec!["a", "b"], vec!["c"]]);
/// assert_eq!(vec![&"c"], expanded[&"a"].iter().collect::<Vec<_>>());
/// assert!(!expanded.contains_key(&"c"));
/// ```
pub fn expand_chain<G, T>(groups: &[G]) -> BTreeMap<T, BTreeSet<T>>
where
    G: AsRef<[T]>,
    T: Clone + Ord,
{
    let mut expanded: BTreeMap<T, BTreeSet<T>> = BTreeMap::new();
    for (i, group) in groups.iter().enumerate() {
        let later = groups[i + 1..]
            .iter()
            .flat_map(|g| g.as_ref().iter().cloned())
            .collect::<BTreeSet<T>>();
        if later.is_empty() {
            continue;
        }
        for preferred in group.as_ref() {
            expanded
                .entry(preferred.clone())
                .or_default()
                .extend(later.iter().cloned());
        }
    }
    expanded
}
