use super::{Labelled, LiteralId};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// An ABA argument: a claim supported by a set of leaf assumptions.
///
/// Two arguments are equal iff they have the same claim and the same leaves; the id is only a display handle.
#[derive(Clone, Debug)]
pub struct Argument {
    id: usize,
    claim: LiteralId,
    leaves: BTreeSet<LiteralId>,
}

impl Argument {
    pub(crate) fn new(id: usize, claim: LiteralId, leaves: BTreeSet<LiteralId>) -> Self {
        Argument { id, claim, leaves }
    }

    /// Returns the display handle of the argument (`n` for `A<n>`).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the claim of the argument.
    pub fn claim(&self) -> LiteralId {
        self.claim
    }

    /// Returns the leaves (assumptions) supporting the claim.
    pub fn leaves(&self) -> &BTreeSet<LiteralId> {
        &self.leaves
    }
}

impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        self.claim == other.claim && self.leaves == other.leaves
    }
}

impl Eq for Argument {}

impl Hash for Argument {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.claim.hash(state);
        self.leaves.hash(state);
    }
}

impl Display for Labelled<'_, Argument> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[A{}] {} ⊢ {}",
            self.item.id,
            self.language.labelled(&self.item.leaves),
            self.language.get_literal_by_id(self.item.claim)
        )
    }
}

/// An attack between two arguments, given by their display handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attack {
    attacker: usize,
    target: usize,
}

impl Attack {
    pub(crate) fn new(attacker: usize, target: usize) -> Self {
        Attack { attacker, target }
    }

    /// Returns the handle of the attacking argument.
    pub fn attacker(&self) -> usize {
        self.attacker
    }

    /// Returns the handle of the attacked argument.
    pub fn target(&self) -> usize {
        self.target
    }
}

impl Display for Attack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[A{}] → [A{}]", self.attacker, self.target)
    }
}
