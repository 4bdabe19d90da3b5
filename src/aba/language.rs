use anyhow::{anyhow, Result};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

/// The identifier of a literal, i.e. its index in its [Language].
pub type LiteralId = usize;

/// The symbol used to display negated literals.
pub const NEGATION_SYMBOL: char = '¬';

/// Handles a literal of the language: an atomic proposition, possibly negated.
///
/// Each literal has a name, a negation flag and an identifier which is unique in a language.
/// Two literals are equal iff they have the same name and the same negation flag.
/// This uniqueness condition imposes literals are made from [Language] objects, and not directly by the [Literal] struct.
#[derive(Clone, Debug)]
pub struct Literal {
    id: LiteralId,
    name: String,
    negated: bool,
}

impl Literal {
    /// Returns the id of the literal.
    pub fn id(&self) -> LiteralId {
        self.id
    }

    /// Returns the name of the literal, without its negation symbol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` iff the literal is negated.
    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.negated == other.negated
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.negated.hash(state);
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "{}", NEGATION_SYMBOL)?;
        }
        write!(f, "{}", self.name)
    }
}

/// Splits a literal label into its name and its negation flag.
///
/// Both `¬p` and `-p` denote the negation of `p`.
pub(crate) fn parse_label(label: &str) -> (&str, bool) {
    let trimmed = label.trim();
    if let Some(name) = trimmed.strip_prefix(NEGATION_SYMBOL) {
        (name.trim_start(), true)
    } else if let Some(name) = trimmed.strip_prefix('-') {
        (name.trim_start(), true)
    } else {
        (trimmed, false)
    }
}

/// Handles the literals that may be used in an ABA framework.
///
/// # Example
///
/// ```
/// # use crustaba::aba::Language;
/// let language = Language::new_with_labels(&["a", "b", "c", "p", "q", "r", "s", "t"]);
/// for (i, l) in language.iter().enumerate() {
///     assert_eq!(i, language.get_literal(l.name()).unwrap().id());
///     assert_eq!(l, language.get_literal_by_id(i));
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Language {
    literals: Vec<Literal>,
    label_to_id: HashMap<(String, bool), LiteralId>,
}

impl Language {
    /// Builds a new language given the labels of the literals.
    ///
    /// Each literal is assigned an id equal to its index in the provided slice (after the removal of duplicates).
    /// Labels beginning with `¬` or `-` denote negated literals.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustaba::aba::Language;
    /// let language = Language::new_with_labels(&["a", "¬a", "a"]);
    /// assert_eq!(2, language.len());
    /// assert!(language.get_literal("¬a").unwrap().is_negated());
    /// ```
    pub fn new_with_labels<S>(labels: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let mut language = Language {
            literals: Vec::with_capacity(labels.len()),
            label_to_id: HashMap::with_capacity(labels.len()),
        };
        for label in labels {
            let (name, negated) = parse_label(label.as_ref());
            language.new_literal(name, negated);
        }
        language
    }

    /// Adds a literal to the language and returns its id.
    ///
    /// If the literal is already in the language, its id is returned and nothing is added.
    pub fn new_literal(&mut self, name: &str, negated: bool) -> LiteralId {
        let next_id = self.literals.len();
        match self.label_to_id.entry((name.to_string(), negated)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                e.insert(next_id);
                self.literals.push(Literal {
                    id: next_id,
                    name: name.to_string(),
                    negated,
                });
                next_id
            }
        }
    }

    /// Adds a literal that was not in the language yet and returns its id.
    ///
    /// The literal is named after `base`; if this name is already in use, `'` characters are appended to it until it is not.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustaba::aba::Language;
    /// let mut language = Language::new_with_labels(&["p", "pd"]);
    /// let id = language.fresh_literal("pd", false);
    /// assert_eq!("pd'", language.get_literal_by_id(id).name());
    /// ```
    pub fn fresh_literal(&mut self, base: &str, negated: bool) -> LiteralId {
        let mut name = base.to_string();
        while self.label_to_id.contains_key(&(name.clone(), negated)) {
            name.push('\'');
        }
        self.new_literal(&name, negated)
    }

    /// Returns the number of literals in the language.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` iff the language has no literal.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns the literal associated with a label.
    ///
    /// An error is returned if no literal corresponds to the provided label.
    pub fn get_literal(&self, label: &str) -> Result<&Literal> {
        let (name, negated) = parse_label(label);
        self.label_to_id
            .get(&(name.to_string(), negated))
            .map(|i| &self.literals[*i])
            .ok_or_else(|| anyhow!("no such literal: {}", label))
    }

    /// Returns the literal with the corresponding identifier.
    ///
    /// # Panics
    ///
    /// Panics if no literal has the corresponding identifier.
    pub fn get_literal_by_id(&self, id: LiteralId) -> &Literal {
        &self.literals[id]
    }

    /// Provides an iterator to the literals.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Pairs an item expressed with literal ids with this language, allowing it to be displayed with literal names.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustaba::aba::{AssumptionSet, Language};
    /// let language = Language::new_with_labels(&["a", "b", "c"]);
    /// let set: AssumptionSet = [2, 0].into_iter().collect();
    /// assert_eq!("{a,c}", format!("{}", language.labelled(&set)));
    /// ```
    pub fn labelled<'a, T>(&'a self, item: &'a T) -> Labelled<'a, T>
    where
        T: ?Sized,
    {
        Labelled {
            item,
            language: self,
        }
    }

    pub(crate) fn sorted_labels<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a LiteralId>,
    {
        let mut labels = ids
            .into_iter()
            .map(|id| self.literals[*id].to_string())
            .collect::<Vec<String>>();
        labels.sort_unstable();
        labels
    }
}

/// An item made of literal ids, paired with the language giving the literal names.
///
/// See [Language::labelled].
pub struct Labelled<'a, T>
where
    T: ?Sized,
{
    pub(crate) item: &'a T,
    pub(crate) language: &'a Language,
}

impl Display for Labelled<'_, BTreeSet<LiteralId>> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.language.sorted_labels(self.item).join(","))
    }
}
