use super::{
    aba_plus::SetAttack, ABAError, Argument, AssumptionSet, Attack, Labelled, Language, LiteralId,
    PreferenceRelation,
};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt::Display;

/// A rule of an ABA framework: a head literal derivable from a (possibly empty) set of body literals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    id: String,
    head: LiteralId,
    body: BTreeSet<LiteralId>,
}

impl Rule {
    pub(crate) fn new(id: String, head: LiteralId, body: BTreeSet<LiteralId>) -> Self {
        Rule { id, head, body }
    }

    /// Returns the identifier of the rule.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the head of the rule.
    pub fn head(&self) -> LiteralId {
        self.head
    }

    /// Returns the body of the rule.
    pub fn body(&self) -> &BTreeSet<LiteralId> {
        &self.body
    }

    /// Returns `true` iff the body of the rule is empty.
    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }
}

impl Display for Labelled<'_, Rule> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ← {}",
            self.language.get_literal_by_id(self.item.head),
            self.language.sorted_labels(&self.item.body).join(",")
        )
    }
}

/// A contrary relation: the attacker literal is a defeater of the contraried one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Contrary {
    contraried: LiteralId,
    attacker: LiteralId,
}

impl Contrary {
    pub(crate) fn new(contraried: LiteralId, attacker: LiteralId) -> Self {
        Contrary {
            contraried,
            attacker,
        }
    }

    /// Returns the literal that is contraried.
    pub fn contraried(&self) -> LiteralId {
        self.contraried
    }

    /// Returns the literal attacking the contraried one.
    pub fn attacker(&self) -> LiteralId {
        self.attacker
    }
}

impl Display for Labelled<'_, Contrary> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\u{0304} = {}",
            self.language.get_literal_by_id(self.item.contraried),
            self.language.get_literal_by_id(self.item.attacker)
        )
    }
}

/// Handles an ABA (or ABA+) framework.
///
/// [ABAFramework] objects hold a language, the rules built on top of it, the assumptions, the contraries and the preferences.
/// They also own the collections derived from them: arguments, attacks, assumption subsets and preference-based attacks.
/// Derived collections must be computed in order; querying one that has not been computed yet returns an [ABAError::Sequencing] error.
///
/// The framework transformations ([to_non_circular](Self::to_non_circular), [to_atomic](Self::to_atomic), [prepare](Self::prepare))
/// do not modify the framework; they return a new one, in which no derived collection has been computed.
///
/// # Example
///
/// ```
/// # use crustaba::aba::{ABAFramework, Language};
/// let language = Language::new_with_labels(&["a", "b", "c", "p", "q", "r", "s", "t"]);
/// let mut framework = ABAFramework::new_with_language(language);
/// for assumption in ["a", "b", "c"] {
///     framework.new_assumption(assumption).unwrap();
/// }
/// framework.new_rule("r1", "p", &["q", "a"]).unwrap();
/// framework.new_rule("r2", "q", &["r"]).unwrap();
/// framework.new_rule("r3", "r", &["b", "c"]).unwrap();
/// framework.new_contrary("a", "r").unwrap();
/// framework.new_contrary("b", "s").unwrap();
/// framework.new_contrary("c", "t").unwrap();
/// assert_eq!(6, framework.generate_arguments().len());
/// assert_eq!(2, framework.generate_attacks().unwrap().len());
/// ```
#[derive(Debug, Clone)]
pub struct ABAFramework {
    pub(crate) language: Language,
    pub(crate) rules: Vec<Rule>,
    pub(crate) assumptions: BTreeSet<LiteralId>,
    pub(crate) base_assumptions: BTreeSet<LiteralId>,
    pub(crate) contraries: BTreeSet<Contrary>,
    pub(crate) preferences: PreferenceRelation,
    pub(crate) arguments: Option<Vec<Argument>>,
    pub(crate) attacks: Option<BTreeSet<Attack>>,
    pub(crate) assumption_combinations: Option<Vec<AssumptionSet>>,
    pub(crate) preference_attacks: Option<(BTreeSet<SetAttack>, BTreeSet<SetAttack>)>,
}

impl ABAFramework {
    /// Builds an ABA framework given its associated language.
    ///
    /// The framework has no rules, no assumptions, no contraries and no preferences.
    pub fn new_with_language(language: Language) -> Self {
        ABAFramework {
            language,
            rules: Vec::new(),
            assumptions: BTreeSet::new(),
            base_assumptions: BTreeSet::new(),
            contraries: BTreeSet::new(),
            preferences: PreferenceRelation::default(),
            arguments: None,
            attacks: None,
            assumption_combinations: None,
            preference_attacks: None,
        }
    }

    /// Builds a framework sharing the base assumptions and the preferences of this one, with new language, rules, assumptions and contraries.
    pub(crate) fn new_snapshot(
        &self,
        language: Language,
        rules: Vec<Rule>,
        assumptions: BTreeSet<LiteralId>,
        contraries: BTreeSet<Contrary>,
    ) -> Self {
        ABAFramework {
            language,
            rules,
            assumptions,
            base_assumptions: self.base_assumptions.clone(),
            contraries,
            preferences: self.preferences.clone(),
            arguments: None,
            attacks: None,
            assumption_combinations: None,
            preference_attacks: None,
        }
    }

    fn literal_id(&self, label: &str, referrer: impl FnOnce() -> String) -> Result<LiteralId> {
        match self.language.get_literal(label) {
            Ok(l) => Ok(l.id()),
            Err(_) => Err(ABAError::reference(label, referrer()).into()),
        }
    }

    /// Adds a rule to the framework.
    ///
    /// The literals of the head and the body are given by their labels.
    /// If a literal is not part of the language of the framework, an error is returned.
    pub fn new_rule(&mut self, id: &str, head: &str, body: &[&str]) -> Result<()> {
        let referrer = || format!("rule {}", id);
        let head_id = self.literal_id(head, referrer)?;
        let body_ids = body
            .iter()
            .map(|b| self.literal_id(b, referrer))
            .collect::<Result<BTreeSet<LiteralId>>>()?;
        self.add_rule(Rule::new(id.to_string(), head_id, body_ids));
        Ok(())
    }

    pub(crate) fn add_rule(&mut self, rule: Rule) {
        self.invalidate();
        self.rules.push(rule);
    }

    /// Sets a literal of the language as an assumption.
    ///
    /// Assumptions set through this method are part of the base assumptions, on which ABA+ attacks are computed.
    /// If the literal is not part of the language, an error is returned.
    pub fn new_assumption(&mut self, label: &str) -> Result<()> {
        let id = self.literal_id(label, || "assumption set".to_string())?;
        self.add_assumption(id);
        Ok(())
    }

    pub(crate) fn add_assumption(&mut self, id: LiteralId) {
        self.invalidate();
        self.assumptions.insert(id);
        self.base_assumptions.insert(id);
    }

    /// Adds a contrary relation: `attacker` is a contrary of `contraried`.
    ///
    /// If one of the literals is not part of the language, an error is returned.
    pub fn new_contrary(&mut self, contraried: &str, attacker: &str) -> Result<()> {
        let referrer = || format!("contrary of {}", contraried);
        let contraried_id = self.literal_id(contraried, referrer)?;
        let attacker_id = self.literal_id(attacker, referrer)?;
        self.add_contrary(Contrary::new(contraried_id, attacker_id));
        Ok(())
    }

    pub(crate) fn add_contrary(&mut self, contrary: Contrary) {
        self.invalidate();
        self.contraries.insert(contrary);
    }

    /// Records that `preferred` is strictly preferred over `less_preferred`.
    ///
    /// If one of the literals is not part of the language, an error is returned.
    pub fn new_preference(&mut self, preferred: &str, less_preferred: &str) -> Result<()> {
        let referrer = || format!("preference of {}", preferred);
        let preferred_id = self.literal_id(preferred, referrer)?;
        let less_preferred_id = self.literal_id(less_preferred, referrer)?;
        self.invalidate();
        self.preferences
            .add_preference(preferred_id, less_preferred_id);
        Ok(())
    }

    pub(crate) fn preferences_mut(&mut self) -> &mut PreferenceRelation {
        self.invalidate();
        &mut self.preferences
    }

    fn invalidate(&mut self) {
        self.arguments = None;
        self.attacks = None;
        self.assumption_combinations = None;
        self.preference_attacks = None;
    }

    /// Returns the underlying language.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Pairs an item with the language of this framework for display purpose.
    pub fn labelled<'a, T>(&'a self, item: &'a T) -> Labelled<'a, T>
    where
        T: ?Sized,
    {
        self.language.labelled(item)
    }

    /// Returns the number of rules.
    pub fn n_rules(&self) -> usize {
        self.rules.len()
    }

    /// Provides an iterator to the rules.
    pub fn iter_rules(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter()
    }

    /// Returns the current assumptions, including the ones added by the atomicity transformation.
    pub fn assumptions(&self) -> &BTreeSet<LiteralId> {
        &self.assumptions
    }

    /// Returns the number of assumptions.
    pub fn n_assumptions(&self) -> usize {
        self.assumptions.len()
    }

    /// Returns the assumptions as they were before any transformation.
    pub fn base_assumptions(&self) -> &BTreeSet<LiteralId> {
        &self.base_assumptions
    }

    /// Returns `true` iff the literal with the given id is an assumption.
    pub fn is_assumption(&self, id: LiteralId) -> bool {
        self.assumptions.contains(&id)
    }

    /// Returns the number of contrary relations.
    pub fn n_contraries(&self) -> usize {
        self.contraries.len()
    }

    /// Provides an iterator to the contrary relations.
    pub fn iter_contraries(&self) -> impl Iterator<Item = &Contrary> + '_ {
        self.contraries.iter()
    }

    /// Returns the preference relation.
    pub fn preferences(&self) -> &PreferenceRelation {
        &self.preferences
    }

    /// Returns `true` iff `x` is strictly preferred over `y`.
    pub fn is_preferred(&self, x: LiteralId, y: LiteralId) -> bool {
        self.preferences.is_preferred(x, y)
    }

    /// Returns the arguments computed by [generate_arguments](Self::generate_arguments).
    pub fn arguments(&self) -> Result<&[Argument]> {
        self.arguments
            .as_deref()
            .ok_or_else(|| ABAError::sequencing("arguments", "querying arguments").into())
    }

    /// Returns the argument with the given display handle.
    pub fn get_argument(&self, id: usize) -> Result<&Argument> {
        self.arguments()?
            .get(id.wrapping_sub(1))
            .with_context(|| format!("no such argument: A{}", id))
    }

    /// Returns the attacks computed by [generate_attacks](Self::generate_attacks).
    pub fn attacks(&self) -> Result<&BTreeSet<Attack>> {
        self.attacks
            .as_ref()
            .ok_or_else(|| ABAError::sequencing("attacks", "querying attacks").into())
    }

    /// Returns the subsets computed by [enumerate_assumption_subsets](Self::enumerate_assumption_subsets).
    pub fn assumption_combinations(&self) -> Result<&[AssumptionSet]> {
        self.assumption_combinations.as_deref().ok_or_else(|| {
            ABAError::sequencing("assumption subsets", "querying assumption subsets").into()
        })
    }

    /// Returns the normal attacks computed by [generate_preference_attacks](Self::generate_preference_attacks).
    pub fn normal_attacks(&self) -> Result<&BTreeSet<SetAttack>> {
        self.preference_attacks
            .as_ref()
            .map(|(normal, _)| normal)
            .ok_or_else(|| {
                ABAError::sequencing("preference attacks", "querying normal attacks").into()
            })
    }

    /// Returns the reverse attacks computed by [generate_preference_attacks](Self::generate_preference_attacks).
    pub fn reverse_attacks(&self) -> Result<&BTreeSet<SetAttack>> {
        self.preference_attacks
            .as_ref()
            .map(|(_, reverse)| reverse)
            .ok_or_else(|| {
                ABAError::sequencing("preference attacks", "querying reverse attacks").into()
            })
    }
}

impl PartialEq for ABAFramework {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
            && self.rules == other.rules
            && self.assumptions == other.assumptions
            && self.contraries == other.contraries
    }
}

impl Display for ABAFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut language = self
            .language
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<String>>();
        language.sort_unstable();
        writeln!(f, "L = {{{}}}", language.join(", "))?;
        let mut rules = self
            .rules
            .iter()
            .map(|r| self.labelled(r).to_string())
            .collect::<Vec<String>>();
        rules.sort_unstable();
        writeln!(f, "R = {{")?;
        for r in rules {
            writeln!(f, "{}", r)?;
        }
        writeln!(f, "}}")?;
        writeln!(
            f,
            "A = {{{}}}",
            self.language.sorted_labels(&self.assumptions).join(", ")
        )?;
        let mut contraries = self
            .contraries
            .iter()
            .map(|c| self.labelled(c).to_string())
            .collect::<Vec<String>>();
        contraries.sort_unstable();
        write!(f, "CONTRARIES = {{{}}}", contraries.join(", "))?;
        if !self.preferences.is_empty() {
            let mut preferences = self
                .preferences
                .iter()
                .map(|(l, s)| {
                    format!(
                        "  {} > {{{}}}",
                        self.language.get_literal_by_id(l),
                        self.language.sorted_labels(s).join(", ")
                    )
                })
                .collect::<Vec<String>>();
            preferences.sort_unstable();
            write!(f, "\nPREFERENCES:\n{}", preferences.join("\n"))?;
        }
        if let Some(arguments) = self.arguments.as_ref().filter(|a| !a.is_empty()) {
            let mut args = arguments
                .iter()
                .map(|a| self.labelled(a).to_string())
                .collect::<Vec<String>>();
            args.sort_unstable();
            write!(f, "\nARGS:\n{}", args.join("\n"))?;
        }
        Ok(())
    }
}
