use super::{ABAError, ABAFramework, Contrary, Language, LiteralId, Rule};
use anyhow::{Context, Result};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// A rule given by the labels of its literals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRule {
    /// the rule identifier
    pub id: String,
    /// the label of the head
    pub head: String,
    /// the labels of the body literals
    pub body: Vec<String>,
}

impl RawRule {
    /// Builds a raw rule from string slices.
    pub fn new(id: &str, head: &str, body: &[&str]) -> Self {
        RawRule {
            id: id.to_string(),
            head: head.to_string(),
            body: body.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// The primitives of an ABA+ framework, as produced by the readers.
///
/// Nothing is checked at this level: labels used in the rules, the contraries and the preferences
/// may be missing from the language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawABAFramework {
    /// the labels of the literals
    pub language: Vec<String>,
    /// the labels of the assumptions
    pub assumptions: Vec<String>,
    /// the contraries, as (contraried, attacker) pairs of labels
    pub contraries: Vec<(String, String)>,
    /// the rules
    pub rules: Vec<RawRule>,
    /// the preferences, each map associating a label to the labels it is strictly preferred over
    pub preferences: Vec<BTreeMap<String, BTreeSet<String>>>,
}

/// Builds [ABAFramework] objects from [RawABAFramework] ones.
///
/// By default, the builder is lenient: references to literals that are not in the language are dropped.
/// A rule whose head is unknown is dropped entirely.
/// In strict mode, such references make the building fail with an [ABAError::Reference] error.
///
/// # Example
///
/// ```
/// # use crustaba::aba::{ABAFrameworkBuilder, RawABAFramework, RawRule};
/// let raw = RawABAFramework {
///     language: vec!["a".to_string(), "p".to_string()],
///     assumptions: vec!["a".to_string()],
///     rules: vec![RawRule::new("r1", "p", &["a", "q"])],
///     ..Default::default()
/// };
/// let framework = ABAFrameworkBuilder::default().build(&raw).unwrap();
/// assert_eq!(1, framework.iter_rules().next().unwrap().body().len());
/// assert!(ABAFrameworkBuilder::new().strict(true).build(&raw).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ABAFrameworkBuilder {
    strict: bool,
}

impl ABAFrameworkBuilder {
    /// Builds a new lenient builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builds the framework described by the raw primitives.
    pub fn build(&self, raw: &RawABAFramework) -> Result<ABAFramework> {
        let language = Language::new_with_labels(&raw.language);
        let mut framework = ABAFramework::new_with_language(language);
        for label in raw.assumptions.iter() {
            if let Some(id) = self.resolve(&framework, label, || "assumption set".to_string())? {
                framework.add_assumption(id);
            }
        }
        for (contraried, attacker) in raw.contraries.iter() {
            let referrer = || format!("contrary of {}", contraried);
            let contraried_id = self.resolve(&framework, contraried, referrer)?;
            let attacker_id = self.resolve(&framework, attacker, referrer)?;
            if let (Some(c), Some(a)) = (contraried_id, attacker_id) {
                framework.add_contrary(Contrary::new(c, a));
            }
        }
        for rule in raw.rules.iter() {
            if let Some(r) = self
                .build_rule(&framework, rule)
                .with_context(|| format!("while building rule {}", rule.id))?
            {
                framework.add_rule(r);
            }
        }
        for preferences in raw.preferences.iter() {
            for (preferred, less_preferred) in preferences.iter() {
                let referrer = || format!("preference of {}", preferred);
                let preferred_id = match self.resolve(&framework, preferred, referrer)? {
                    Some(id) => id,
                    None => continue,
                };
                for l in less_preferred.iter() {
                    if let Some(id) = self.resolve(&framework, l, referrer)? {
                        framework
                            .preferences_mut()
                            .add_preference(preferred_id, id);
                    }
                }
            }
        }
        debug!(
            "built a framework with {} literals, {} assumptions, {} contraries and {} rules",
            framework.language().len(),
            framework.n_assumptions(),
            framework.n_contraries(),
            framework.n_rules()
        );
        Ok(framework)
    }

    fn build_rule(&self, framework: &ABAFramework, rule: &RawRule) -> Result<Option<Rule>> {
        let referrer = || format!("rule {}", rule.id);
        let head = match self.resolve(framework, &rule.head, referrer)? {
            Some(id) => id,
            None => {
                debug!("dropping rule {} since its head is unknown", rule.id);
                return Ok(None);
            }
        };
        let mut body = BTreeSet::new();
        for b in rule.body.iter() {
            if let Some(id) = self.resolve(framework, b, referrer)? {
                body.insert(id);
            }
        }
        Ok(Some(Rule::new(rule.id.clone(), head, body)))
    }

    fn resolve<F>(&self, framework: &ABAFramework, label: &str, referrer: F) -> Result<Option<LiteralId>>
    where
        F: FnOnce() -> String,
    {
        match framework.language().get_literal(label) {
            Ok(l) => Ok(Some(l.id())),
            Err(_) if self.strict => Err(ABAError::reference(label.trim(), referrer()).into()),
            Err(_) => {
                debug!("dropping unknown literal {:?} referenced by {}", label, referrer());
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aba::tests_utils::toni_tutorial_ex;

    fn strings(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn toni_raw() -> RawABAFramework {
        RawABAFramework {
            language: strings(&["a", "b", "c", "p", "q", "r", "s", "t"]),
            assumptions: strings(&["a", "b", "c"]),
            contraries: vec![
                ("a".to_string(), "r".to_string()),
                ("b".to_string(), "s".to_string()),
                ("c".to_string(), "t".to_string()),
            ],
            rules: vec![
                RawRule::new("r1", "p", &["q", "a"]),
                RawRule::new("r2", "q", &["r"]),
                RawRule::new("r3", "r", &["b", "c"]),
            ],
            preferences: vec![],
        }
    }

    #[test]
    fn test_build() {
        let f = ABAFrameworkBuilder::default().build(&toni_raw()).unwrap();
        assert_eq!(toni_tutorial_ex(), f);
        assert_eq!(f.assumptions(), f.base_assumptions());
    }

    #[test]
    fn test_build_preferences() {
        let mut raw = toni_raw();
        raw.preferences = vec![[(
            "a".to_string(),
            ["b".to_string(), "c".to_string()].into_iter().collect(),
        )]
        .into_iter()
        .collect()];
        let f = ABAFrameworkBuilder::default().build(&raw).unwrap();
        assert!(f.is_preferred(0, 1));
        assert!(f.is_preferred(0, 2));
        assert_eq!(2, f.preferences().len());
    }

    #[test]
    fn test_lenient_drops_unknown_references() {
        let mut raw = toni_raw();
        raw.assumptions.push("x".to_string());
        raw.contraries.push(("a".to_string(), "x".to_string()));
        raw.rules.push(RawRule::new("r4", "x", &["a"]));
        raw.rules.push(RawRule::new("r5", "s", &["a", "y"]));
        raw.preferences = vec![[("x".to_string(), ["a".to_string()].into_iter().collect())]
            .into_iter()
            .collect()];
        let f = ABAFrameworkBuilder::new().build(&raw).unwrap();
        assert_eq!(3, f.n_assumptions());
        assert_eq!(3, f.n_contraries());
        assert_eq!(4, f.n_rules());
        let r5 = f.iter_rules().last().unwrap();
        assert_eq!("r5", r5.id());
        assert_eq!(1, r5.body().len());
        assert!(f.preferences().is_empty());
    }

    #[test]
    fn test_strict_fails_on_unknown_references() {
        let mut raw = toni_raw();
        raw.rules.push(RawRule::new("r4", "p", &["a", "y"]));
        let err = ABAFrameworkBuilder::new().strict(true).build(&raw).unwrap_err();
        assert_eq!(
            Some(&ABAError::reference("y", "rule r4")),
            err.downcast_ref::<ABAError>()
        );
        assert!(format!("{:#}", err).contains("while building rule r4"));
    }

    #[test]
    fn test_strict_ok() {
        let f = ABAFrameworkBuilder::new()
            .strict(true)
            .build(&toni_raw())
            .unwrap();
        assert_eq!(toni_tutorial_ex(), f);
    }

    #[test]
    fn test_negated_labels() {
        let raw = RawABAFramework {
            language: strings(&["a", "¬a", "p"]),
            assumptions: strings(&["-a"]),
            rules: vec![RawRule::new("r1", "p", &["¬a"])],
            ..Default::default()
        };
        let f = ABAFrameworkBuilder::new().strict(true).build(&raw).unwrap();
        assert!(f.is_assumption(1));
        assert!(f.is_atomic());
    }
}
