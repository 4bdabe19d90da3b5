//! The material needed to handle Assumption-based Argumentation frameworks and their ABA+ extension.
//!
//! The usual workflow is:
//! 1. build an [ABAFramework], either directly or from raw primitives with an [ABAFrameworkBuilder],
//! 2. [prepare](ABAFramework::prepare) it, getting a non-circular and atomic framework,
//! 3. generate its [arguments](ABAFramework::generate_arguments) and [attacks](ABAFramework::generate_attacks),
//! 4. for ABA+, [enumerate the assumption subsets](ABAFramework::enumerate_assumption_subsets)
//!    and [compute the preference-based attacks](ABAFramework::generate_preference_attacks).
//!
//! # Example
//!
//! ```
//! # use crustaba::aba::{ABAFrameworkBuilder, RawABAFramework, RawRule};
//! let raw = RawABAFramework {
//!     language: ["a", "b", "x", "y"].iter().map(|s| s.to_string()).collect(),
//!     assumptions: vec!["a".to_string(), "b".to_string()],
//!     contraries: vec![("a".to_string(), "y".to_string()), ("b".to_string(), "x".to_string())],
//!     rules: vec![
//!         RawRule::new("r1", "x", &["a"]),
//!         RawRule::new("r2", "y", &["b"]),
//!     ],
//!     preferences: vec![[("a".to_string(), ["b".to_string()].into_iter().collect())].into_iter().collect()],
//! };
//! let framework = ABAFrameworkBuilder::default().build(&raw).unwrap();
//! let mut framework = framework.prepare();
//! framework.generate_arguments();
//! framework.generate_attacks().unwrap();
//! framework.enumerate_assumption_subsets();
//! let (normal, reverse) = framework.generate_preference_attacks().unwrap();
//! assert!(!normal.is_empty());
//! assert!(!reverse.is_empty());
//! ```

mod aba_atomicity;

mod aba_framework;
pub use aba_framework::ABAFramework;
pub use aba_framework::Contrary;
pub use aba_framework::Rule;

mod aba_plus;
pub use aba_plus::ABAPlusMode;
pub use aba_plus::ArgumentPreferenceAttacks;
pub use aba_plus::AssumptionSet;
pub use aba_plus::SetAttack;

mod aba_remove_cycles;

mod argument;
pub use argument::Argument;
pub use argument::Attack;

mod argument_closure;

mod attacks;

mod error;
pub use error::ABAError;

mod framework_builder;
pub use framework_builder::ABAFrameworkBuilder;
pub use framework_builder::RawABAFramework;
pub use framework_builder::RawRule;

mod language;
pub use language::Labelled;
pub use language::Language;
pub use language::Literal;
pub use language::LiteralId;
pub use language::NEGATION_SYMBOL;

mod preferences;
pub use preferences::expand_chain;
pub use preferences::PreferenceRelation;
