use thiserror::Error;

/// The kinds of errors raised by the ABA engine.
///
/// Engine functions return [`anyhow::Result`]; when the failure is one of these kinds,
/// the underlying error can be recovered with [`anyhow::Error::downcast_ref`].
///
/// # Example
///
/// ```
/// # use crustaba::aba::{ABAError, ABAFramework, Language};
/// let mut framework = ABAFramework::new_with_language(Language::new_with_labels(&["a"]));
/// let err = framework.new_assumption("b").unwrap_err();
/// assert!(matches!(err.downcast_ref::<ABAError>(), Some(ABAError::Reference { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ABAError {
    /// A literal name does not belong to the language.
    #[error("unknown literal {name:?} referenced by {referrer}")]
    Reference {
        /// the missing literal name
        name: String,
        /// what referenced the literal (a rule, a contrary, ...)
        referrer: String,
    },
    /// A derived collection was queried before the operation computing it was run.
    #[error("{missing} must be computed before {operation}")]
    Sequencing {
        /// the collection that has not been computed
        missing: &'static str,
        /// the operation that needed it
        operation: &'static str,
    },
}

impl ABAError {
    pub(crate) fn reference<S, R>(name: S, referrer: R) -> Self
    where
        S: Into<String>,
        R: Into<String>,
    {
        ABAError::Reference {
            name: name.into(),
            referrer: referrer.into(),
        }
    }

    pub(crate) fn sequencing(missing: &'static str, operation: &'static str) -> Self {
        ABAError::Sequencing { missing, operation }
    }
}
