/// An enum acting like a `Result`, but producing warnings instead of errors.
///
/// As there are no error values, there is always an "ok" value, which can be associated with one or more warnings.
#[derive(Debug)]
pub(crate) enum WarningResult<T, W> {
    Ok(T),
    Warned(T, Vec<W>),
}

impl<T, W> WarningResult<T, W> {
    /// Consumes the warnings, returning the corresponding value.
    ///
    /// The warnings are passed to the provided callback.
    pub(crate) fn consume_warnings<F>(self, f: F) -> T
    where
        F: FnOnce(Vec<W>),
    {
        match self {
            WarningResult::Ok(t) => t,
            WarningResult::Warned(t, w) => {
                f(w);
                t
            }
        }
    }
}
