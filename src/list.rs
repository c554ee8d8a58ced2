use std::{error::Error, fmt::{self, Display}};

/// Holds the warnings collected during an operation and, optionally, the one fatal error which
/// stopped it.
///
/// `ErrorList` is usually produced by a [`Collector`], but it has no invariants beyond its two
/// fields, so building one by hand is fine too.
///
/// It implements [`Display`] with a multi-line rendering meant for logs, and [`Error`] whenever
/// `E` does, so it can be propagated anywhere a single error is expected:
///
/// ```
/// # use warnings::ErrorList;
/// let list = ErrorList {
///     fatal: Some("boom"),
///     warnings: vec!["w1", "w2"],
/// };
/// assert_eq!(list.to_string(), "fatal:\nboom\nwarnings:\nw1\nw2\n");
/// ```
///
/// [`Collector`]: crate::Collector
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ErrorList<E> {
    /// Non-fatal errors, in the order they were collected.
    pub warnings: Vec<E>,

    /// The error which ended collection, if any.
    pub fatal: Option<E>,
}

impl<E> ErrorList<E> {
    /// Constructs an empty `ErrorList`.
    #[must_use]
    pub fn new() -> Self {
        ErrorList { warnings: vec![], fatal: None }
    }

    /// Constructs an `ErrorList` with warnings and no fatal error.
    ///
    /// ```
    /// # use warnings::ErrorList;
    /// let list = ErrorList::from_warnings(vec!["w1"]);
    /// assert!(!list.has_fatal());
    /// assert_eq!(list.to_string(), "warning:\nw1\n");
    /// ```
    #[must_use]
    pub fn from_warnings(warnings: Vec<E>) -> Self {
        ErrorList { warnings, fatal: None }
    }

    /// Constructs an `ErrorList` with a fatal error and the warnings which preceded it.
    #[must_use]
    pub fn with_fatal(fatal: E, warnings: Vec<E>) -> Self {
        ErrorList { warnings, fatal: Some(fatal) }
    }

    /// The fatal error, if any.
    #[must_use]
    pub fn fatal(&self) -> Option<&E> {
        self.fatal.as_ref()
    }

    /// The warnings, in collection order.
    #[must_use]
    pub fn warnings(&self) -> &[E] {
        &self.warnings
    }

    /// Returns `true` if this list holds a fatal error.
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    /// Returns `true` if there is neither a fatal error nor any warnings.
    ///
    /// A [`Collector`](crate::Collector) never returns an empty list; it returns `None` instead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fatal.is_none() && self.warnings.is_empty()
    }

    /// Deconstructs this list into its fatal error and warnings.
    #[must_use]
    pub fn into_parts(self) -> (Option<E>, Vec<E>) {
        (self.fatal, self.warnings)
    }
}

impl<E> Default for ErrorList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Display> Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fatal) = &self.fatal {
            writeln!(f, "fatal:")?;
            writeln!(f, "{fatal}")?;
        }

        match self.warnings.len() {
            0 => (),
            1 => writeln!(f, "warning:")?,
            _ => writeln!(f, "warnings:")?,
        }
        for warning in &self.warnings {
            writeln!(f, "{warning}")?;
        }

        Ok(())
    }
}

impl<E: Error + 'static> Error for ErrorList<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.fatal.as_ref().map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct Msg(&'static str);

    #[test]
    fn empty_list_renders_nothing() {
        let list: ErrorList<&str> = ErrorList::new();
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "");
    }

    #[test]
    fn fatal_only_has_no_warning_header() {
        let list = ErrorList::with_fatal("boom", vec![]);
        assert_eq!(list.to_string(), "fatal:\nboom\n");
    }

    #[test]
    fn warning_header_is_pluralised() {
        assert_eq!(ErrorList::from_warnings(vec!["w1"]).to_string(), "warning:\nw1\n");
        assert_eq!(
            ErrorList::from_warnings(vec!["w1", "w2", "w3"]).to_string(),
            "warnings:\nw1\nw2\nw3\n",
        );
    }

    #[test]
    fn source_is_the_fatal_error() {
        let list = ErrorList::with_fatal(Msg("boom"), vec![Msg("w1")]);
        let source = list.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("boom"));

        let list = ErrorList::from_warnings(vec![Msg("w1")]);
        assert!(list.source().is_none());
    }

    #[test]
    fn usable_as_boxed_error() {
        fn step() -> Result<(), Box<dyn Error>> {
            Err::<(), _>(ErrorList::from_warnings(vec![Msg("w1"), Msg("w2")]))?;
            Ok(())
        }

        let err = step().unwrap_err();
        assert_eq!(err.to_string(), "warnings:\nw1\nw2\n");
    }
}
