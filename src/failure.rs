use std::{error::Error, fmt::{self, Display}};

use crate::ErrorList;

/// The terminal result of a [`Collector`], when there is something to report.
///
/// A collector which saw no errors at all reports `None`; otherwise it reports one of two shapes:
///
/// - [`Failure::Fatal`]: a bare fatal error. This is what a collector returns by default when it
///   hits a fatal error, discarding any warnings collected before it.
/// - [`Failure::List`]: an [`ErrorList`]. This is returned when there are only warnings (even a
///   single one), or when the collector was asked to keep warnings alongside a fatal error.
///
/// Callers that only care about "was this fatal" and "what were the warnings" should use
/// [`fatal`](Failure::fatal) and [`warnings`](Failure::warnings), or the free functions in
/// [`extract`](crate::extract), rather than matching on the shape.
///
/// ```
/// # use warnings::{ErrorList, Failure};
/// let bare = Failure::Fatal("boom");
/// assert_eq!(bare.fatal(), Some(&"boom"));
/// assert!(bare.warnings().is_empty());
///
/// let list = Failure::List(ErrorList::from_warnings(vec!["w1"]));
/// assert_eq!(list.fatal(), None);
/// assert_eq!(list.warnings(), &["w1"]);
/// ```
///
/// [`Collector`]: crate::Collector
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Failure<E> {
    /// A fatal error on its own.
    Fatal(E),

    /// Warnings, plus possibly the fatal error which followed them.
    List(ErrorList<E>),
}

impl<E> Failure<E> {
    /// The fatal error, if any. A bare [`Failure::Fatal`] is its own fatal error.
    #[must_use]
    pub fn fatal(&self) -> Option<&E> {
        match self {
            Failure::Fatal(e) => Some(e),
            Failure::List(list) => list.fatal(),
        }
    }

    /// The warnings, which are always empty for a bare [`Failure::Fatal`].
    #[must_use]
    pub fn warnings(&self) -> &[E] {
        match self {
            Failure::Fatal(_) => &[],
            Failure::List(list) => list.warnings(),
        }
    }

    /// Returns `true` if this failure carries a fatal error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.fatal().is_some()
    }

    /// Consumes this failure, returning only its fatal error.
    #[must_use]
    pub fn into_fatal(self) -> Option<E> {
        match self {
            Failure::Fatal(e) => Some(e),
            Failure::List(list) => list.fatal,
        }
    }

    /// Consumes this failure, returning only its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<E> {
        match self {
            Failure::Fatal(_) => vec![],
            Failure::List(list) => list.warnings,
        }
    }

    /// Converts this failure into an [`ErrorList`], whatever its shape.
    ///
    /// ```
    /// # use warnings::{ErrorList, Failure};
    /// let list = Failure::Fatal("boom").into_list();
    /// assert_eq!(list, ErrorList::with_fatal("boom", vec![]));
    /// ```
    #[must_use]
    pub fn into_list(self) -> ErrorList<E> {
        match self {
            Failure::Fatal(e) => ErrorList::with_fatal(e, vec![]),
            Failure::List(list) => list,
        }
    }
}

impl<E> From<ErrorList<E>> for Failure<E> {
    fn from(list: ErrorList<E>) -> Self {
        Failure::List(list)
    }
}

impl<E: Display> Display for Failure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Fatal(e) => e.fmt(f),
            Failure::List(list) => list.fmt(f),
        }
    }
}

impl<E: Error + 'static> Error for Failure<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Failure::Fatal(e) => e.source(),
            Failure::List(list) => list.source(),
        }
    }
}
