//! Pulling the fatal error and warnings out of a terminal result, whatever its shape.
//!
//! A [`Collector`](crate::Collector) reports either nothing, a bare fatal error, or an
//! [`ErrorList`]. The functions here treat all three uniformly:
//!
//! | Input                | Fatal               | Warnings        |
//! |----------------------|---------------------|-----------------|
//! | `None`               | `None`              | empty           |
//! | bare error `e`       | `Some(e)`           | empty           |
//! | `ErrorList`          | the list's fatal    | the list's      |
//!
//! The `_dyn` variants do the same for a type-erased `&dyn Error`, as found after a terminal
//! result has been boxed and propagated. Any error which is not an `ErrorList<E>` or a
//! `Failure<E>` is treated as a bare fatal error.

use std::error::Error;

use crate::{ErrorList, Failure};

/// Returns the fatal error from a terminal result, if any.
///
/// ```
/// # use warnings::{extract::fatal_only, ErrorList, Failure};
/// assert_eq!(fatal_only::<&str>(None), None);
/// assert_eq!(fatal_only(Some(&Failure::Fatal("boom"))), Some(&"boom"));
///
/// let warnings_only = Failure::List(ErrorList::from_warnings(vec!["w1"]));
/// assert_eq!(fatal_only(Some(&warnings_only)), None);
/// ```
#[must_use]
pub fn fatal_only<E>(failure: Option<&Failure<E>>) -> Option<&E> {
    failure.and_then(Failure::fatal)
}

/// Returns the warnings from a terminal result, which are empty unless it is an [`ErrorList`].
///
/// ```
/// # use warnings::{extract::warnings_only, ErrorList, Failure};
/// assert!(warnings_only::<&str>(None).is_empty());
/// assert!(warnings_only(Some(&Failure::Fatal("boom"))).is_empty());
///
/// let list = Failure::List(ErrorList::with_fatal("boom", vec!["w1", "w2"]));
/// assert_eq!(warnings_only(Some(&list)), &["w1", "w2"]);
/// ```
#[must_use]
pub fn warnings_only<E>(failure: Option<&Failure<E>>) -> &[E] {
    match failure {
        Some(failure) => failure.warnings(),
        None => &[],
    }
}

/// Like [`fatal_only`], but for an error of unknown type.
///
/// `E` is the warning/fatal error type of the collector which produced `error`.
///
/// ```
/// # use std::{error::Error, io};
/// # use warnings::{extract::fatal_only_dyn, ErrorList};
/// let list = ErrorList::from_warnings(vec![io::Error::other("w1")]);
/// let boxed: Box<dyn Error> = Box::new(list);
/// assert!(fatal_only_dyn::<io::Error>(Some(boxed.as_ref())).is_none());
///
/// let bare: Box<dyn Error> = Box::new(io::Error::other("boom"));
/// let fatal = fatal_only_dyn::<io::Error>(Some(bare.as_ref()));
/// assert_eq!(fatal.map(ToString::to_string).as_deref(), Some("boom"));
/// ```
#[must_use]
pub fn fatal_only_dyn<'a, E>(
    error: Option<&'a (dyn Error + 'static)>,
) -> Option<&'a (dyn Error + 'static)>
where
    E: Error + 'static,
{
    let error = error?;
    if let Some(list) = error.downcast_ref::<ErrorList<E>>() {
        list.fatal().map(as_dyn)
    } else if let Some(failure) = error.downcast_ref::<Failure<E>>() {
        failure.fatal().map(as_dyn)
    } else {
        Some(error)
    }
}

/// Like [`warnings_only`], but for an error of unknown type.
///
/// `E` is the warning/fatal error type of the collector which produced `error`.
#[must_use]
pub fn warnings_only_dyn<'a, E>(error: Option<&'a (dyn Error + 'static)>) -> &'a [E]
where
    E: Error + 'static,
{
    let Some(error) = error else {
        return &[];
    };
    if let Some(list) = error.downcast_ref::<ErrorList<E>>() {
        list.warnings()
    } else if let Some(failure) = error.downcast_ref::<Failure<E>>() {
        failure.warnings()
    } else {
        &[]
    }
}

fn as_dyn<E: Error + 'static>(error: &E) -> &(dyn Error + 'static) {
    error
}
