use std::{fmt::{self, Debug}, mem, ops::ControlFlow};

use tracing::{debug, trace};

use crate::{ErrorList, Failure};

/// Collects errors from a sequence of fallible steps, up to the first fatal error.
///
/// Each error fed to the collector is passed to a classifier, which decides whether it is fatal.
/// Non-fatal errors (warnings) are accumulated, and processing may continue. The first fatal error
/// closes the collector, and the terminal result is returned so the caller knows to stop.
///
/// ```
/// # use warnings::Collector;
/// let mut collector = Collector::new(|e: &&str| *e == "boom");
///
/// assert!(collector.absorb("w1").is_none());
/// assert!(collector.absorb(None).is_none());
/// assert!(collector.absorb("w2").is_none());
///
/// // The first fatal error stops collection
/// let failure = collector.absorb("boom").unwrap();
/// assert_eq!(failure.fatal(), Some(&"boom"));
///
/// // By default, the warnings collected before a fatal error are discarded
/// assert!(failure.warnings().is_empty());
/// ```
///
/// # Terminal result
///
/// The result reported on closure is computed as follows:
///
/// - A fatal error, by default, is returned on its own as [`Failure::Fatal`]. If
///   [`fatal_with_warnings`](Collector::fatal_with_warnings) is enabled, it is instead returned as
///   a [`Failure::List`] together with the warnings collected before it.
/// - With no fatal error and no warnings, the result is `None`.
/// - Otherwise the warnings are returned as a [`Failure::List`]. This includes a single warning,
///   so that fatal-ness can always be checked with [`Failure::fatal`].
///
/// # Closure
///
/// A collector is closed either by absorbing a fatal error, or by calling [`finish`] (or one of
/// the consuming [`into_failure`] and [`into_result`]). Absorbing anything after closure is a
/// logic error in the caller, and panics:
///
/// ```should_panic
/// # use warnings::Collector;
/// let mut collector = Collector::new(|_: &&str| false);
/// collector.absorb("w1");
/// collector.finish();
/// collector.absorb("w2"); // Panics
/// ```
///
/// [`finish`]: Collector::finish
/// [`into_failure`]: Collector::into_failure
/// [`into_result`]: Collector::into_result
pub struct Collector<E, F> {
    /// Returns `true` for errors which should stop collection.
    classifier: F,

    /// Whether a fatal error is reported together with the preceding warnings.
    fatal_with_warnings: bool,

    state: State<E>,
}

enum State<E> {
    /// Still collecting. Holds the warnings so far.
    Open(Vec<E>),

    /// No more errors may be absorbed. Holds the terminal result, which is fixed from this point.
    Closed(Option<Failure<E>>),
}

impl<E, F> Collector<E, F>
where
    F: FnMut(&E) -> bool,
{
    /// Constructs a new open `Collector`, using `classifier` to tell fatal errors (`true`) apart
    /// from warnings (`false`).
    #[must_use]
    pub fn new(classifier: F) -> Self {
        Collector {
            classifier,
            fatal_with_warnings: false,
            state: State::Open(vec![]),
        }
    }

    /// Sets whether a fatal error is reported together with the warnings collected before it.
    ///
    /// ```
    /// # use warnings::{Collector, ErrorList, Failure};
    /// let mut collector = Collector::new(|e: &&str| *e == "boom")
    ///     .fatal_with_warnings(true);
    ///
    /// collector.absorb("w1");
    /// collector.absorb("w2");
    /// let failure = collector.absorb("boom").unwrap();
    ///
    /// assert_eq!(failure, &Failure::List(ErrorList::with_fatal("boom", vec!["w1", "w2"])));
    /// assert_eq!(failure.to_string(), "fatal:\nboom\nwarnings:\nw1\nw2\n");
    /// ```
    #[must_use]
    pub fn fatal_with_warnings(mut self, enabled: bool) -> Self {
        self.fatal_with_warnings = enabled;
        self
    }

    /// Like [`fatal_with_warnings`](Collector::fatal_with_warnings), but in-place.
    ///
    /// The terminal result is fixed once the collector closes, so this panics if called after
    /// closure.
    #[track_caller]
    pub fn set_fatal_with_warnings(&mut self, enabled: bool) {
        self.assert_open();
        self.fatal_with_warnings = enabled;
    }

    /// Absorbs a single error, which may be `None` to indicate that a step succeeded.
    ///
    /// Returns `None` if collection can continue, or the terminal result if `error` was fatal, in
    /// which case the collector is now closed. The terminal result is computed as described in
    /// the [type-level documentation](Collector#terminal-result).
    ///
    /// # Panics
    ///
    /// Panics if the collector is already closed, even if `error` is `None`.
    #[track_caller]
    pub fn absorb(&mut self, error: impl Into<Option<E>>) -> Option<&Failure<E>> {
        let State::Open(warnings) = &mut self.state else {
            panic!("warnings::Collector already closed");
        };
        let error = error.into()?;

        if (self.classifier)(&error) {
            let warnings = mem::take(warnings);
            self.close(Some(error), warnings);
            self.terminal()
        } else {
            warnings.push(error);
            trace!(warnings = warnings.len(), "Collected warning");
            None
        }
    }

    /// Absorbs the error from a [`Result`], if there is one, passing through any successful value.
    ///
    /// - `Ok(value)` gives `Continue(Some(value))`.
    /// - A warning gives `Continue(None)`; the step failed, but later steps may still run.
    /// - A fatal error gives `Break(())`, and the collector is closed.
    ///
    /// ```
    /// # use std::ops::ControlFlow;
    /// # use warnings::Collector;
    /// let mut collector = Collector::new(|e: &String| e.starts_with("fatal"));
    /// let mut sum = 0;
    ///
    /// for input in ["1", "x", "2", "fatal", "3"] {
    ///     let parsed = input.parse::<u32>().map_err(|_| input.to_owned());
    ///     match collector.absorb_result(parsed) {
    ///         ControlFlow::Continue(value) => sum += value.unwrap_or(0),
    ///         ControlFlow::Break(()) => break,
    ///     }
    /// }
    ///
    /// assert_eq!(sum, 3);
    /// assert_eq!(collector.into_failure().unwrap().fatal().map(String::as_str), Some("fatal"));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the collector is already closed.
    #[track_caller]
    pub fn absorb_result<T>(&mut self, result: Result<T, E>) -> ControlFlow<(), Option<T>> {
        self.assert_open();
        match result {
            Ok(value) => ControlFlow::Continue(Some(value)),
            Err(error) => match self.absorb(error) {
                None => ControlFlow::Continue(None),
                Some(_) => ControlFlow::Break(()),
            },
        }
    }
}

impl<E, F> Collector<E, F> {
    /// Closes the collector and returns the terminal result.
    ///
    /// Calling this on an already-closed collector is fine, and returns the same result again.
    ///
    /// ```
    /// # use warnings::{Collector, ErrorList, Failure};
    /// let mut collector = Collector::new(|_: &&str| false);
    /// collector.absorb("w1");
    ///
    /// // A single warning is still wrapped in a list
    /// let expected = Failure::List(ErrorList::from_warnings(vec!["w1"]));
    /// assert_eq!(collector.finish(), Some(&expected));
    /// assert_eq!(collector.finish(), Some(&expected));
    /// ```
    pub fn finish(&mut self) -> Option<&Failure<E>> {
        if let State::Open(warnings) = &mut self.state {
            let warnings = mem::take(warnings);
            self.close(None, warnings);
        }
        self.terminal()
    }

    /// Consumes the collector, closing it if necessary, and returns the owned terminal result.
    ///
    /// ```
    /// # use warnings::Collector;
    /// let collector = Collector::new(|_: &std::io::Error| true);
    /// assert!(collector.into_failure().is_none());
    /// ```
    #[must_use]
    pub fn into_failure(self) -> Option<Failure<E>> {
        match self.state {
            State::Open(warnings) => {
                log_closure(false, warnings.len(), self.fatal_with_warnings);
                resolve(None, warnings, self.fatal_with_warnings)
            }
            State::Closed(terminal) => terminal,
        }
    }

    /// Like [`into_failure`](Collector::into_failure), but as a [`Result`] so that the terminal
    /// result can be propagated with `?`.
    ///
    /// ```
    /// # use warnings::{Collector, Failure};
    /// fn run(steps: &[Result<(), &'static str>]) -> Result<(), Failure<&'static str>> {
    ///     let mut collector = Collector::new(|e: &&str| e.starts_with("fatal"));
    ///     for step in steps {
    ///         if collector.absorb(step.err()).is_some() {
    ///             break;
    ///         }
    ///     }
    ///     collector.into_result()
    /// }
    ///
    /// assert!(run(&[Ok(()), Ok(())]).is_ok());
    /// assert_eq!(run(&[Err("w1"), Err("fatal: x"), Err("w2")]), Err(Failure::Fatal("fatal: x")));
    /// ```
    pub fn into_result(self) -> Result<(), Failure<E>> {
        match self.into_failure() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Returns `true` once a fatal error has been absorbed, or the collector has been finished.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed(_))
    }

    /// The warnings collected so far.
    ///
    /// Once closed, these are the warnings in the terminal result, which are empty if a fatal
    /// error discarded them.
    #[must_use]
    pub fn warnings(&self) -> &[E] {
        match &self.state {
            State::Open(warnings) => warnings,
            State::Closed(Some(terminal)) => terminal.warnings(),
            State::Closed(None) => &[],
        }
    }

    /// The number of warnings collected so far. See [`warnings`](Collector::warnings).
    #[must_use]
    pub fn len_warnings(&self) -> usize {
        self.warnings().len()
    }

    fn close(&mut self, fatal: Option<E>, warnings: Vec<E>) {
        log_closure(fatal.is_some(), warnings.len(), self.fatal_with_warnings);
        self.state = State::Closed(resolve(fatal, warnings, self.fatal_with_warnings));
    }

    fn terminal(&self) -> Option<&Failure<E>> {
        match &self.state {
            State::Open(_) => None,
            State::Closed(terminal) => terminal.as_ref(),
        }
    }

    #[track_caller]
    fn assert_open(&self) {
        if self.is_closed() {
            panic!("warnings::Collector already closed");
        }
    }
}

impl<E: Debug, F> Debug for Collector<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Collector");
        s.field("fatal_with_warnings", &self.fatal_with_warnings);
        match &self.state {
            State::Open(warnings) => s.field("warnings", warnings),
            State::Closed(terminal) => s.field("closed", terminal),
        };
        s.finish_non_exhaustive()
    }
}

fn resolve<E>(fatal: Option<E>, warnings: Vec<E>, fatal_with_warnings: bool) -> Option<Failure<E>> {
    match fatal {
        Some(fatal) if !fatal_with_warnings => Some(Failure::Fatal(fatal)),
        None if warnings.is_empty() => None,
        fatal => Some(Failure::List(ErrorList { warnings, fatal })),
    }
}

fn log_closure(fatal: bool, warnings: usize, fatal_with_warnings: bool) {
    debug!(
        fatal,
        warnings,
        discarded = fatal && !fatal_with_warnings,
        "Collector closed"
    );
}
