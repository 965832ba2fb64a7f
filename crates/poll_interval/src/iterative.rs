// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};

use crate::constants::DEFAULT_START_DURATION;
use crate::{ConfigurationIssue, IntervalFn, PollDuration, PollInterval, Result};

/// A poll interval generated by applying a function to the previous interval.
///
/// The first interval is the function applied to the start duration. Every later interval is the
/// function applied to the interval that preceded it. The function is free to do anything with
/// the duration; doubling it from a 500ms start yields `1s, 2s, 4s, 8s, 16s, ...`.
///
/// `IterativePollInterval` keeps no history. The polling loop passes the previous interval back
/// into [`next`][PollInterval::next] and the sequence is reproduced from that alone.
///
/// The output of the function is not validated. A function that shrinks the duration or returns
/// [`PollDuration::FOREVER`] is used as is.
///
/// # Examples
///
/// ```
/// use poll_interval::{PollDuration, PollInterval, iterative_with_start};
///
/// let interval = iterative_with_start(|d: PollDuration| d * 2, PollDuration::FIVE_HUNDRED_MILLISECONDS)?;
///
/// let mut previous = None;
/// let mut waits = Vec::new();
/// for poll_count in 1..=5 {
///     let wait = interval.next(poll_count, previous);
///     waits.push(wait.to_string());
///     previous = Some(wait);
/// }
///
/// assert_eq!(waits, ["1s", "2s", "4s", "8s", "16s"]);
/// # Ok::<(), poll_interval::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IterativePollInterval {
    function: IntervalFn,
    start_duration: PollDuration,
}

impl IterativePollInterval {
    /// Creates an iterative poll interval starting from
    /// [`DEFAULT_START_DURATION`][crate::DEFAULT_START_DURATION] (100ms).
    #[must_use]
    pub fn new(function: IntervalFn) -> Self {
        Self {
            function,
            start_duration: DEFAULT_START_DURATION,
        }
    }

    /// Creates an iterative poll interval with an explicit start duration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`][crate::Error::InvalidConfiguration] if
    /// `start_duration` is [`PollDuration::FOREVER`].
    pub fn with_start_duration(function: IntervalFn, start_duration: impl Into<PollDuration>) -> Result<Self> {
        Self::from_parts(Some(function), Some(start_duration.into()))
    }

    /// Creates an iterative poll interval from parts that may be absent, such as values collected
    /// from configuration.
    ///
    /// The parts are checked in order: the function must be present, the start duration must be
    /// present, and the start duration must not be forever.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`][crate::Error::InvalidConfiguration] with the first
    /// [`ConfigurationIssue`] found.
    ///
    /// # Examples
    ///
    /// ```
    /// use poll_interval::{ConfigurationIssue, Error, IntervalFn, IterativePollInterval, PollDuration};
    ///
    /// let function = IntervalFn::new(|d: PollDuration| d * 2);
    ///
    /// let error = IterativePollInterval::from_parts(Some(function), Some(PollDuration::FOREVER)).unwrap_err();
    /// assert_eq!(error, Error::InvalidConfiguration(ConfigurationIssue::ForeverStartDuration));
    /// ```
    pub fn from_parts(function: Option<IntervalFn>, start_duration: Option<PollDuration>) -> Result<Self> {
        let function = function.ok_or_else(|| rejected(ConfigurationIssue::MissingFunction))?;
        let start_duration = start_duration.ok_or_else(|| rejected(ConfigurationIssue::MissingStartDuration))?;

        if start_duration.is_forever() {
            return Err(rejected(ConfigurationIssue::ForeverStartDuration));
        }

        Ok(Self { function, start_duration })
    }

    /// Returns the function applied to the previous interval.
    #[must_use]
    pub fn function(&self) -> &IntervalFn {
        &self.function
    }

    /// Returns the duration the function is applied to when there is no previous interval.
    #[must_use]
    pub fn start_duration(&self) -> PollDuration {
        self.start_duration
    }
}

impl PollInterval for IterativePollInterval {
    fn next(&self, poll_count: u32, previous: Option<PollDuration>) -> PollDuration {
        let next = self.function.call(previous.unwrap_or(self.start_duration));
        emit_next(poll_count, previous, next);
        next
    }
}

impl Display for IterativePollInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IterativePollInterval{{function={}, startDuration={}}}",
            self.function, self.start_duration
        )
    }
}

/// Creates an [`IterativePollInterval`] from a closure, starting from
/// [`DEFAULT_START_DURATION`][crate::DEFAULT_START_DURATION].
///
/// Equivalent to `IterativePollInterval::new(IntervalFn::new(function))`.
///
/// ```
/// use poll_interval::{PollDuration, PollInterval, iterative};
///
/// let interval = iterative(|d: PollDuration| d + PollDuration::ONE_SECOND);
/// assert_eq!(interval.next(1, None), PollDuration::from_millis(1100));
/// ```
pub fn iterative<F>(function: F) -> IterativePollInterval
where
    F: Fn(PollDuration) -> PollDuration + Send + Sync + 'static,
{
    IterativePollInterval::new(IntervalFn::new(function))
}

/// Creates an [`IterativePollInterval`] from a closure and a start duration.
///
/// Equivalent to `IterativePollInterval::with_start_duration(IntervalFn::new(function), start_duration)`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`][crate::Error::InvalidConfiguration] if
/// `start_duration` is [`PollDuration::FOREVER`].
pub fn iterative_with_start<F>(function: F, start_duration: impl Into<PollDuration>) -> Result<IterativePollInterval>
where
    F: Fn(PollDuration) -> PollDuration + Send + Sync + 'static,
{
    IterativePollInterval::with_start_duration(IntervalFn::new(function), start_duration)
}

fn rejected(issue: ConfigurationIssue) -> crate::Error {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "poll_interval.iterative.rejected",
        tracing::Level::DEBUG,
        poll.issue = %issue,
    );

    issue.into()
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
fn emit_next(poll_count: u32, previous: Option<PollDuration>, next: PollDuration) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "poll_interval.iterative.next",
        tracing::Level::TRACE,
        poll.count = poll_count,
        poll.previous = previous.map(tracing::field::display),
        poll.next = %next,
    );
}
