// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Debug;
use std::sync::Arc;

use crate::PollDuration;

/// A strategy that decides how long to wait before the next polling attempt.
///
/// Polling loops depend on this trait only, so any strategy can be swapped in without changing
/// the loop. The loop owns all the state: before every attempt after the first it calls
/// [`next`][PollInterval::next] with the attempt count and the duration it waited last time,
/// and feeds the returned duration back in on the following call.
///
/// The trait is object safe, so loops can hold a `Box<dyn PollInterval>` or an
/// `Arc<dyn PollInterval>`.
///
/// # Examples
///
/// ```
/// use poll_interval::{PollDuration, PollInterval};
///
/// #[derive(Debug)]
/// struct Fixed(PollDuration);
///
/// impl PollInterval for Fixed {
///     fn next(&self, _poll_count: u32, _previous: Option<PollDuration>) -> PollDuration {
///         self.0
///     }
/// }
///
/// let interval: Box<dyn PollInterval> = Box::new(Fixed(PollDuration::ONE_SECOND));
/// assert_eq!(interval.next(1, None), PollDuration::ONE_SECOND);
/// ```
pub trait PollInterval: Send + Sync + Debug {
    /// Returns the duration to wait before the next attempt.
    ///
    /// `poll_count` identifies the attempt about to happen. `previous` is the duration waited before
    /// the most recent attempt, or `None` if no attempt has been delayed yet.
    fn next(&self, poll_count: u32, previous: Option<PollDuration>) -> PollDuration;
}

impl<T: PollInterval + ?Sized> PollInterval for &T {
    fn next(&self, poll_count: u32, previous: Option<PollDuration>) -> PollDuration {
        (**self).next(poll_count, previous)
    }
}

impl<T: PollInterval + ?Sized> PollInterval for Box<T> {
    fn next(&self, poll_count: u32, previous: Option<PollDuration>) -> PollDuration {
        (**self).next(poll_count, previous)
    }
}

impl<T: PollInterval + ?Sized> PollInterval for Arc<T> {
    fn next(&self, poll_count: u32, previous: Option<PollDuration>) -> PollDuration {
        (**self).next(poll_count, previous)
    }
}
