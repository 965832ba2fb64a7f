// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::PollDuration;

/// A user supplied function that turns the previous poll interval into the next one.
///
/// The function is stored in an [`Arc`] so that `IntervalFn` is cheap to clone and can be shared
/// between threads. Equality and hashing are based on identity: clones of the same `IntervalFn`
/// are equal, while two separately wrapped closures never are, even if their bodies are identical.
///
/// # Examples
///
/// ```
/// use poll_interval::{IntervalFn, PollDuration};
///
/// let double = IntervalFn::new(|d: PollDuration| d.multiply(2));
/// assert_eq!(double.call(PollDuration::ONE_SECOND), PollDuration::from_secs(2));
///
/// let same = double.clone();
/// assert_eq!(same, double);
/// assert_ne!(IntervalFn::new(|d: PollDuration| d.multiply(2)), double);
/// ```
#[derive(Clone)]
pub struct IntervalFn(Arc<dyn Fn(PollDuration) -> PollDuration + Send + Sync>);

impl IntervalFn {
    /// Wraps `function`.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(PollDuration) -> PollDuration + Send + Sync + 'static,
    {
        Self(Arc::new(function))
    }

    /// Applies the function to `previous`.
    ///
    /// The result is returned as is. A panic raised by the function unwinds through this call.
    #[must_use]
    pub fn call(&self, previous: PollDuration) -> PollDuration {
        (self.0)(previous)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for IntervalFn {
    fn eq(&self, other: &Self) -> bool {
        // Compare data pointers only; vtable pointers are not guaranteed to be unique.
        std::ptr::eq(self.addr(), other.addr())
    }
}

impl Eq for IntervalFn {}

impl Hash for IntervalFn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl Debug for IntervalFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntervalFn").field(&self.addr()).finish()
    }
}

impl Display for IntervalFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "IntervalFn@{:p}", self.addr())
    }
}
