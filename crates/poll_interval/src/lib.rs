// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_logo_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/poll_interval/logo.png")]
#![doc(html_favicon_url = "https://media.githubusercontent.com/media/microsoft/oxidizer/refs/heads/main/crates/poll_interval/favicon.ico")]

//! Strategies for computing the delay between successive polling attempts.
//!
//! A polling loop that repeatedly checks a condition until it holds, or until a timeout elapses,
//! needs to decide how long to wait before each attempt. This crate provides that decision as a
//! pluggable [`PollInterval`] strategy, so the loop never has to know how delays are computed.
//!
//! # Quick Start
//!
//! ```rust
//! use poll_interval::{PollDuration, PollInterval, iterative_with_start};
//!
//! // Double the wait after every attempt, starting from 500ms.
//! let interval = iterative_with_start(|d: PollDuration| d * 2, PollDuration::FIVE_HUNDRED_MILLISECONDS)?;
//!
//! let first = interval.next(1, None);
//! assert_eq!(first, PollDuration::ONE_SECOND);
//!
//! // The loop feeds back the duration it waited last time.
//! let second = interval.next(2, Some(first));
//! assert_eq!(second, PollDuration::from_secs(2));
//! # Ok::<(), poll_interval::Error>(())
//! ```
//!
//! # Overview
//!
//! - [`PollInterval`] - The strategy contract consumed by polling loops.
//! - [`IterativePollInterval`] - Derives each interval by applying an [`IntervalFn`] to the previous
//!   one, seeded by a start duration. Also available through [`iterative`] and
//!   [`iterative_with_start`].
//! - [`PollDuration`] - A duration that can also be [`FOREVER`][PollDuration::FOREVER].
//! - [`Error`] - Raised when a poll interval is misconfigured or a duration cannot be parsed.
//!
//! Strategies hold no mutable state and never sleep. The polling loop owns the attempt count,
//! the previous duration, and the decision of when to give up.
//!
//! # Features
//!
//! - `serde`: Serialization of [`PollDuration`] and the `IterativeConfig` configuration type.
//! - `logs`: Emits `tracing` events when intervals are computed or a configuration is rejected.

mod constants;
mod duration;
mod error;
mod interval_fn;
mod iterative;
mod strategy;

#[cfg(any(feature = "serde", test))]
mod config;

pub use constants::DEFAULT_START_DURATION;
pub use duration::PollDuration;
pub use error::{ConfigurationIssue, Error, Result};
pub use interval_fn::IntervalFn;
pub use iterative::{IterativePollInterval, iterative, iterative_with_start};
pub use strategy::PollInterval;

#[cfg(any(feature = "serde", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use config::IterativeConfig;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
pub(crate) mod testing;
