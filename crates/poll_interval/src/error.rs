// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

/// The result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error produced while building a poll interval or parsing a duration.
///
/// Errors are only ever raised up front. Once a poll interval is constructed, computing the next
/// interval never fails on its own.
///
/// # Examples
///
/// ```
/// use poll_interval::{ConfigurationIssue, Error, IterativePollInterval, PollDuration};
///
/// let error = IterativePollInterval::from_parts(None, Some(PollDuration::ONE_SECOND)).unwrap_err();
/// assert!(matches!(error, Error::InvalidConfiguration(ConfigurationIssue::MissingFunction)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The poll interval was configured with missing or disallowed values.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(ConfigurationIssue),

    /// A duration could not be parsed from text.
    #[error("invalid duration '{input}': {reason}")]
    InvalidDuration {
        /// The text that failed to parse.
        input: String,
        /// Why the text was rejected.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_duration(input: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidDuration {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<ConfigurationIssue> for Error {
    fn from(issue: ConfigurationIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

/// Describes which part of a poll interval configuration was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigurationIssue {
    /// No interval function was supplied.
    MissingFunction,

    /// No start duration was supplied.
    MissingStartDuration,

    /// The start duration was [`PollDuration::FOREVER`][crate::PollDuration::FOREVER].
    ForeverStartDuration,
}

impl fmt::Display for ConfigurationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFunction => f.write_str("function cannot be absent"),
            Self::MissingStartDuration => f.write_str("start duration cannot be absent"),
            Self::ForeverStartDuration => f.write_str("cannot use a poll interval of length 'forever'"),
        }
    }
}
