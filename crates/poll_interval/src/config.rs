// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::constants::DEFAULT_START_DURATION;
use crate::{IntervalFn, IterativePollInterval, PollDuration, Result};

/// The data half of an [`IterativePollInterval`], suitable for loading from configuration.
///
/// Functions cannot be deserialized, so the interval function is supplied when the configuration
/// is [built][IterativeConfig::build]. An unset start duration falls back to
/// [`DEFAULT_START_DURATION`][crate::DEFAULT_START_DURATION].
///
/// # Examples
///
/// ```
/// use poll_interval::{IntervalFn, IterativeConfig, PollDuration, PollInterval};
///
/// let config: IterativeConfig = serde_json::from_str(r#"{ "start_duration": "250ms" }"#)?;
/// let interval = config.build(IntervalFn::new(|d: PollDuration| d * 2))?;
///
/// assert_eq!(interval.next(1, None), PollDuration::from_millis(500));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct IterativeConfig {
    /// The duration the interval function is applied to before the first attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_duration: Option<PollDuration>,
}

impl IterativeConfig {
    /// Creates a configuration with the given start duration.
    #[must_use]
    pub fn new(start_duration: impl Into<PollDuration>) -> Self {
        Self {
            start_duration: Some(start_duration.into()),
        }
    }

    /// Builds an [`IterativePollInterval`] that applies `function` to this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`][crate::Error::InvalidConfiguration] if the start
    /// duration is forever.
    pub fn build(&self, function: IntervalFn) -> Result<IterativePollInterval> {
        IterativePollInterval::from_parts(Some(function), Some(self.start_duration.unwrap_or(DEFAULT_START_DURATION)))
    }
}

impl From<&IterativePollInterval> for IterativeConfig {
    fn from(interval: &IterativePollInterval) -> Self {
        Self::new(interval.start_duration())
    }
}
