// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Mul};
use std::str::FromStr;
use std::time::Duration;

use jiff::SignedDuration;
use jiff::fmt::friendly;

use crate::Error;

static FRIENDLY_PRINTER: friendly::SpanPrinter = friendly::SpanPrinter::new();

const FOREVER_TEXT: &str = "forever";

/// A span of time between two polling attempts, or the unbounded [`FOREVER`][Self::FOREVER] value.
///
/// Unlike [`Duration`], `PollDuration` can express "no time limit". Forever compares greater than
/// every finite duration and absorbs it in arithmetic, so a transformation such as
/// `|d| d.multiply(2)` can be applied to any value without special cases.
///
/// # Formatting and parsing
///
/// Finite durations are displayed in a compact human readable form such as `100ms` or `1s 500ms`,
/// and forever is displayed as `forever`. Parsing accepts the same forms as well as ISO 8601
/// durations such as `PT0.5S`. Negative durations are rejected.
///
/// ```
/// use poll_interval::PollDuration;
///
/// let duration: PollDuration = "1s 500ms".parse()?;
/// assert_eq!(duration, PollDuration::from_millis(1500));
/// assert_eq!(duration.to_string(), "1s 500ms");
///
/// let forever: PollDuration = "forever".parse()?;
/// assert!(forever.is_forever());
///
/// # Ok::<(), poll_interval::Error>(())
/// ```
///
/// # Serialization and deserialization
///
/// With the `serde` feature enabled, `PollDuration` serializes as its display string and
/// deserializes from any string accepted by [`FromStr`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PollDuration(Span);

// Variant order matters: the derived `Ord` places every finite value before forever.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Span {
    Finite(Duration),
    Forever,
}

impl PollDuration {
    /// A duration of no length.
    pub const ZERO: Self = Self::from_duration(Duration::ZERO);

    /// One millisecond.
    pub const ONE_MILLISECOND: Self = Self::from_millis(1);

    /// One hundred milliseconds.
    pub const ONE_HUNDRED_MILLISECONDS: Self = Self::from_millis(100);

    /// Two hundred milliseconds.
    pub const TWO_HUNDRED_MILLISECONDS: Self = Self::from_millis(200);

    /// Five hundred milliseconds.
    pub const FIVE_HUNDRED_MILLISECONDS: Self = Self::from_millis(500);

    /// One second.
    pub const ONE_SECOND: Self = Self::from_secs(1);

    /// Five seconds.
    pub const FIVE_SECONDS: Self = Self::from_secs(5);

    /// Ten seconds.
    pub const TEN_SECONDS: Self = Self::from_secs(10);

    /// One minute.
    pub const ONE_MINUTE: Self = Self::from_secs(60);

    /// The unbounded duration. Greater than any finite duration.
    pub const FOREVER: Self = Self(Span::Forever);

    /// Creates a finite duration from a [`Duration`].
    #[must_use]
    pub const fn from_duration(duration: Duration) -> Self {
        Self(Span::Finite(duration))
    }

    /// Creates a finite duration from whole milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self::from_duration(Duration::from_millis(millis))
    }

    /// Creates a finite duration from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self::from_duration(Duration::from_secs(secs))
    }

    /// Returns `true` if this is [`FOREVER`][Self::FOREVER].
    #[must_use]
    pub fn is_forever(self) -> bool {
        matches!(self.0, Span::Forever)
    }

    /// Returns `true` if this is a finite duration of no length.
    #[must_use]
    pub fn is_zero(self) -> bool {
        matches!(self.0, Span::Finite(d) if d.is_zero())
    }

    /// Returns the finite length of this duration, or `None` for forever.
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use poll_interval::PollDuration;
    ///
    /// assert_eq!(PollDuration::ONE_SECOND.as_duration(), Some(Duration::from_secs(1)));
    /// assert_eq!(PollDuration::FOREVER.as_duration(), None);
    /// ```
    #[must_use]
    pub fn as_duration(self) -> Option<Duration> {
        match self.0 {
            Span::Finite(d) => Some(d),
            Span::Forever => None,
        }
    }

    /// Multiplies the duration by `factor`, saturating at [`Duration::MAX`].
    ///
    /// Forever stays forever.
    ///
    /// ```
    /// use poll_interval::PollDuration;
    ///
    /// assert_eq!(PollDuration::from_millis(500).multiply(2), PollDuration::ONE_SECOND);
    /// assert_eq!(PollDuration::FOREVER.multiply(0), PollDuration::FOREVER);
    /// ```
    #[must_use]
    pub fn multiply(self, factor: u32) -> Self {
        match self.0 {
            Span::Finite(d) => Self::from_duration(d.saturating_mul(factor)),
            Span::Forever => Self::FOREVER,
        }
    }

    /// Divides the duration by `divisor`.
    ///
    /// Dividing by zero, or dividing forever by anything, yields forever.
    #[must_use]
    pub fn divide(self, divisor: u32) -> Self {
        match self.0 {
            Span::Finite(d) => d.checked_div(divisor).map_or(Self::FOREVER, Self::from_duration),
            Span::Forever => Self::FOREVER,
        }
    }

    /// Adds two durations, saturating at [`Duration::MAX`]. Forever absorbs any operand.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        match (self.0, other.0) {
            (Span::Finite(a), Span::Finite(b)) => Self::from_duration(a.saturating_add(b)),
            _ => Self::FOREVER,
        }
    }

    /// Subtracts `other` from this duration, flooring at zero.
    ///
    /// Forever minus anything is forever; a finite duration minus forever is zero.
    #[must_use]
    pub fn minus(self, other: Self) -> Self {
        match (self.0, other.0) {
            (Span::Forever, _) => Self::FOREVER,
            (Span::Finite(_), Span::Forever) => Self::ZERO,
            (Span::Finite(a), Span::Finite(b)) => Self::from_duration(a.saturating_sub(b)),
        }
    }
}

impl Default for PollDuration {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Duration> for PollDuration {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}

impl Mul<u32> for PollDuration {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Add for PollDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.plus(rhs)
    }
}

impl Display for PollDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let duration = match self.0 {
            Span::Finite(d) => d,
            Span::Forever => return f.write_str(FOREVER_TEXT),
        };

        // Durations beyond the signed range cannot be printed by jiff. They are printed as
        // `<secs>.<nanos>s`, which `from_str` accepts back.
        match SignedDuration::try_from(duration) {
            Ok(signed) => FRIENDLY_PRINTER
                .print_duration(&signed, jiff::fmt::StdFmtWrite(f))
                .map_err(|_| fmt::Error),
            Err(_) => write!(f, "{duration:?}"),
        }
    }
}

impl FromStr for PollDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(FOREVER_TEXT) {
            return Ok(Self::FOREVER);
        }

        let signed = match trimmed.parse::<SignedDuration>() {
            Ok(signed) => signed,
            Err(e) => {
                return parse_unsigned_seconds(trimmed)
                    .map(Self::from_duration)
                    .ok_or_else(|| Error::invalid_duration(s, e));
            }
        };
        if signed.is_negative() {
            return Err(Error::invalid_duration(s, "negative durations are not supported"));
        }

        Duration::try_from(signed)
            .map(Self::from_duration)
            .map_err(|e| Error::invalid_duration(s, e))
    }
}

/// Parses the `<secs>[.<nanos>]s` form that `Display` falls back to for durations beyond the
/// signed range.
fn parse_unsigned_seconds(text: &str) -> Option<Duration> {
    let number = text.strip_suffix('s')?;
    let (secs, fraction) = number.split_once('.').unwrap_or((number, ""));

    if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let secs = secs.parse::<u64>().ok()?;
    let nanos = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<9}").parse::<u32>().ok()?
    };

    Some(Duration::new(secs, nanos))
}

#[cfg(any(feature = "serde", test))]
impl serde::Serialize for PollDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(any(feature = "serde", test))]
impl<'de> serde::Deserialize<'de> for PollDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <String as serde::Deserialize>::deserialize(deserializer)?
            .parse::<Self>()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn assert_types() {
        static_assertions::assert_impl_all!(PollDuration: Send, Sync, Copy, Ord, std::hash::Hash);
    }

    #[test]
    fn constants() {
        assert_eq!(PollDuration::ZERO.as_duration(), Some(Duration::ZERO));
        assert_eq!(PollDuration::ONE_HUNDRED_MILLISECONDS.as_duration(), Some(Duration::from_millis(100)));
        assert_eq!(PollDuration::ONE_MINUTE.as_duration(), Some(Duration::from_secs(60)));
        assert_eq!(PollDuration::default(), PollDuration::ZERO);
        assert!(PollDuration::ZERO.is_zero());
        assert!(!PollDuration::FOREVER.is_zero());
        assert!(PollDuration::FOREVER.is_forever());
        assert!(!PollDuration::ONE_SECOND.is_forever());
    }

    #[test]
    fn forever_is_greatest() {
        assert!(PollDuration::FOREVER > PollDuration::from_duration(Duration::MAX));
        assert!(PollDuration::ZERO < PollDuration::ONE_MILLISECOND);
        assert_eq!(PollDuration::FOREVER.max(PollDuration::ONE_SECOND), PollDuration::FOREVER);
    }

    #[test]
    fn multiply_saturates() {
        assert_eq!(PollDuration::from_millis(250) * 4, PollDuration::ONE_SECOND);
        assert_eq!(
            PollDuration::from_duration(Duration::MAX).multiply(2),
            PollDuration::from_duration(Duration::MAX)
        );
        assert_eq!(PollDuration::FOREVER.multiply(3), PollDuration::FOREVER);
    }

    #[test]
    fn divide_ok() {
        assert_eq!(PollDuration::ONE_SECOND.divide(4), PollDuration::from_millis(250));
        assert_eq!(PollDuration::ONE_SECOND.divide(0), PollDuration::FOREVER);
        assert_eq!(PollDuration::FOREVER.divide(2), PollDuration::FOREVER);
    }

    #[test]
    fn plus_and_minus() {
        assert_eq!(
            PollDuration::ONE_SECOND + PollDuration::FIVE_HUNDRED_MILLISECONDS,
            PollDuration::from_millis(1500)
        );
        assert_eq!(PollDuration::ONE_SECOND.plus(PollDuration::FOREVER), PollDuration::FOREVER);
        assert_eq!(PollDuration::ONE_SECOND.minus(PollDuration::FIVE_SECONDS), PollDuration::ZERO);
        assert_eq!(PollDuration::FIVE_SECONDS.minus(PollDuration::ONE_SECOND), PollDuration::from_secs(4));
        assert_eq!(PollDuration::FOREVER.minus(PollDuration::FOREVER), PollDuration::FOREVER);
        assert_eq!(PollDuration::ONE_SECOND.minus(PollDuration::FOREVER), PollDuration::ZERO);
    }

    #[rstest]
    #[case(PollDuration::ZERO, "0s")]
    #[case(PollDuration::ONE_HUNDRED_MILLISECONDS, "100ms")]
    #[case(PollDuration::from_millis(1500), "1s 500ms")]
    #[case(PollDuration::ONE_MINUTE, "1m")]
    #[case(PollDuration::FOREVER, "forever")]
    fn display(#[case] duration: PollDuration, #[case] expected: &str) {
        assert_eq!(duration.to_string(), expected);
    }

    #[test]
    fn display_beyond_signed_range() {
        let duration = PollDuration::from_duration(Duration::MAX);

        assert_eq!(duration.to_string(), "18446744073709551615.999999999s");
    }

    #[rstest]
    #[case("100ms", PollDuration::ONE_HUNDRED_MILLISECONDS)]
    #[case("1s 500ms", PollDuration::from_millis(1500))]
    #[case("2 seconds", PollDuration::from_secs(2))]
    #[case("PT0.5S", PollDuration::FIVE_HUNDRED_MILLISECONDS)]
    #[case("forever", PollDuration::FOREVER)]
    #[case(" FOREVER ", PollDuration::FOREVER)]
    fn parse_ok(#[case] input: &str, #[case] expected: PollDuration) {
        assert_eq!(input.parse::<PollDuration>().unwrap(), expected);
    }

    #[test]
    fn display_propagates_writer_error() {
        struct FailsOnce {
            failed: bool,
            written: String,
        }

        impl fmt::Write for FailsOnce {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                if !self.failed {
                    self.failed = true;
                    return Err(fmt::Error);
                }
                self.written.push_str(s);
                Ok(())
            }
        }

        let mut writer = FailsOnce {
            failed: false,
            written: String::new(),
        };

        fmt::write(&mut writer, format_args!("{}", PollDuration::from_millis(1500))).unwrap_err();
        assert_eq!(writer.written, "");
    }

    #[rstest]
    #[case(Duration::MAX)]
    #[case(Duration::from_secs(i64::MAX.unsigned_abs() + 1))]
    #[case(Duration::new(i64::MAX.unsigned_abs() + 7, 500_000_000))]
    #[case(Duration::from_secs(i64::MAX.unsigned_abs()))]
    fn beyond_signed_range_round_trips(#[case] duration: Duration) {
        let duration = PollDuration::from_duration(duration);

        let text = duration.to_string();
        assert_eq!(text.parse::<PollDuration>().unwrap(), duration, "{text}");

        let serialized = serde_json::to_string(&duration).unwrap();
        let deserialized: PollDuration = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, duration, "{serialized}");
    }

    #[test]
    fn saturated_multiply_round_trips() {
        let saturated = PollDuration::ONE_MINUTE.multiply(u32::MAX).multiply(u32::MAX).multiply(u32::MAX);

        assert_eq!(saturated, PollDuration::from_duration(Duration::MAX));
        assert_eq!(saturated.to_string().parse::<PollDuration>().unwrap(), saturated);
    }

    #[rstest]
    #[case("")]
    #[case("soon")]
    #[case("-5s")]
    #[case("s")]
    #[case("18446744073709551616s")]
    #[case("1.-5s")]
    fn parse_err(#[case] input: &str) {
        let error = input.parse::<PollDuration>().unwrap_err();

        assert!(matches!(error, Error::InvalidDuration { input: ref i, .. } if i == input));
    }

    #[test]
    fn serialize_deserialize() {
        let duration = PollDuration::from_millis(1500);

        let serialized = serde_json::to_string(&duration).unwrap();
        assert_eq!(serialized, "\"1s 500ms\"");

        let deserialized: PollDuration = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, duration);

        let forever: PollDuration = serde_json::from_str("\"forever\"").unwrap();
        assert_eq!(forever, PollDuration::FOREVER);

        serde_json::from_str::<PollDuration>("\"later\"").unwrap_err();
    }
}
