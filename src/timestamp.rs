//! Cue timestamp arithmetic.

/// The fields of a `[[HH:]MM:]SS[.mmm]` timestamp. Missing or unreadable
/// fields are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimestampParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub milliseconds: u64,
}

impl TimestampParts {
    /// Split a timestamp into its fields, reading the rightmost `:` component
    /// as seconds, then minutes, then hours.
    pub fn deconstruct(timestamp: &str) -> Self {
        let mut dot_split = timestamp.split('.');
        let time_part = dot_split.next().unwrap_or_default();
        let milliseconds = dot_split.next().and_then(leading_int).unwrap_or(0);

        let mut fields = time_part.split(':').rev();
        let seconds = fields.next().and_then(leading_int).unwrap_or(0);
        let minutes = fields.next().and_then(leading_int).unwrap_or(0);
        let hours = fields.next().and_then(leading_int).unwrap_or(0);

        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Whole seconds. The sub-second part is truncated, not rounded.
    /// `None` if the fields do not fit in a `u64` count of seconds.
    pub fn total_seconds(&self) -> Option<f64> {
        let whole = self
            .hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)?;
        Some((whole as f64 + self.milliseconds as f64 / 1000.0).trunc())
    }
}

/// Convert a cue timestamp to seconds.
pub fn seconds_from_timestamp(timestamp: &str) -> Option<f64> {
    TimestampParts::deconstruct(timestamp).total_seconds()
}

/// Integer value of the leading digits, ignoring leading whitespace and any
/// trailing garbage. `None` if there are no digits.
fn leading_int(field: &str) -> Option<u64> {
    let field = field.trim_start();
    let end = field
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(field.len());
    field[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_timestamp_truncates() {
        assert_eq!(seconds_from_timestamp("01:02:03.456"), Some(3723.0));
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(seconds_from_timestamp("02:03.000"), Some(123.0));
    }

    #[test]
    fn test_seconds_only_loses_fraction() {
        assert_eq!(seconds_from_timestamp("59.999"), Some(59.0));
    }

    #[test]
    fn test_zero() {
        assert_eq!(seconds_from_timestamp("00:00:00"), Some(0.0));
        assert_eq!(seconds_from_timestamp(""), Some(0.0));
    }

    #[test]
    fn test_fraction_never_carries_into_next_second() {
        // 4.999 and 4.001 both land on 4, which is what makes adjacent cues
        // with sub-second boundaries overlap.
        assert_eq!(seconds_from_timestamp("00:04.999"), Some(4.0));
        assert_eq!(seconds_from_timestamp("00:04.001"), Some(4.0));
    }

    #[test]
    fn test_deconstruct_fields() {
        let parts = TimestampParts::deconstruct("10:20:30.400");
        assert_eq!(
            parts,
            TimestampParts {
                hours: 10,
                minutes: 20,
                seconds: 30,
                milliseconds: 400
            }
        );
    }

    #[test]
    fn test_unreadable_fields_default_to_zero() {
        let parts = TimestampParts::deconstruct("xx:05.abc");
        assert_eq!(parts.minutes, 0);
        assert_eq!(parts.seconds, 5);
        assert_eq!(parts.milliseconds, 0);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int(" 42abc"), Some(42));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn test_long_hours() {
        assert_eq!(seconds_from_timestamp("100:00:01.000"), Some(360001.0));
    }

    #[test]
    fn test_huge_hours_do_not_overflow() {
        assert_eq!(seconds_from_timestamp("99999999999999999:00:00.000"), None);
        assert_eq!(
            TimestampParts {
                hours: u64::MAX / 3600,
                minutes: 60,
                ..Default::default()
            }
            .total_seconds(),
            None
        );
    }
}
