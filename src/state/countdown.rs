//! Pending shutdown countdown announced by the server

use serde::{Deserialize, Serialize};

/// Remaining time before the server powers the printer down.
///
/// Always strictly positive; a non-positive value from the server means
/// there is no countdown at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_seconds: u64,
}

impl Countdown {
    /// Build a countdown from a raw `timeout_value`, `None` when it is not positive
    pub fn from_seconds(timeout_value: i64) -> Option<Self> {
        u64::try_from(timeout_value)
            .ok()
            .filter(|&secs| secs > 0)
            .map(|remaining_seconds| Self { remaining_seconds })
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Human readable remaining time: whole minutes (rounded up) above one
    /// minute, seconds otherwise.
    pub fn remaining_text(&self) -> String {
        if self.remaining_seconds > 60 {
            format!("{} minutes", self.remaining_seconds.div_ceil(60))
        } else {
            format!("{} seconds", self.remaining_seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(secs: i64) -> String {
        Countdown::from_seconds(secs).unwrap().remaining_text()
    }

    #[test]
    fn formats_seconds_up_to_one_minute() {
        assert_eq!(text(1), "1 seconds");
        assert_eq!(text(45), "45 seconds");
        assert_eq!(text(60), "60 seconds");
    }

    #[test]
    fn rounds_minutes_up() {
        assert_eq!(text(61), "2 minutes");
        assert_eq!(text(120), "2 minutes");
        assert_eq!(text(121), "3 minutes");
        assert_eq!(text(299), "5 minutes");
    }

    #[test]
    fn non_positive_is_no_countdown() {
        assert_eq!(Countdown::from_seconds(0), None);
        assert_eq!(Countdown::from_seconds(-5), None);
    }
}
