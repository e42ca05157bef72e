//! Priority levels for todo items

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PriorityError {
    #[error("Unknown priority '{0}': expected none, low, medium, high, critical or 0-4")]
    Unknown(String),
}

/// Priority of an item, in ascending order of urgency
///
/// The numeric value follows the natural order, but "sorted by priority"
/// queries use [`Priority::sort_order`], which puts `Critical` first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Priority {
    /// Every priority in ascending numeric order
    pub const ALL: [Priority; 5] = [
        Priority::None,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// Returns the numeric value (0-4)
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns a human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::None => "No Priority",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Label for a raw numeric value, `"Unknown"` when out of range
    pub fn display_name_of(raw: u8) -> &'static str {
        Priority::try_from(raw)
            .map(|p| p.display_name())
            .unwrap_or("Unknown")
    }

    /// Returns true for `High` and `Critical`
    pub fn is_urgent(&self) -> bool {
        *self >= Priority::High
    }

    /// Sort weight: `Critical` is 0, `None` is 4
    pub fn sort_order(&self) -> u8 {
        Priority::Critical.value() - self.value()
    }

    /// Lowercase keyword used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = PriorityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Priority::ALL
            .into_iter()
            .find(|p| p.value() == value)
            .ok_or_else(|| PriorityError::Unknown(value.to_string()))
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(raw) = s.parse::<u8>() {
            return Priority::try_from(raw);
        }
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PriorityError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Priority::None.display_name(), "No Priority");
        assert_eq!(Priority::Low.display_name(), "Low");
        assert_eq!(Priority::Medium.display_name(), "Medium");
        assert_eq!(Priority::High.display_name(), "High");
        assert_eq!(Priority::Critical.display_name(), "Critical");
    }

    #[test]
    fn out_of_range_is_unknown() {
        assert_eq!(Priority::display_name_of(2), "Medium");
        assert_eq!(Priority::display_name_of(5), "Unknown");
        assert_eq!(Priority::display_name_of(255), "Unknown");
    }

    #[test]
    fn urgency() {
        assert!(!Priority::None.is_urgent());
        assert!(!Priority::Low.is_urgent());
        assert!(!Priority::Medium.is_urgent());
        assert!(Priority::High.is_urgent());
        assert!(Priority::Critical.is_urgent());
    }

    #[test]
    fn sort_order_puts_critical_first() {
        assert_eq!(Priority::Critical.sort_order(), 0);
        assert_eq!(Priority::High.sort_order(), 1);
        assert_eq!(Priority::Medium.sort_order(), 2);
        assert_eq!(Priority::Low.sort_order(), 3);
        assert_eq!(Priority::None.sort_order(), 4);

        let mut all = Priority::ALL.to_vec();
        all.sort_by_key(|p| p.sort_order());
        assert_eq!(
            all,
            vec![
                Priority::Critical,
                Priority::High,
                Priority::Medium,
                Priority::Low,
                Priority::None
            ]
        );
    }

    #[test]
    fn parse_keywords_and_numbers() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("CRITICAL".parse::<Priority>().unwrap(), Priority::Critical);
        assert_eq!("0".parse::<Priority>().unwrap(), Priority::None);
        assert_eq!("3".parse::<Priority>().unwrap(), Priority::High);
        assert!("7".parse::<Priority>().is_err());
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Priority::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
