//! Calendar months with fixed English names.

use serde::{Serialize, Serializer};

/// A calendar month. Ordering follows the calendar, so `Month::March > Month::February`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from a 1-based number (`1` = January).
    pub fn from_number(number: u32) -> Option<Month> {
        let idx = usize::try_from(number.checked_sub(1)?).ok()?;
        Self::ALL.get(idx).copied()
    }

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Month from its English name, ignoring case. Three-letter abbreviations are accepted.
    pub fn from_name(name: &str) -> Option<Month> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|m| {
            m.name().eq_ignore_ascii_case(name) || m.short_name().eq_ignore_ascii_case(name)
        })
    }

    /// Long English name, e.g. `"February"`.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter label used by the navigator, e.g. `"Feb"`.
    pub fn short_name(self) -> &'static str {
        self.name().get(..3).unwrap_or_default()
    }

    /// Previous month, `None` for January (the navigator does not wrap).
    pub fn prev(self) -> Option<Month> {
        Self::from_number(self.number().checked_sub(1)?)
    }

    /// Next month, `None` for December.
    pub fn next(self) -> Option<Month> {
        Self::from_number(self.number() + 1)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Month::from_name("february"), Some(Month::February));
        assert_eq!(Month::from_name("MARCH"), Some(Month::March));
        assert_eq!(Month::from_name(" Sep "), Some(Month::September));
        assert_eq!(Month::from_name("Smarch"), None);
        assert_eq!(Month::from_name(""), None);
    }

    #[test]
    fn test_numbering_round_trips() {
        for month in Month::ALL {
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_neighbours_do_not_wrap() {
        assert_eq!(Month::January.prev(), None);
        assert_eq!(Month::January.next(), Some(Month::February));
        assert_eq!(Month::December.next(), None);
        assert_eq!(Month::December.prev(), Some(Month::November));
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&Month::July).unwrap();
        assert_eq!(json, "\"July\"");
    }
}
