//! Registry of the macro tokens a filename pattern may contain.

use chrono::{DateTime, Days, FixedOffset, Months};

pub const WILDCARD_TOKEN: &str = "{{ * }}";

/// Calendar unit a date macro is expressed in. Ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    /// Steps `anchor` back by exactly one unit, clamping to the end of shorter months.
    pub fn step_back(self, anchor: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            Granularity::Day => anchor.checked_sub_days(Days::new(1)),
            Granularity::Month => anchor.checked_sub_months(Months::new(1)),
            Granularity::Year => anchor.checked_sub_months(Months::new(12)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macro {
    Wildcard,
    MonthName,
    Today,
    Year,
    MonthNumber,
    DayNumber,
}

impl Macro {
    /// Registry order. Also the tie-break order when two tokens share a granularity.
    pub const ALL: [Macro; 6] = [
        Macro::Wildcard,
        Macro::MonthName,
        Macro::Today,
        Macro::Year,
        Macro::MonthNumber,
        Macro::DayNumber,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Macro::Wildcard => WILDCARD_TOKEN,
            Macro::MonthName => "{{ month }}",
            Macro::Today => "{{ today }}",
            Macro::Year => "{{ YYYY }}",
            Macro::MonthNumber => "{{ MM }}",
            Macro::DayNumber => "{{ DD }}",
        }
    }

    pub fn from_token(token: &str) -> Option<Macro> {
        Macro::ALL.into_iter().find(|m| m.token() == token)
    }

    /// `None` for the wildcard, which never takes part in date arithmetic.
    pub fn granularity(self) -> Option<Granularity> {
        match self {
            Macro::Wildcard => None,
            Macro::Year => Some(Granularity::Year),
            Macro::MonthName | Macro::MonthNumber => Some(Granularity::Month),
            Macro::Today | Macro::DayNumber => Some(Granularity::Day),
        }
    }

    /// How far back from now the anchor date moves when this macro is dominant.
    pub fn offset(self) -> Option<Granularity> {
        match self {
            Macro::Today => None,
            other => other.granularity(),
        }
    }

    fn format_str(self) -> Option<&'static str> {
        match self {
            Macro::Wildcard => None,
            Macro::MonthName => Some("%B"),
            Macro::Today => Some("%Y%m%d"),
            Macro::Year => Some("%Y"),
            Macro::MonthNumber => Some("%m"),
            Macro::DayNumber => Some("%d"),
        }
    }

    pub fn format(self, anchor: &DateTime<FixedOffset>) -> Option<String> {
        self.format_str().map(|fmt| anchor.format(fmt).to_string())
    }
}
