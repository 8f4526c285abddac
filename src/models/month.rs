use chrono::{Datelike, Local, NaiveDate};

/// Calendar month identifying a ledger. Displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// The month containing "now" in local time.
    pub(crate) fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub(crate) fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Accepts `YYYY-MM` (and `YYYY-M`).
    pub(crate) fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .ok()
            .map(Self::containing)
    }

    /// The month immediately before this one. Works on (year, month) only, so
    /// there is no day-of-month overflow to worry about.
    pub(crate) fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub(crate) fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Human label, e.g. "October 2026".
    pub(crate) fn label(self) -> String {
        self.first_day()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
