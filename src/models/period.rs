//! Analysis period representation
//!
//! A period is a canonical identifier plus a half-open date interval
//! `[start, end)`. Supported granularities: day, ISO week, month, quarter,
//! year, and caller-supplied custom ranges.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CashplanError, CashplanResult};

/// Period granularity for budget analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    /// Explicit caller-supplied range; never derived from an anchor date
    Custom,
}

impl FromStr for Granularity {
    type Err = CashplanError;

    fn from_str(s: &str) -> CashplanResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            "custom" => Ok(Self::Custom),
            other => Err(CashplanError::Configuration(format!(
                "unsupported period granularity '{other}' (expected day, week, month, quarter, year or custom)"
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::Custom => "custom",
        };
        write!(f, "{s}")
    }
}

/// A canonical analysis period with half-open bounds `[start, end)`
///
/// Two periods are equal iff their canonical keys match. The `Display` key is
/// ISO-like and sorts lexicographically by start date within a granularity,
/// so period sequences can be ordered without re-parsing dates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// Single day (e.g., "2024-01-15")
    Day { date: NaiveDate },

    /// ISO week, starting Monday (e.g., "2024-W03")
    Week { year: i32, week: u32 },

    /// Calendar month (e.g., "2024-01")
    Month { year: i32, month: u32 },

    /// Calendar quarter (e.g., "2024-Q1")
    Quarter { year: i32, quarter: u32 },

    /// Calendar year (e.g., "2024")
    Year { year: i32 },

    /// Explicit half-open range (e.g., "2024-01-01..2024-01-15")
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Resolve the period containing `anchor` for the given granularity
    ///
    /// For `Granularity::Custom` the caller must supply the explicit
    /// `[start, end)` range; there is no derivation from the anchor.
    pub fn resolve(
        anchor: NaiveDate,
        granularity: Granularity,
        custom_range: Option<(NaiveDate, NaiveDate)>,
    ) -> CashplanResult<Self> {
        match granularity {
            Granularity::Day => Ok(Self::Day { date: anchor }),
            Granularity::Week => Ok(Self::Week {
                year: anchor.iso_week().year(),
                week: anchor.iso_week().week(),
            }),
            Granularity::Month => Ok(Self::Month {
                year: anchor.year(),
                month: anchor.month(),
            }),
            Granularity::Quarter => Ok(Self::Quarter {
                year: anchor.year(),
                quarter: (anchor.month() - 1) / 3 + 1,
            }),
            Granularity::Year => Ok(Self::Year { year: anchor.year() }),
            Granularity::Custom => {
                let (start, end) = custom_range.ok_or_else(|| {
                    CashplanError::Configuration(
                        "custom granularity requires an explicit start..end range".into(),
                    )
                })?;
                if end <= start {
                    return Err(CashplanError::Configuration(format!(
                        "custom period end {end} must be after start {start}"
                    )));
                }
                Ok(Self::Custom { start, end })
            }
        }
    }

    /// Start date (inclusive)
    pub fn start(&self) -> NaiveDate {
        match self {
            Self::Day { date } => *date,
            Self::Week { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon)
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(*year, 1, 1).expect("valid date")),
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1)
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(*year, 1, 1).expect("valid date")),
            Self::Quarter { year, quarter } => {
                let month = (quarter - 1) * 3 + 1;
                NaiveDate::from_ymd_opt(*year, month, 1)
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(*year, 1, 1).expect("valid date"))
            }
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 1, 1).expect("valid date"),
            Self::Custom { start, .. } => *start,
        }
    }

    /// End date (exclusive)
    pub fn end(&self) -> NaiveDate {
        match self {
            Self::Day { date } => *date + Duration::days(1),
            Self::Week { .. } => self.start() + Duration::days(7),
            Self::Month { year, month } => {
                if *month == 12 {
                    NaiveDate::from_ymd_opt(*year + 1, 1, 1).expect("valid date")
                } else {
                    NaiveDate::from_ymd_opt(*year, *month + 1, 1).expect("valid date")
                }
            }
            Self::Quarter { year, quarter } => {
                if *quarter == 4 {
                    NaiveDate::from_ymd_opt(*year + 1, 1, 1).expect("valid date")
                } else {
                    NaiveDate::from_ymd_opt(*year, quarter * 3 + 1, 1).expect("valid date")
                }
            }
            Self::Year { year } => NaiveDate::from_ymd_opt(*year + 1, 1, 1).expect("valid date"),
            Self::Custom { end, .. } => *end,
        }
    }

    /// Check if a date falls within this period (`start <= date < end`)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date < self.end()
    }

    /// Canonical sortable key, same as `Display`
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// The period immediately after this one
    ///
    /// Custom ranges advance by their own length.
    pub fn next(&self) -> Self {
        match self {
            Self::Day { date } => Self::Day {
                date: *date + Duration::days(1),
            },
            Self::Week { year, week } => {
                let max_week = NaiveDate::from_ymd_opt(*year, 12, 28)
                    .expect("valid date")
                    .iso_week()
                    .week();
                if *week >= max_week {
                    Self::Week {
                        year: *year + 1,
                        week: 1,
                    }
                } else {
                    Self::Week {
                        year: *year,
                        week: *week + 1,
                    }
                }
            }
            Self::Month { year, month } => {
                if *month == 12 {
                    Self::Month {
                        year: *year + 1,
                        month: 1,
                    }
                } else {
                    Self::Month {
                        year: *year,
                        month: *month + 1,
                    }
                }
            }
            Self::Quarter { year, quarter } => {
                if *quarter == 4 {
                    Self::Quarter {
                        year: *year + 1,
                        quarter: 1,
                    }
                } else {
                    Self::Quarter {
                        year: *year,
                        quarter: *quarter + 1,
                    }
                }
            }
            Self::Year { year } => Self::Year { year: *year + 1 },
            Self::Custom { start, end } => {
                let length = *end - *start;
                Self::Custom {
                    start: *end,
                    end: *end + length,
                }
            }
        }
    }

    /// The period immediately before this one
    pub fn prev(&self) -> Self {
        match self {
            Self::Day { date } => Self::Day {
                date: *date - Duration::days(1),
            },
            Self::Week { year, week } => {
                if *week == 1 {
                    let prev_year = *year - 1;
                    let max_week = NaiveDate::from_ymd_opt(prev_year, 12, 28)
                        .expect("valid date")
                        .iso_week()
                        .week();
                    Self::Week {
                        year: prev_year,
                        week: max_week,
                    }
                } else {
                    Self::Week {
                        year: *year,
                        week: *week - 1,
                    }
                }
            }
            Self::Month { year, month } => {
                if *month == 1 {
                    Self::Month {
                        year: *year - 1,
                        month: 12,
                    }
                } else {
                    Self::Month {
                        year: *year,
                        month: *month - 1,
                    }
                }
            }
            Self::Quarter { year, quarter } => {
                if *quarter == 1 {
                    Self::Quarter {
                        year: *year - 1,
                        quarter: 4,
                    }
                } else {
                    Self::Quarter {
                        year: *year,
                        quarter: *quarter - 1,
                    }
                }
            }
            Self::Year { year } => Self::Year { year: *year - 1 },
            Self::Custom { start, end } => {
                let length = *end - *start;
                Self::Custom {
                    start: *start - length,
                    end: *start,
                }
            }
        }
    }

    /// Parse a period label
    ///
    /// Formats:
    /// - Day: "2024-01-15"
    /// - Week: "2024-W03"
    /// - Month: "2024-01"
    /// - Quarter: "2024-Q1"
    /// - Year: "2024"
    /// - Custom: "2024-01-01..2024-01-15"
    pub fn parse(s: &str) -> CashplanResult<Self> {
        let s = s.trim();
        let invalid =
            || CashplanError::Configuration(format!("invalid period label '{s}'"));

        if let Some((start_str, end_str)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start_str, "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(end_str, "%Y-%m-%d").map_err(|_| invalid())?;
            return Self::resolve(start, Granularity::Custom, Some((start, end)));
        }

        if let Some((year_str, week_str)) = s.split_once("-W") {
            let year: i32 = year_str.parse().map_err(|_| invalid())?;
            let week: u32 = week_str.parse().map_err(|_| invalid())?;
            if week == 0 || week > 53 {
                return Err(invalid());
            }
            return Ok(Self::Week { year, week });
        }

        if let Some((year_str, quarter_str)) = s.split_once("-Q") {
            let year: i32 = year_str.parse().map_err(|_| invalid())?;
            let quarter: u32 = quarter_str.parse().map_err(|_| invalid())?;
            if !(1..=4).contains(&quarter) {
                return Err(invalid());
            }
            return Ok(Self::Quarter { year, quarter });
        }

        let parts: Vec<&str> = s.split('-').collect();
        match parts.len() {
            1 => {
                let year: i32 = parts[0].parse().map_err(|_| invalid())?;
                Ok(Self::Year { year })
            }
            2 => {
                let year: i32 = parts[0].parse().map_err(|_| invalid())?;
                let month: u32 = parts[1].parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(Self::Month { year, month })
            }
            3 => {
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
                Ok(Self::Day { date })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day { date } => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Week { year, week } => write!(f, "{:04}-W{:02}", year, week),
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Quarter { year, quarter } => write!(f, "{:04}-Q{}", year, quarter),
            Self::Year { year } => write!(f, "{:04}", year),
            Self::Custom { start, end } => write!(
                f,
                "{}..{}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start()
            .cmp(&other.start())
            .then_with(|| self.end().cmp(&other.end()))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
