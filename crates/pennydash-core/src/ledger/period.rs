use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::ledger::date::{previous_month, shift_months, shift_years};
use crate::ledger::types::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodKind {
    ThisMonth,
    LastMonth,
    #[serde(rename = "last-3-months")]
    Last3Months,
    LastYear,
    #[default]
    All,
}

impl PeriodKind {
    pub const ALL_KINDS: [PeriodKind; 5] = [
        Self::ThisMonth,
        Self::LastMonth,
        Self::Last3Months,
        Self::LastYear,
        Self::All,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::Last3Months => "last-3-months",
            Self::LastYear => "last-year",
            Self::All => "all",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ThisMonth => "This month",
            Self::LastMonth => "Last month",
            Self::Last3Months => "Last 3 months",
            Self::LastYear => "Last year",
            Self::All => "All time",
        }
    }

    /// Parses a selector key. Unrecognized keys select [`PeriodKind::All`].
    pub fn from_key(key: &str) -> Self {
        Self::parse_known(key).unwrap_or(Self::All)
    }

    /// Like [`PeriodKind::from_key`] but reports unknown keys.
    pub fn parse_known(key: &str) -> Option<Self> {
        let normalized = key.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "this-month" | "thismonth" => Some(Self::ThisMonth),
            "last-month" | "lastmonth" => Some(Self::LastMonth),
            "last-3-months" | "last3months" | "last-three-months" => Some(Self::Last3Months),
            "last-year" | "lastyear" => Some(Self::LastYear),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Whether a dated transaction falls inside the window ending at `today`.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            Self::LastMonth => (date.year(), date.month()) == previous_month(today),
            Self::Last3Months => shift_months(today, -3).is_some_and(|start| date >= start),
            Self::LastYear => shift_years(today, -1).is_some_and(|start| date >= start),
            Self::All => true,
        }
    }
}

/// Returns the transactions inside `period`, evaluated against the clock at
/// call time, in their original order. Undated transactions only pass
/// through [`PeriodKind::All`].
pub fn filter_by_period(
    transactions: &[Transaction],
    period: PeriodKind,
    clock: &dyn Clock,
) -> Vec<Transaction> {
    if period == PeriodKind::All {
        return transactions.to_vec();
    }

    let today = clock.today();
    transactions
        .iter()
        .filter(|transaction| {
            transaction
                .date
                .is_some_and(|date| period.contains(date, today))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::clock::FixedClock;
    use crate::ledger::types::TransactionKind;
    use crate::ledger::types::fixtures::{txn, ymd};

    use super::{PeriodKind, filter_by_period};

    fn ids_for(period: PeriodKind, today: (i32, u32, u32), dates: &[Option<(i32, u32, u32)>]) -> Vec<String> {
        let transactions = dates
            .iter()
            .enumerate()
            .map(|(index, date)| {
                txn(
                    index as i64,
                    TransactionKind::Expense,
                    1.0,
                    date.and_then(|(y, m, d)| ymd(y, m, d)),
                    None,
                )
            })
            .collect::<Vec<_>>();

        let Some(now) = ymd(today.0, today.1, today.2) else {
            return Vec::new();
        };
        filter_by_period(&transactions, period, &FixedClock::at_date(now))
            .iter()
            .map(|transaction| transaction.id.to_string())
            .collect()
    }

    #[test]
    fn this_month_matches_month_and_year() {
        let ids = ids_for(
            PeriodKind::ThisMonth,
            (2024, 6, 15),
            &[Some((2024, 6, 1)), Some((2023, 6, 15)), Some((2024, 6, 30)), Some((2024, 5, 31))],
        );
        assert_eq!(ids, vec!["0", "2"]);
    }

    #[test]
    fn last_month_rolls_back_year_in_january() {
        let ids = ids_for(
            PeriodKind::LastMonth,
            (2025, 1, 10),
            &[Some((2024, 12, 31)), Some((2025, 12, 5)), Some((2024, 11, 30)), Some((2025, 1, 2))],
        );
        assert_eq!(ids, vec!["0"]);
    }

    #[test]
    fn last_three_months_uses_inclusive_lower_bound() {
        let ids = ids_for(
            PeriodKind::Last3Months,
            (2024, 6, 15),
            &[Some((2024, 3, 14)), Some((2024, 3, 15)), Some((2024, 6, 20)), Some((2023, 12, 1))],
        );
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn last_three_months_spills_month_end_start() {
        // May 31 minus three months spills to March 3 in 2025.
        let ids = ids_for(
            PeriodKind::Last3Months,
            (2025, 5, 31),
            &[Some((2025, 3, 2)), Some((2025, 3, 3)), Some((2025, 2, 28))],
        );
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn last_year_starts_one_year_back() {
        let ids = ids_for(
            PeriodKind::LastYear,
            (2024, 6, 15),
            &[Some((2023, 6, 14)), Some((2023, 6, 15)), Some((2024, 1, 1))],
        );
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn all_passes_everything_including_undated_rows() {
        let ids = ids_for(PeriodKind::All, (2024, 6, 15), &[None, Some((1999, 1, 1))]);
        assert_eq!(ids, vec!["0", "1"]);
    }

    #[test]
    fn windowed_periods_skip_undated_rows() {
        for period in [
            PeriodKind::ThisMonth,
            PeriodKind::LastMonth,
            PeriodKind::Last3Months,
            PeriodKind::LastYear,
        ] {
            let ids = ids_for(period, (2024, 6, 15), &[None, Some((2024, 6, 1))]);
            assert!(!ids.contains(&"0".to_string()), "{period:?} kept an undated row");
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(ids_for(PeriodKind::ThisMonth, (2024, 6, 15), &[]).is_empty());
    }

    #[test]
    fn unknown_keys_select_all() {
        assert_eq!(PeriodKind::from_key("fortnight"), PeriodKind::All);
        assert_eq!(PeriodKind::parse_known("fortnight"), None);
        assert_eq!(PeriodKind::from_key("thisMonth"), PeriodKind::ThisMonth);
        assert_eq!(PeriodKind::from_key("last_3_months"), PeriodKind::Last3Months);
        for kind in PeriodKind::ALL_KINDS {
            assert_eq!(PeriodKind::from_key(kind.as_str()), kind);
        }
    }
}
