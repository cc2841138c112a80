//! Calendar helpers. Every date is a UTC calendar day, so day arithmetic
//! never crosses a DST boundary.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{GanttError, GanttResult};

/// Wire format for dates in task and event records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> GanttResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| GanttError::InvalidDateFormat {
        input: s.to_string(),
    })
}

/// Whole days from `a` to `b` (`b - a`).
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// ISO-8601 week number (1–53).
pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// The Monday of `date`'s week.
pub fn align_to_week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The Sunday of `date`'s week.
pub fn align_to_week_end(date: NaiveDate) -> NaiveDate {
    date + Duration::days(6 - date.weekday().num_days_from_monday() as i64)
}

/// Serde helper for `NaiveDate` fields written as `YYYY-MM-DD`.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(super::DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde helper for optional dates; `null` and a missing key both map to `None`.
pub mod iso_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_some(&d.format(super::DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse_date(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use proptest::prelude::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).expect("valid date")
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_date("2024-13-40").unwrap_err();
        assert!(matches!(err, GanttError::InvalidDateFormat { ref input } if input == "2024-13-40"));
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn diff_days_counts_whole_days() {
        assert_eq!(diff_days(d("2024-01-01"), d("2024-01-05")), 4);
        assert_eq!(diff_days(d("2024-03-01"), d("2024-02-28")), -2);
        // Crosses the EU DST switch without drifting.
        assert_eq!(diff_days(d("2024-03-30"), d("2024-04-01")), 2);
    }

    #[test]
    fn week_numbers_follow_iso_rule() {
        assert_eq!(week_number(d("2024-01-01")), 1);
        assert_eq!(week_number(d("2023-01-01")), 52);
        assert_eq!(week_number(d("2020-12-31")), 53);
        assert_eq!(week_number(d("2021-01-03")), 53);
        assert_eq!(week_number(d("2021-01-04")), 1);
    }

    #[test]
    fn week_alignment_examples() {
        // 2024-01-03 is a Wednesday.
        assert_eq!(align_to_week_start(d("2024-01-03")), d("2024-01-01"));
        assert_eq!(align_to_week_end(d("2024-01-03")), d("2024-01-07"));
        // Sundays stay in their own week.
        assert_eq!(align_to_week_start(d("2024-01-07")), d("2024-01-01"));
        assert_eq!(align_to_week_end(d("2024-01-07")), d("2024-01-07"));
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        // 1970-01-01 ..= roughly 2100.
        (719_163i32..=766_645).prop_map(|n| {
            NaiveDate::from_num_days_from_ce_opt(n).expect("in chrono's range")
        })
    }

    proptest! {
        #[test]
        fn diff_of_reparsed_date_is_zero(date in any_date()) {
            let text = date.format(DATE_FORMAT).to_string();
            let parsed = parse_date(&text).unwrap();
            prop_assert_eq!(diff_days(parsed, parsed), 0);
            prop_assert_eq!(parsed, date);
        }

        #[test]
        fn diff_days_is_antisymmetric(a in any_date(), b in any_date()) {
            prop_assert_eq!(diff_days(a, b), -diff_days(b, a));
        }

        #[test]
        fn alignment_brackets_the_date(date in any_date()) {
            let start = align_to_week_start(date);
            let end = align_to_week_end(date);
            prop_assert_eq!(start.weekday(), Weekday::Mon);
            prop_assert_eq!(end.weekday(), Weekday::Sun);
            prop_assert!(start <= date && date <= end);
            prop_assert_eq!(diff_days(start, end), 6);
        }
    }
}
