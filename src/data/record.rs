use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{GlobeError, Result};

/// One day of the cumulative series.
///
/// Serializes as `{"date": "YYYY-MM-DD", "cases": n, "deaths": n}`, the shape
/// the chart widgets read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(rename = "cases")]
    pub cumulative_cases: u64,
    #[serde(rename = "deaths")]
    pub cumulative_deaths: u64,
}

/// Immutable, chronologically ordered daily series.
///
/// Cloning is cheap and shares the underlying buffer, so the globe and any
/// chart consumers read the exact same numbers.
#[derive(Debug, Clone)]
pub struct Timeline {
    records: Arc<[DailyRecord]>,
}

/// Headline numbers for the last day of a timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineSummary {
    pub final_date: NaiveDate,
    pub total_days: usize,
    pub final_cases: u64,
    pub final_deaths: u64,
    pub city_count: usize,
}

impl Timeline {
    /// Build a timeline, checking every series invariant
    pub fn from_records(records: Vec<DailyRecord>) -> Result<Self> {
        validate_records(&records)?;
        Ok(Self::from_validated(records))
    }

    /// Records produced by the generator already satisfy the invariants
    pub(crate) fn from_validated(records: Vec<DailyRecord>) -> Self {
        debug_assert!(validate_records(&records).is_ok());
        Self {
            records: records.into(),
        }
    }

    /// Parse a serialized series (as produced by [`Timeline::to_json`])
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<DailyRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Serialize as an ordered array of `{date, cases, deaths}`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&*self.records)?)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed timeline
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Index of the last record
    pub fn last_index(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    /// Record at `index`, clamped into the valid range
    pub fn clamped(&self, index: i64) -> &DailyRecord {
        let idx = index.clamp(0, self.last_index() as i64) as usize;
        &self.records[idx]
    }

    pub fn start_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last(&self) -> &DailyRecord {
        &self.records[self.last_index()]
    }

    /// True when both handles point at the same frozen buffer
    pub fn shares_buffer(&self, other: &Timeline) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    pub fn summary(&self, city_count: usize) -> TimelineSummary {
        let last = self.last();
        TimelineSummary {
            final_date: last.date,
            total_days: self.len(),
            final_cases: last.cumulative_cases,
            final_deaths: last.cumulative_deaths,
            city_count,
        }
    }
}

fn validate_records(records: &[DailyRecord]) -> Result<()> {
    let first = records
        .first()
        .ok_or_else(|| GlobeError::MalformedSeries("series is empty".to_string()))?;

    for (i, record) in records.iter().enumerate() {
        let expected = first
            .date
            .checked_add_days(Days::new(i as u64))
            .ok_or(GlobeError::DateOverflow {
                start: first.date,
                length: records.len(),
            })?;
        if record.date != expected {
            return Err(GlobeError::MalformedSeries(format!(
                "day {} is dated {}, expected {}",
                i, record.date, expected
            )));
        }
        if record.cumulative_deaths > record.cumulative_cases {
            return Err(GlobeError::MalformedSeries(format!(
                "day {} has {} deaths but only {} cases",
                i, record.cumulative_deaths, record.cumulative_cases
            )));
        }
        if i > 0 {
            let prev = &records[i - 1];
            if record.cumulative_cases < prev.cumulative_cases
                || record.cumulative_deaths < prev.cumulative_deaths
            {
                return Err(GlobeError::MalformedSeries(format!(
                    "cumulative totals decrease on day {}",
                    i
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    }

    fn record(offset: u64, cases: u64, deaths: u64) -> DailyRecord {
        DailyRecord {
            date: day(offset),
            cumulative_cases: cases,
            cumulative_deaths: deaths,
        }
    }

    #[test]
    fn test_json_shape() {
        let timeline = Timeline::from_records(vec![record(0, 10, 0), record(1, 25, 1)]).unwrap();
        let json = timeline.to_json().unwrap();
        assert_eq!(
            json,
            r#"[{"date":"2020-01-01","cases":10,"deaths":0},{"date":"2020-01-02","cases":25,"deaths":1}]"#
        );
    }

    #[test]
    fn test_parse_serialized_series() {
        let json = r#"[{"date":"2020-01-01","cases":3,"deaths":0},{"date":"2020-01-02","cases":7,"deaths":0}]"#;
        let timeline = Timeline::from_json(json).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.last().cumulative_cases, 7);
    }

    #[test]
    fn test_empty_series_rejected() {
        let result = Timeline::from_json("[]");
        assert!(matches!(result, Err(GlobeError::MalformedSeries(_))));
    }

    #[test]
    fn test_gap_in_dates_rejected() {
        let result = Timeline::from_records(vec![record(0, 1, 0), record(2, 2, 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decreasing_cases_rejected() {
        let result = Timeline::from_records(vec![record(0, 5, 0), record(1, 4, 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deaths_above_cases_rejected() {
        let result = Timeline::from_records(vec![record(0, 5, 6)]);
        assert!(result.unwrap_err().to_string().contains("deaths"));
    }

    #[test]
    fn test_clamped_access() {
        let timeline =
            Timeline::from_records(vec![record(0, 1, 0), record(1, 2, 0), record(2, 3, 0)]).unwrap();
        assert_eq!(timeline.clamped(-5).cumulative_cases, 1);
        assert_eq!(timeline.clamped(100).cumulative_cases, 3);
        assert_eq!(timeline.clamped(1).cumulative_cases, 2);
    }

    #[test]
    fn test_clone_shares_buffer() {
        let timeline = Timeline::from_records(vec![record(0, 1, 0)]).unwrap();
        let copy = timeline.clone();
        assert!(timeline.shares_buffer(&copy));
    }

    #[test]
    fn test_summary() {
        let timeline = Timeline::from_records(vec![record(0, 1, 0), record(1, 2_000, 18)]).unwrap();
        let summary = timeline.summary(10);
        assert_eq!(summary.final_date, day(1));
        assert_eq!(summary.total_days, 2);
        assert_eq!(summary.final_cases, 2_000);
        assert_eq!(summary.final_deaths, 18);
        assert_eq!(summary.city_count, 10);
    }
}
