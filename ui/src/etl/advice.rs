//! Warns when the source query ran longer than the explore view allows.

use std::fmt;

use crate::types::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutAdvice {
    /// Query run time, rounded to whole seconds
    pub run_secs: i64,
    pub timeout_secs: u64,
}

impl fmt::Display for TimeoutAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "This query took {} seconds to run, and the explore view times out at {} seconds, \
             following this flow will most likely lead to your query timing out. \
             We recommend your summarize your data further before following that flow.",
            self.run_secs, self.timeout_secs
        )
    }
}

/// Advisory for `query` when its run time exceeds `timeout_secs`.
///
/// Nothing is reported when either timestamp or the timeout is unknown.
pub fn timeout_advice(query: &Query, timeout_secs: Option<u64>) -> Option<TimeoutAdvice> {
    let timeout_secs = timeout_secs?;
    let elapsed = query.end_dttm? - query.start_dttm?;
    let millis = elapsed.num_milliseconds();
    let limit_millis = i64::try_from(timeout_secs).ok()?.saturating_mul(1000);

    (millis > limit_millis).then(|| TimeoutAdvice {
        run_secs: (millis as f64 / 1000.0).round() as i64,
        timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn timed(millis: i64) -> Query {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Query {
            start_dttm: Some(start),
            end_dttm: Some(start + Duration::milliseconds(millis)),
            ..Default::default()
        }
    }

    #[test]
    fn test_slow_query_gets_advice() {
        let advice = timeout_advice(&timed(75_400), Some(60)).unwrap();
        assert_eq!(advice.run_secs, 75);
        assert_eq!(advice.timeout_secs, 60);
        assert!(advice.to_string().starts_with("This query took 75 seconds to run"));
    }

    #[test]
    fn test_boundary_is_not_advised() {
        assert!(timeout_advice(&timed(60_000), Some(60)).is_none());
        assert!(timeout_advice(&timed(60_001), Some(60)).is_some());
    }

    #[test]
    fn test_missing_inputs() {
        assert!(timeout_advice(&timed(90_000), None).is_none());
        assert!(timeout_advice(&Query::default(), Some(1)).is_none());
    }
}
