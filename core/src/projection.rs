//! Forward headcount simulation.
//!
//! Walks `HORIZON_DAYS` days from today, one day per step. Each day first
//! applies that day's delta (if any) to the running total, then decides
//! whether to emit a sample. A sample is emitted on every
//! `SAMPLE_INTERVAL_DAYS`-th day and on every day with a delta entry, so
//! every step change is visible without a dense series.
//!
//! The running total is not clamped. A negative value is a deficit signal.

use crate::{event::DeltaSchedule, types::Headcount};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const HORIZON_DAYS: i64 = 90;
pub const SAMPLE_INTERVAL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub expected_headcount: Headcount,
}

pub struct ProjectionSimulator;

impl ProjectionSimulator {
    pub fn simulate(
        current_headcount: Headcount,
        today: NaiveDate,
        deltas: &DeltaSchedule,
    ) -> Vec<ProjectionPoint> {
        let horizon_end = today + Duration::days(HORIZON_DAYS);
        // Single cursor over the in-horizon entries; past and beyond-horizon
        // entries are never visited.
        let mut pending = deltas.window(today, horizon_end).peekable();
        let mut running = current_headcount;
        let mut points = Vec::new();

        for offset in 0..HORIZON_DAYS {
            let day = today + Duration::days(offset);
            let delta = pending.next_if(|(date, _)| *date == day);

            if let Some((_, change)) = delta {
                running += change;
            }

            if offset % SAMPLE_INTERVAL_DAYS == 0 || delta.is_some() {
                points.push(ProjectionPoint {
                    date: day,
                    expected_headcount: running,
                });
            }
        }

        points
    }

    /// Value of a sampled step curve on `date`: the last sample at or
    /// before it. `None` if `date` precedes the first sample.
    ///
    /// Exact for any date inside the horizon, because every change is sampled.
    pub fn value_on(points: &[ProjectionPoint], date: NaiveDate) -> Option<Headcount> {
        let idx = points.partition_point(|p| p.date <= date);
        idx.checked_sub(1).map(|i| points[i].expected_headcount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn day(n: i64) -> NaiveDate {
        today() + Duration::days(n)
    }

    #[test]
    fn flat_projection_has_weekly_points_only() {
        let points = ProjectionSimulator::simulate(5, today(), &DeltaSchedule::default());

        assert_eq!(points.len(), 13);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.date, day(i as i64 * 7));
            assert_eq!(point.expected_headcount, 5);
        }
        assert_eq!(points.last().unwrap().date, day(84));
    }

    #[test]
    fn attrition_step_is_sampled_on_its_day() {
        let mut deltas = DeltaSchedule::default();
        deltas.apply(day(10), -1);

        let points = ProjectionSimulator::simulate(5, today(), &deltas);

        assert_eq!(points.len(), 14);
        let step = points.iter().find(|p| p.date == day(10)).unwrap();
        assert_eq!(step.expected_headcount, 4);
        for p in points.iter().filter(|p| p.date < day(10)) {
            assert_eq!(p.expected_headcount, 5, "before the step on {}", p.date);
        }
        for p in points.iter().filter(|p| p.date > day(10)) {
            assert_eq!(p.expected_headcount, 4, "after the step on {}", p.date);
        }
    }

    #[test]
    fn delta_on_a_weekly_day_is_applied_before_sampling() {
        let mut deltas = DeltaSchedule::default();
        deltas.apply(day(0), 3);
        deltas.apply(day(14), -2);

        let points = ProjectionSimulator::simulate(10, today(), &deltas);

        assert_eq!(points.len(), 13);
        assert_eq!(points[0].expected_headcount, 13);
        assert_eq!(points[1].expected_headcount, 13);
        assert_eq!(points[2].expected_headcount, 11);
    }

    #[test]
    fn entries_outside_the_horizon_are_ignored() {
        let mut deltas = DeltaSchedule::default();
        deltas.apply(day(-1), -4);
        deltas.apply(day(HORIZON_DAYS), 50);

        let points = ProjectionSimulator::simulate(6, today(), &deltas);

        assert_eq!(points.len(), 13);
        assert!(points.iter().all(|p| p.expected_headcount == 6));
    }

    #[test]
    fn last_horizon_day_is_reachable() {
        let mut deltas = DeltaSchedule::default();
        deltas.apply(day(HORIZON_DAYS - 1), 2);

        let points = ProjectionSimulator::simulate(1, today(), &deltas);

        let last = points.last().unwrap();
        assert_eq!(last.date, day(89));
        assert_eq!(last.expected_headcount, 3);
    }

    #[test]
    fn running_total_may_go_negative() {
        let mut deltas = DeltaSchedule::default();
        deltas.apply(day(1), -3);

        let points = ProjectionSimulator::simulate(1, today(), &deltas);

        assert_eq!(points[1].date, day(1));
        assert_eq!(points[1].expected_headcount, -2);
    }

    #[test]
    fn value_on_reads_the_step_curve() {
        let mut deltas = DeltaSchedule::default();
        deltas.apply(day(10), -1);
        let points = ProjectionSimulator::simulate(5, today(), &deltas);

        assert_eq!(ProjectionSimulator::value_on(&points, day(-1)), None);
        assert_eq!(ProjectionSimulator::value_on(&points, day(0)), Some(5));
        assert_eq!(ProjectionSimulator::value_on(&points, day(9)), Some(5));
        assert_eq!(ProjectionSimulator::value_on(&points, day(10)), Some(4));
        assert_eq!(ProjectionSimulator::value_on(&points, day(200)), Some(4));
    }
}
