//! Analytics clock — the single place "today" comes from.
//!
//! RULE: Aggregation, event extraction and projection never read the wall
//! clock. The caller resolves a date here once and passes it down.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnalyticsClock {
    /// Read the local date when asked.
    System,
    /// Always report the same date. Used by tests and replays.
    Pinned { today: NaiveDate },
}

impl AnalyticsClock {
    pub fn system() -> Self {
        AnalyticsClock::System
    }

    pub fn pinned(today: NaiveDate) -> Self {
        AnalyticsClock::Pinned { today }
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            AnalyticsClock::System => Local::now().date_naive(),
            AnalyticsClock::Pinned { today } => *today,
        }
    }
}
