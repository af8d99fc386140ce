//! Headcount events and the date-keyed delta schedule.
//!
//! Two independent sources feed the schedule:
//!   1. Attrition — every rostered person with a last working day is -1 on that date.
//!   2. Handover  — every future batch is +capacity on its handover-to-ops date.
//!
//! Events on the same date net into a single entry. An entry that nets to
//! zero is kept: the date still had activity and is still sampled.

use crate::{
    domain::{Handover, RosterEntry},
    types::{BatchId, Headcount, PersonId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeadcountEvent {
    Attrition {
        date: NaiveDate,
        person_id: PersonId,
    },
    Handover {
        date: NaiveDate,
        batch_id: BatchId,
        capacity: Headcount,
    },
}

impl HeadcountEvent {
    pub fn date(&self) -> NaiveDate {
        match self {
            HeadcountEvent::Attrition { date, .. } | HeadcountEvent::Handover { date, .. } => *date,
        }
    }

    pub fn delta(&self) -> Headcount {
        match self {
            HeadcountEvent::Attrition { .. } => -1,
            HeadcountEvent::Handover { capacity, .. } => *capacity,
        }
    }
}

/// Ordered map of date → signed headcount change.
///
/// Serialises as `{"YYYY-MM-DD": delta, ...}` in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeltaSchedule(BTreeMap<NaiveDate, Headcount>);

impl DeltaSchedule {
    pub fn apply(&mut self, date: NaiveDate, delta: Headcount) {
        *self.0.entry(date).or_insert(0) += delta;
    }

    pub fn get(&self, date: NaiveDate) -> Option<Headcount> {
        self.0.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries with `from <= date < until`, in date order.
    pub fn window(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> impl Iterator<Item = (NaiveDate, Headcount)> + '_ {
        self.0.range(from..until).map(|(date, delta)| (*date, *delta))
    }
}

impl FromIterator<HeadcountEvent> for DeltaSchedule {
    fn from_iter<I: IntoIterator<Item = HeadcountEvent>>(iter: I) -> Self {
        let mut schedule = DeltaSchedule::default();
        for event in iter {
            schedule.apply(event.date(), event.delta());
        }
        schedule
    }
}

pub struct EventExtractor;

impl EventExtractor {
    /// Attrition events in roster order, then handover events in schedule order.
    pub fn events(roster: &[RosterEntry], handovers: &[Handover]) -> Vec<HeadcountEvent> {
        let attrition = roster.iter().filter_map(|person| {
            person.last_working_day.map(|date| HeadcountEvent::Attrition {
                date,
                person_id: person.person_id,
            })
        });
        let onboarding = handovers.iter().map(|h| HeadcountEvent::Handover {
            date: h.handover_to_ops_date,
            batch_id: h.batch_id,
            capacity: h.capacity_limit,
        });
        attrition.chain(onboarding).collect()
    }

    pub fn extract(roster: &[RosterEntry], handovers: &[Handover]) -> DeltaSchedule {
        Self::events(roster, handovers).into_iter().collect()
    }
}
