//! Present-day headcount breakdown for one process.
//!
//! One linear pass over the roster fills three views: by category, by role
//! and by location. The total is the roster length, taken independently of
//! the views, so a mismatch between them is observable.

use crate::{
    config::LabelConfig,
    domain::{Category, RosterEntry},
    types::{Headcount, LocationId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// `byCategory` always carries both keys, even at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub active: Headcount,
    pub trainee: Headcount,
}

impl CategoryCounts {
    pub fn increment(&mut self, category: Category) {
        match category {
            Category::Active => self.active += 1,
            Category::Trainee => self.trainee += 1,
        }
    }

    pub fn total(&self) -> Headcount {
        self.active + self.trainee
    }

    pub fn absorb(&mut self, other: &CategoryCounts) {
        self.active += other.active;
        self.trainee += other.trainee;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadcountSnapshot {
    pub total_headcount: Headcount,
    pub by_category: CategoryCounts,
    pub by_role: BTreeMap<String, Headcount>,
    pub by_location: BTreeMap<String, Headcount>,
}

impl HeadcountSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total_headcount == 0
    }
}

pub struct SnapshotAggregator<'a> {
    labels: &'a LabelConfig,
}

impl<'a> SnapshotAggregator<'a> {
    pub fn new(labels: &'a LabelConfig) -> Self {
        Self { labels }
    }

    /// Distinct location ids referenced by the roster, in ascending order.
    /// This is the id set handed to the location resolver.
    pub fn referenced_locations(roster: &[RosterEntry]) -> Vec<LocationId> {
        let mut ids: Vec<LocationId> = roster.iter().filter_map(|p| p.location_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn aggregate(
        &self,
        roster: &[RosterEntry],
        location_names: &HashMap<LocationId, String>,
    ) -> HeadcountSnapshot {
        let mut snapshot = HeadcountSnapshot {
            total_headcount: roster.len() as Headcount,
            ..HeadcountSnapshot::default()
        };

        for person in roster {
            match person.category {
                Some(category) => snapshot.by_category.increment(category),
                None => log::debug!(
                    "person {} has an unrecognised category; left out of byCategory",
                    person.person_id
                ),
            }

            *snapshot
                .by_role
                .entry(person.role.as_str().to_string())
                .or_insert(0) += 1;

            let location = match person.location_id {
                None => self.labels.unassigned_location.as_str(),
                Some(id) => location_names
                    .get(&id)
                    .map(String::as_str)
                    .unwrap_or(self.labels.unknown_location.as_str()),
            };
            *snapshot.by_location.entry(location.to_string()).or_insert(0) += 1;
        }

        snapshot
    }
}
