//! Deterministic demo organisation.
//!
//! Seeds one organisation with lines of business, locations, processes,
//! rostered people and training batches. Same seed and same config always
//! produce the same rows. The data deliberately covers the awkward cases:
//! people without a location, people pointing at a location that does not
//! exist, batches without a capacity, handovers in the past and attrition
//! beyond the projection horizon.

use crate::{
    config::DemoConfig,
    domain::{BatchRecord, Location, PersonRecord, Process},
    error::AnalyticsResult,
    rng::{RngBank, SeedRng, SeedStream},
    store::AnalyticsStore,
    types::{LobId, LocationId, OrgId},
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

const LOB_NAMES: &[&str] = &["Customer Care", "Collections", "Technical Support", "Retail Banking"];
const LOCATION_NAMES: &[&str] = &["Manila", "Pune", "Cebu", "Krakow", "Bogota"];
const PROCESS_NAMES: &[&str] = &[
    "Billing Queue",
    "Card Activation",
    "Fraud Callbacks",
    "Premium Support",
    "Chat Escalations",
    "Returns Desk",
];
const FIRST_NAMES: &[&str] = &[
    "Ana", "Ben", "Chidi", "Dana", "Emre", "Farah", "Gus", "Hana", "Ivan", "Joy", "Kai", "Lena",
];
const LAST_NAMES: &[&str] = &[
    "Reyes", "Patel", "Okafor", "Nowak", "Garcia", "Kim", "Silva", "Haddad", "Ito", "Brown",
];
const OPERATIONAL_ROLES: &[&str] = &["trainer", "manager", "quality_analyst", "admin", "agent"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DemoSummary {
    pub org_id: OrgId,
    pub lines_of_business: usize,
    pub locations: usize,
    pub processes: usize,
    pub people: usize,
    pub batches: usize,
}

pub struct DemoSeeder<'a> {
    store: &'a AnalyticsStore,
    config: &'a DemoConfig,
    bank: RngBank,
}

impl<'a> DemoSeeder<'a> {
    pub fn new(store: &'a AnalyticsStore, config: &'a DemoConfig, seed: u64) -> Self {
        Self {
            store,
            config,
            bank: RngBank::new(seed),
        }
    }

    /// Seed organisation `org_id` relative to `today`.
    pub fn seed(&self, org_id: OrgId, today: NaiveDate) -> AnalyticsResult<DemoSummary> {
        let mut summary = DemoSummary {
            org_id,
            ..DemoSummary::default()
        };
        let mut structure = self.bank.for_stream(SeedStream::Structure);
        let mut roster = self.bank.for_stream(SeedStream::Roster);
        let mut attrition = self.bank.for_stream(SeedStream::Attrition);
        let mut batches = self.bank.for_stream(SeedStream::Batches);

        self.store
            .insert_organization(org_id, &format!("Demo Org {org_id}"))?;

        let lob_ids: Vec<LobId> = (1..=self.config.lines_of_business as i64)
            .map(|i| org_id * 100 + i)
            .collect();
        for (i, lob_id) in lob_ids.iter().enumerate() {
            self.store
                .insert_line_of_business(*lob_id, org_id, LOB_NAMES[i % LOB_NAMES.len()])?;
        }
        summary.lines_of_business = lob_ids.len();

        let location_ids: Vec<LocationId> = (1..=self.config.locations as i64)
            .map(|i| org_id * 100 + i)
            .collect();
        for (i, location_id) in location_ids.iter().enumerate() {
            self.store.insert_location(
                org_id,
                &Location {
                    id: *location_id,
                    name: LOCATION_NAMES[i % LOCATION_NAMES.len()].to_string(),
                },
            )?;
        }
        summary.locations = location_ids.len();
        // Referenced by some people, never inserted.
        let dangling_location = org_id * 100 + 99;

        let mut next_person_id = org_id * 100_000;
        let mut next_batch_id = org_id * 10_000;

        for i in 0..self.config.processes {
            // Every fourth process sits outside any line of business.
            let line_of_business_id = if lob_ids.is_empty() || i % 4 == 3 {
                None
            } else {
                Some(*structure.pick(&lob_ids))
            };
            let process = Process {
                id: org_id * 1_000 + i as i64 + 1,
                org_id,
                name: format!("{} {}", PROCESS_NAMES[i % PROCESS_NAMES.len()], i + 1),
                line_of_business_id,
            };
            self.store.insert_process(&process)?;
            summary.processes += 1;

            for _ in 0..self.config.people_per_process {
                next_person_id += 1;
                let person = self.person(
                    next_person_id,
                    org_id,
                    &location_ids,
                    dangling_location,
                    today,
                    &mut roster,
                    &mut attrition,
                );
                self.store.insert_person(&person)?;
                self.store.assign_person(person.id, process.id)?;
                summary.people += 1;
            }

            for b in 0..self.config.batches_per_process {
                next_batch_id += 1;
                let capacity_limit = if batches.chance(0.1) {
                    None
                } else {
                    Some(batches.range_inclusive(1, self.config.max_batch_capacity.max(1)))
                };
                self.store.insert_batch(&BatchRecord {
                    id: next_batch_id,
                    org_id,
                    process_id: process.id,
                    name: format!("{} wave {}", process.name, b + 1),
                    handover_to_ops_date: Some(today + Duration::days(batches.range_inclusive(-10, 85))),
                    capacity_limit,
                })?;
                summary.batches += 1;
            }
        }

        log::info!(
            "seeded demo org {org_id}: {} processes, {} people, {} batches",
            summary.processes,
            summary.people,
            summary.batches
        );
        Ok(summary)
    }

    #[allow(clippy::too_many_arguments)]
    fn person(
        &self,
        id: i64,
        org_id: OrgId,
        location_ids: &[LocationId],
        dangling_location: LocationId,
        today: NaiveDate,
        roster: &mut SeedRng,
        attrition: &mut SeedRng,
    ) -> PersonRecord {
        let is_trainee = roster.chance(self.config.trainee_share);
        let (role, category) = if is_trainee {
            ("trainee", "trainee")
        } else {
            (*roster.pick(OPERATIONAL_ROLES), "active")
        };

        let roll = roster.next_f64();
        let location_id = if location_ids.is_empty() || roll < 0.05 {
            None
        } else if roll < 0.08 {
            Some(dangling_location)
        } else {
            Some(*roster.pick(location_ids))
        };

        let last_working_day = attrition
            .chance(self.config.attrition_probability)
            .then(|| today + Duration::days(attrition.range_inclusive(1, 120)));

        let first = roster.pick(FIRST_NAMES);
        let last = roster.pick(LAST_NAMES);

        PersonRecord {
            id,
            org_id,
            name: format!("{first} {last}"),
            role: role.to_string(),
            category: category.to_string(),
            location_id,
            last_working_day,
        }
    }
}
