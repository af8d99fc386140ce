//! Folding per-process outcomes into organization / line-of-business totals.
//!
//! The rollup total is always the sum of the computed process totals, and
//! every view is the key-wise sum of the same views per process. Failed
//! processes contribute nothing and are listed in `degradedProcesses`.
//!
//! The merged projection is evaluated on the union of all process sample
//! dates. Each process contributes the value of its own step curve on that
//! date, so a change sampled in one process shows in the total on the same day.

use crate::{
    analytics::ProcessOutcome,
    projection::{ProjectionPoint, ProjectionSimulator},
    snapshot::CategoryCounts,
    types::{Headcount, LobId, OrgId, ProcessId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RollupScope {
    Organization {
        #[serde(rename = "orgId")]
        org_id: OrgId,
    },
    LineOfBusiness {
        #[serde(rename = "orgId")]
        org_id: OrgId,
        #[serde(rename = "lineOfBusinessId")]
        lob_id: LobId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadcountRollup {
    pub scope: RollupScope,
    pub process_count: usize,
    pub degraded_processes: Vec<ProcessId>,
    pub total_headcount: Headcount,
    pub by_category: CategoryCounts,
    pub by_role: BTreeMap<String, Headcount>,
    pub by_location: BTreeMap<String, Headcount>,
    pub projection: Vec<ProjectionPoint>,
    pub processes: Vec<ProcessOutcome>,
}

impl HeadcountRollup {
    pub fn fold(scope: RollupScope, processes: Vec<ProcessOutcome>) -> Self {
        let mut total_headcount = 0;
        let mut by_category = CategoryCounts::default();
        let mut by_role: BTreeMap<String, Headcount> = BTreeMap::new();
        let mut by_location: BTreeMap<String, Headcount> = BTreeMap::new();
        let mut degraded_processes = Vec::new();

        for outcome in &processes {
            let Some(a) = outcome.analytics() else {
                degraded_processes.push(outcome.process_id());
                continue;
            };
            total_headcount += a.total_headcount;
            by_category.absorb(&a.by_category);
            for (role, n) in &a.by_role {
                *by_role.entry(role.clone()).or_insert(0) += n;
            }
            for (location, n) in &a.by_location {
                *by_location.entry(location.clone()).or_insert(0) += n;
            }
        }

        let projection = merge_projections(&processes);

        Self {
            scope,
            process_count: processes.len(),
            degraded_processes,
            total_headcount,
            by_category,
            by_role,
            by_location,
            projection,
            processes,
        }
    }
}

fn merge_projections(processes: &[ProcessOutcome]) -> Vec<ProjectionPoint> {
    let curves: Vec<&[ProjectionPoint]> = processes
        .iter()
        .filter_map(ProcessOutcome::analytics)
        .map(|a| a.projection.as_slice())
        .filter(|points| !points.is_empty())
        .collect();

    let dates: BTreeSet<NaiveDate> = curves
        .iter()
        .flat_map(|points| points.iter().map(|p| p.date))
        .collect();

    dates
        .into_iter()
        .map(|date| ProjectionPoint {
            date,
            expected_headcount: curves
                .iter()
                .map(|points| ProjectionSimulator::value_on(points, date).unwrap_or(0))
                .sum(),
        })
        .collect()
}
