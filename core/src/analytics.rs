//! Analytics facade — per-process pipeline plus organization and
//! line-of-business entry points.
//!
//! PIPELINE (per process, fixed order):
//!   1. Roster fetch        (RosterGateway)
//!   2. Handover fetch      (ScheduleGateway)
//!   3. Location names      (LocationResolver, one batched lookup)
//!   4. Snapshot            (SnapshotAggregator)
//!   5. Delta schedule      (EventExtractor)
//!   6. Projection          (ProjectionSimulator)
//!
//! RULES:
//!   - An empty roster short-circuits after step 1: zeroed snapshot, no projection.
//!   - Single-process calls propagate NotFound and DataAccess errors as-is.
//!   - Multi-process calls never abort on one process: each failure becomes a
//!     `ProcessOutcome::Failed` entry and the rest of the rollup proceeds.

use crate::{
    config::{AnalyticsConfig, LabelConfig},
    domain::Process,
    error::{AnalyticsError, AnalyticsResult},
    event::{EventExtractor, HeadcountEvent},
    gateway::{LocationResolver, ProcessCatalog, RosterGateway, ScheduleGateway},
    projection::{ProjectionPoint, ProjectionSimulator},
    rollup::{HeadcountRollup, RollupScope},
    snapshot::{CategoryCounts, HeadcountSnapshot, SnapshotAggregator},
    store::AnalyticsStore,
    types::{Headcount, LobId, OrgId, ProcessId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Public types ─────────────────────────────────────────────────────────────

/// Headcount picture of one process. Field names are a stable wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessHeadcountAnalytics {
    pub process_id: ProcessId,
    pub process_name: String,
    pub total_headcount: Headcount,
    pub by_category: CategoryCounts,
    pub by_role: BTreeMap<String, Headcount>,
    pub by_location: BTreeMap<String, Headcount>,
    pub projection: Vec<ProjectionPoint>,
}

impl ProcessHeadcountAnalytics {
    fn assemble(
        process: &Process,
        snapshot: HeadcountSnapshot,
        projection: Vec<ProjectionPoint>,
    ) -> Self {
        Self {
            process_id: process.id,
            process_name: process.name.clone(),
            total_headcount: snapshot.total_headcount,
            by_category: snapshot.by_category,
            by_role: snapshot.by_role,
            by_location: snapshot.by_location,
            projection,
        }
    }

    fn empty(process: &Process) -> Self {
        Self::assemble(process, HeadcountSnapshot::default(), Vec::new())
    }
}

/// A process whose analytics could not be computed inside a rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessFailure {
    pub process_id: ProcessId,
    pub process_name: String,
    pub reason: String,
}

/// One entry of a multi-process call. `failed` entries are the degraded
/// indicator a dashboard renders next to the data that did compute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Computed(ProcessHeadcountAnalytics),
    Failed(ProcessFailure),
}

impl ProcessOutcome {
    pub fn process_id(&self) -> ProcessId {
        match self {
            ProcessOutcome::Computed(a) => a.process_id,
            ProcessOutcome::Failed(f) => f.process_id,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ProcessOutcome::Failed(_))
    }

    pub fn analytics(&self) -> Option<&ProcessHeadcountAnalytics> {
        match self {
            ProcessOutcome::Computed(a) => Some(a),
            ProcessOutcome::Failed(_) => None,
        }
    }

    pub fn into_result(self) -> AnalyticsResult<ProcessHeadcountAnalytics> {
        match self {
            ProcessOutcome::Computed(a) => Ok(a),
            ProcessOutcome::Failed(f) => Err(AnalyticsError::PartialComputation {
                process_id: f.process_id,
                reason: f.reason,
            }),
        }
    }
}

// ── Facade ───────────────────────────────────────────────────────────────────

pub struct AnalyticsFacade<'a> {
    roster: &'a dyn RosterGateway,
    schedule: &'a dyn ScheduleGateway,
    locations: &'a dyn LocationResolver,
    catalog: &'a dyn ProcessCatalog,
    labels: LabelConfig,
}

impl<'a> AnalyticsFacade<'a> {
    pub fn new(
        roster: &'a dyn RosterGateway,
        schedule: &'a dyn ScheduleGateway,
        locations: &'a dyn LocationResolver,
        catalog: &'a dyn ProcessCatalog,
        labels: LabelConfig,
    ) -> Self {
        Self {
            roster,
            schedule,
            locations,
            catalog,
            labels,
        }
    }

    /// Facade reading every contract from one SQLite store.
    pub fn over_store(store: &'a AnalyticsStore, config: &AnalyticsConfig) -> Self {
        Self::new(store, store, store, store, config.labels.clone())
    }

    pub fn process_analytics(
        &self,
        org_id: OrgId,
        process_id: ProcessId,
        today: NaiveDate,
    ) -> AnalyticsResult<ProcessHeadcountAnalytics> {
        let process = self.require_process(org_id, process_id)?;
        self.run_pipeline(&process, today)
    }

    /// One entry per process of the organization, in process id order.
    pub fn organization_analytics(
        &self,
        org_id: OrgId,
        today: NaiveDate,
    ) -> AnalyticsResult<Vec<ProcessOutcome>> {
        self.require_organization(org_id)?;
        let processes = self.catalog.processes_for(org_id)?;
        Ok(self.evaluate_all(&processes, today))
    }

    /// Entries for the organization's processes in `lob_id`. Empty when none match.
    pub fn line_of_business_analytics(
        &self,
        org_id: OrgId,
        lob_id: LobId,
        today: NaiveDate,
    ) -> AnalyticsResult<Vec<ProcessOutcome>> {
        self.require_organization(org_id)?;
        let processes: Vec<Process> = self
            .catalog
            .processes_for(org_id)?
            .into_iter()
            .filter(|p| p.line_of_business_id == Some(lob_id))
            .collect();
        Ok(self.evaluate_all(&processes, today))
    }

    pub fn organization_rollup(
        &self,
        org_id: OrgId,
        today: NaiveDate,
    ) -> AnalyticsResult<HeadcountRollup> {
        let outcomes = self.organization_analytics(org_id, today)?;
        Ok(HeadcountRollup::fold(RollupScope::Organization { org_id }, outcomes))
    }

    pub fn line_of_business_rollup(
        &self,
        org_id: OrgId,
        lob_id: LobId,
        today: NaiveDate,
    ) -> AnalyticsResult<HeadcountRollup> {
        let outcomes = self.line_of_business_analytics(org_id, lob_id, today)?;
        Ok(HeadcountRollup::fold(
            RollupScope::LineOfBusiness { org_id, lob_id },
            outcomes,
        ))
    }

    /// The attrition and handover events feeding a process's projection,
    /// before they are netted by date.
    pub fn process_events(
        &self,
        org_id: OrgId,
        process_id: ProcessId,
        today: NaiveDate,
    ) -> AnalyticsResult<Vec<HeadcountEvent>> {
        let process = self.require_process(org_id, process_id)?;
        let roster = self.roster.fetch_assigned_roster(process.org_id, process.id)?;
        let handovers = self
            .schedule
            .fetch_future_handovers(process.org_id, process.id, today)?;
        Ok(EventExtractor::events(&roster, &handovers))
    }

    fn require_organization(&self, org_id: OrgId) -> AnalyticsResult<()> {
        if self.catalog.organization_exists(org_id)? {
            Ok(())
        } else {
            Err(AnalyticsError::NotFound {
                entity: "organization",
                id: org_id,
            })
        }
    }

    fn require_process(&self, org_id: OrgId, process_id: ProcessId) -> AnalyticsResult<Process> {
        self.require_organization(org_id)?;
        self.catalog
            .process(org_id, process_id)?
            .ok_or(AnalyticsError::NotFound {
                entity: "process",
                id: process_id,
            })
    }

    fn run_pipeline(
        &self,
        process: &Process,
        today: NaiveDate,
    ) -> AnalyticsResult<ProcessHeadcountAnalytics> {
        log::debug!("process {} ({}): analytics as of {today}", process.id, process.name);

        let roster = self.roster.fetch_assigned_roster(process.org_id, process.id)?;
        if roster.is_empty() {
            log::debug!("process {}: empty roster, projection skipped", process.id);
            return Ok(ProcessHeadcountAnalytics::empty(process));
        }

        let handovers = self
            .schedule
            .fetch_future_handovers(process.org_id, process.id, today)?;
        let names = self
            .locations
            .names_for(&SnapshotAggregator::referenced_locations(&roster))?;

        let snapshot = SnapshotAggregator::new(&self.labels).aggregate(&roster, &names);
        let deltas = EventExtractor::extract(&roster, &handovers);
        let projection =
            ProjectionSimulator::simulate(snapshot.total_headcount, today, &deltas);

        log::debug!(
            "process {}: headcount={} event_days={} samples={}",
            process.id,
            snapshot.total_headcount,
            deltas.len(),
            projection.len(),
        );

        Ok(ProcessHeadcountAnalytics::assemble(process, snapshot, projection))
    }

    fn evaluate_all(&self, processes: &[Process], today: NaiveDate) -> Vec<ProcessOutcome> {
        let outcomes: Vec<ProcessOutcome> = processes
            .iter()
            .map(|process| match self.run_pipeline(process, today) {
                Ok(analytics) => ProcessOutcome::Computed(analytics),
                Err(err) => {
                    log::warn!(
                        "process {} ({}) degraded: {err}",
                        process.id,
                        process.name
                    );
                    ProcessOutcome::Failed(ProcessFailure {
                        process_id: process.id,
                        process_name: process.name.clone(),
                        reason: err.to_string(),
                    })
                }
            })
            .collect();

        let degraded = outcomes.iter().filter(|o| o.is_degraded()).count();
        log::info!(
            "analytics computed for {} processes ({degraded} degraded)",
            outcomes.len()
        );
        outcomes
    }
}
