//! Gateway traits — the data contracts the engine consumes.
//!
//! RULE: The computation pipeline never touches storage directly.
//! Everything it reads arrives through one of these four traits.
//! `AnalyticsStore` implements all of them over SQLite; tests may
//! supply their own implementations.

use crate::{
    domain::{Handover, Process, RosterEntry},
    error::AnalyticsResult,
    types::{LocationId, OrgId, ProcessId},
};
use chrono::NaiveDate;
use std::collections::HashMap;

pub trait RosterGateway {
    /// People whose assignment to `process_id` has status `assigned`.
    ///
    /// An empty roster is a valid result, not an error.
    fn fetch_assigned_roster(
        &self,
        org_id: OrgId,
        process_id: ProcessId,
    ) -> AnalyticsResult<Vec<RosterEntry>>;
}

pub trait ScheduleGateway {
    /// Batches of `process_id` whose handover-to-ops date is on or after `as_of`.
    fn fetch_future_handovers(
        &self,
        org_id: OrgId,
        process_id: ProcessId,
        as_of: NaiveDate,
    ) -> AnalyticsResult<Vec<Handover>>;
}

pub trait LocationResolver {
    /// Resolve an id set to names. Ids with no location are simply absent
    /// from the returned map.
    fn names_for(&self, ids: &[LocationId]) -> AnalyticsResult<HashMap<LocationId, String>>;
}

pub trait ProcessCatalog {
    fn organization_exists(&self, org_id: OrgId) -> AnalyticsResult<bool>;

    /// `None` when the process does not exist or belongs to another organization.
    fn process(&self, org_id: OrgId, process_id: ProcessId) -> AnalyticsResult<Option<Process>>;

    /// Every process owned by the organization, ordered by id.
    fn processes_for(&self, org_id: OrgId) -> AnalyticsResult<Vec<Process>>;
}
