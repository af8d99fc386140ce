use super::{format_date, AnalyticsStore};
use crate::{
    domain::{AssignmentStatus, BatchRecord, Location, PersonRecord, Process},
    error::AnalyticsResult,
    types::{LobId, OrgId, PersonId, ProcessId},
};
use rusqlite::params;

impl AnalyticsStore {
    // ── Organization structure ─────────────────────────────────────

    pub fn insert_organization(&self, org_id: OrgId, name: &str) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO organization (id, name) VALUES (?1, ?2)",
            params![org_id, name],
        )?;
        Ok(())
    }

    pub fn insert_line_of_business(
        &self,
        lob_id: LobId,
        org_id: OrgId,
        name: &str,
    ) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO line_of_business (id, org_id, name) VALUES (?1, ?2, ?3)",
            params![lob_id, org_id, name],
        )?;
        Ok(())
    }

    pub fn insert_process(&self, p: &Process) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO process (id, org_id, name, line_of_business_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![p.id, p.org_id, &p.name, p.line_of_business_id],
        )?;
        Ok(())
    }

    pub fn insert_location(&self, org_id: OrgId, l: &Location) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO location (id, org_id, name) VALUES (?1, ?2, ?3)",
            params![l.id, org_id, &l.name],
        )?;
        Ok(())
    }

    // ── Roster ─────────────────────────────────────────────────────

    pub fn insert_person(&self, p: &PersonRecord) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO person (
                id, org_id, name, role, category, location_id, last_working_day
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                p.id,
                p.org_id,
                &p.name,
                &p.role,
                &p.category,
                p.location_id,
                p.last_working_day.map(format_date),
            ],
        )?;
        Ok(())
    }

    /// Assign a person to a process, reviving an earlier unassignment.
    pub fn assign_person(&self, person_id: PersonId, process_id: ProcessId) -> AnalyticsResult<()> {
        self.set_assignment(person_id, process_id, AssignmentStatus::Assigned)
    }

    /// End an assignment. The row is kept with status `unassigned`.
    pub fn unassign_person(
        &self,
        person_id: PersonId,
        process_id: ProcessId,
    ) -> AnalyticsResult<()> {
        self.set_assignment(person_id, process_id, AssignmentStatus::Unassigned)
    }

    fn set_assignment(
        &self,
        person_id: PersonId,
        process_id: ProcessId,
        status: AssignmentStatus,
    ) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO process_assignment (person_id, process_id, status)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(person_id, process_id) DO UPDATE SET
                status = excluded.status",
            params![person_id, process_id, status.as_str()],
        )?;
        Ok(())
    }

    // ── Batches ────────────────────────────────────────────────────

    pub fn insert_batch(&self, b: &BatchRecord) -> AnalyticsResult<()> {
        self.conn.execute(
            "INSERT INTO batch (
                id, org_id, process_id, name, handover_to_ops_date, capacity_limit
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                b.id,
                b.org_id,
                b.process_id,
                &b.name,
                b.handover_to_ops_date.map(format_date),
                b.capacity_limit,
            ],
        )?;
        Ok(())
    }
}
