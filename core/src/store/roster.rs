use super::{parse_stored_date, AnalyticsStore};
use crate::{
    domain::{Category, Role, RosterEntry},
    error::AnalyticsResult,
    gateway::RosterGateway,
    types::{OrgId, ProcessId},
};
use rusqlite::params;

struct RosterRow {
    person_id: i64,
    role: String,
    category: String,
    location_id: Option<i64>,
    last_working_day: Option<String>,
}

impl RosterRow {
    fn into_entry(self) -> AnalyticsResult<RosterEntry> {
        let last_working_day = self
            .last_working_day
            .as_deref()
            .map(|raw| parse_stored_date("person", "last_working_day", raw))
            .transpose()?;
        Ok(RosterEntry {
            person_id: self.person_id,
            role: Role::parse(&self.role),
            category: Category::parse(&self.category),
            location_id: self.location_id,
            last_working_day,
        })
    }
}

impl RosterGateway for AnalyticsStore {
    fn fetch_assigned_roster(
        &self,
        org_id: OrgId,
        process_id: ProcessId,
    ) -> AnalyticsResult<Vec<RosterEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.role, p.category, p.location_id, p.last_working_day
             FROM process_assignment pa
             JOIN person p   ON p.id = pa.person_id
             JOIN process pr ON pr.id = pa.process_id
             WHERE pr.org_id = ?1 AND p.org_id = ?1
               AND pa.process_id = ?2 AND pa.status = 'assigned'
             ORDER BY p.id ASC",
        )?;
        let rows = stmt
            .query_map(params![org_id, process_id], |row| {
                Ok(RosterRow {
                    person_id: row.get(0)?,
                    role: row.get(1)?,
                    category: row.get(2)?,
                    location_id: row.get(3)?,
                    last_working_day: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(RosterRow::into_entry).collect()
    }
}
