use super::AnalyticsStore;
use crate::{
    domain::Process,
    error::AnalyticsResult,
    gateway::{LocationResolver, ProcessCatalog},
    types::{LocationId, OrgId, ProcessId},
};
use rusqlite::{params, params_from_iter, OptionalExtension};
use std::collections::HashMap;

fn process_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<Process> {
    Ok(Process {
        id: row.get(0)?,
        org_id: row.get(1)?,
        name: row.get(2)?,
        line_of_business_id: row.get(3)?,
    })
}

/// `?,?,?` with `n` placeholders. Only the count is interpolated,
/// never a value.
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

impl ProcessCatalog for AnalyticsStore {
    fn organization_exists(&self, org_id: OrgId) -> AnalyticsResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM organization WHERE id = ?1)",
            params![org_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn process(&self, org_id: OrgId, process_id: ProcessId) -> AnalyticsResult<Option<Process>> {
        self.conn
            .query_row(
                "SELECT id, org_id, name, line_of_business_id
                 FROM process WHERE org_id = ?1 AND id = ?2",
                params![org_id, process_id],
                process_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    fn processes_for(&self, org_id: OrgId) -> AnalyticsResult<Vec<Process>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, org_id, name, line_of_business_id
             FROM process WHERE org_id = ?1
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![org_id], process_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

impl LocationResolver for AnalyticsStore {
    fn names_for(&self, ids: &[LocationId]) -> AnalyticsResult<HashMap<LocationId, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT id, name FROM location WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((row.get::<_, LocationId>(0)?, row.get::<_, String>(1)?))
        })?;
        rows.collect::<Result<HashMap<_, _>, _>>().map_err(Into::into)
    }
}
