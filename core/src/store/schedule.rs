use super::{format_date, parse_stored_date, AnalyticsStore};
use crate::{
    domain::Handover,
    error::AnalyticsResult,
    gateway::ScheduleGateway,
    types::{OrgId, ProcessId},
};
use chrono::NaiveDate;
use rusqlite::params;

impl ScheduleGateway for AnalyticsStore {
    fn fetch_future_handovers(
        &self,
        org_id: OrgId,
        process_id: ProcessId,
        as_of: NaiveDate,
    ) -> AnalyticsResult<Vec<Handover>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, handover_to_ops_date, capacity_limit
             FROM batch
             WHERE org_id = ?1 AND process_id = ?2
               AND handover_to_ops_date IS NOT NULL
               AND substr(handover_to_ops_date, 1, 10) >= ?3
             ORDER BY handover_to_ops_date ASC, id ASC",
        )?;
        let rows = stmt
            .query_map(params![org_id, process_id, format_date(as_of)], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(batch_id, raw_date, capacity)| -> AnalyticsResult<Handover> {
                Ok(Handover {
                    batch_id,
                    handover_to_ops_date: parse_stored_date(
                        "batch",
                        "handover_to_ops_date",
                        &raw_date,
                    )?,
                    capacity_limit: capacity.unwrap_or(0),
                })
            })
            .collect()
    }
}
