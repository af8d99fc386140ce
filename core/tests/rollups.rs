//! Organization and line-of-business entry points, rollup folding and
//! per-process failure isolation.

use chrono::{Duration, NaiveDate};
use headcount_core::{
    analytics::{AnalyticsFacade, ProcessOutcome},
    config::AnalyticsConfig,
    domain::{BatchRecord, Location, PersonRecord, Process, RosterEntry},
    error::{AnalyticsError, AnalyticsResult},
    gateway::RosterGateway,
    rollup::RollupScope,
    store::AnalyticsStore,
    types::{OrgId, ProcessId},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

const ORG: i64 = 1;
const LOB_CARE: i64 = 100;
const LOB_COLLECTIONS: i64 = 200;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 14).unwrap()
}

fn day(n: i64) -> NaiveDate {
    today() + Duration::days(n)
}

/// Four processes: 11 and 13 in Care, 12 in Collections, 14 in no LOB.
fn seed(store: &AnalyticsStore) {
    store.migrate().expect("migration");
    store.insert_organization(ORG, "Acme").unwrap();
    store.insert_line_of_business(LOB_CARE, ORG, "Care").unwrap();
    store.insert_line_of_business(LOB_COLLECTIONS, ORG, "Collections").unwrap();
    store.insert_location(ORG, &Location { id: 1, name: "Manila".into() }).unwrap();

    let processes = [
        (11, Some(LOB_CARE)),
        (12, Some(LOB_COLLECTIONS)),
        (13, Some(LOB_CARE)),
        (14, None),
    ];
    let mut person_id = 0;
    for (idx, (process_id, lob)) in processes.into_iter().enumerate() {
        store
            .insert_process(&Process {
                id: process_id,
                org_id: ORG,
                name: format!("queue-{process_id}"),
                line_of_business_id: lob,
            })
            .unwrap();

        // Process 14 keeps an empty roster.
        let headcount = if process_id == 14 { 0 } else { 3 + idx as i64 };
        for n in 0..headcount {
            person_id += 1;
            store
                .insert_person(&PersonRecord {
                    id: person_id,
                    org_id: ORG,
                    name: format!("person-{person_id}"),
                    role: if n == 0 { "manager".into() } else { "trainer".into() },
                    category: if n % 2 == 0 { "active".into() } else { "trainee".into() },
                    location_id: if n == 1 { None } else { Some(1) },
                    last_working_day: (n == 2).then(|| day(5 + idx as i64)),
                })
                .unwrap();
            store.assign_person(person_id, process_id).unwrap();
        }

        store
            .insert_batch(&BatchRecord {
                id: process_id,
                org_id: ORG,
                process_id,
                name: format!("wave-{process_id}"),
                handover_to_ops_date: Some(day(30 + idx as i64)),
                capacity_limit: Some(2),
            })
            .unwrap();
    }
}

fn make_store() -> AnalyticsStore {
    let store = AnalyticsStore::in_memory().expect("in-memory store");
    seed(&store);
    store
}

/// Roster gateway that fails for one process and delegates the rest.
struct FlakyRoster<'a> {
    inner: &'a AnalyticsStore,
    broken: ProcessId,
}

impl RosterGateway for FlakyRoster<'_> {
    fn fetch_assigned_roster(
        &self,
        org_id: OrgId,
        process_id: ProcessId,
    ) -> AnalyticsResult<Vec<RosterEntry>> {
        if process_id == self.broken {
            return Err(AnalyticsError::DataAccess(rusqlite::Error::QueryReturnedNoRows));
        }
        self.inner.fetch_assigned_roster(org_id, process_id)
    }
}

fn computed(outcomes: &[ProcessOutcome]) -> Vec<&headcount_core::analytics::ProcessHeadcountAnalytics> {
    outcomes.iter().filter_map(ProcessOutcome::analytics).collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn organization_analytics_returns_one_entry_per_process() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let facade = AnalyticsFacade::over_store(&store, &config);

    let outcomes = facade.organization_analytics(ORG, today()).unwrap();

    let ids: Vec<_> = outcomes.iter().map(ProcessOutcome::process_id).collect();
    assert_eq!(ids, vec![11, 12, 13, 14]);
    assert!(outcomes.iter().all(|o| !o.is_degraded()));

    let empty = outcomes[3].analytics().unwrap();
    assert_eq!(empty.total_headcount, 0);
    assert!(empty.projection.is_empty());
}

#[test]
fn line_of_business_is_the_matching_subset_of_the_organization() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let facade = AnalyticsFacade::over_store(&store, &config);

    let org = facade.organization_analytics(ORG, today()).unwrap();
    let care = facade
        .line_of_business_analytics(ORG, LOB_CARE, today())
        .unwrap();

    let expected: Vec<ProcessOutcome> = org
        .into_iter()
        .filter(|o| matches!(o.process_id(), 11 | 13))
        .collect();
    assert_eq!(care, expected);
}

#[test]
fn line_of_business_without_processes_is_empty() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let facade = AnalyticsFacade::over_store(&store, &config);

    assert!(facade
        .line_of_business_analytics(ORG, 999, today())
        .unwrap()
        .is_empty());

    let rollup = facade.line_of_business_rollup(ORG, 999, today()).unwrap();
    assert_eq!(rollup.process_count, 0);
    assert_eq!(rollup.total_headcount, 0);
}

#[test]
fn unknown_organization_is_not_found() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let facade = AnalyticsFacade::over_store(&store, &config);

    let err = facade.organization_analytics(77, today()).unwrap_err();
    assert!(matches!(err, AnalyticsError::NotFound { entity: "organization", id: 77 }));

    let err = facade
        .line_of_business_analytics(77, LOB_CARE, today())
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::NotFound { entity: "organization", .. }));
}

#[test]
fn organization_rollup_total_is_sum_of_process_totals() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let facade = AnalyticsFacade::over_store(&store, &config);

    let rollup = facade.organization_rollup(ORG, today()).unwrap();

    assert_eq!(rollup.scope, RollupScope::Organization { org_id: ORG });
    let per_process: i64 = computed(&rollup.processes)
        .iter()
        .map(|a| a.total_headcount)
        .sum();
    assert_eq!(rollup.total_headcount, per_process);
    assert_eq!(rollup.total_headcount, 3 + 4 + 5);
    assert_eq!(rollup.by_category.active + rollup.by_category.trainee, 12);
    assert_eq!(rollup.by_role.values().sum::<i64>(), 12);
    assert_eq!(rollup.by_location.values().sum::<i64>(), 12);
    assert_eq!(rollup.by_role["manager"], 3);
    assert_eq!(rollup.projection[0].date, today());
    assert_eq!(rollup.projection[0].expected_headcount, 12);
}

#[test]
fn rollup_projection_tracks_each_process_step() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let facade = AnalyticsFacade::over_store(&store, &config);

    let rollup = facade.organization_rollup(ORG, today()).unwrap();
    let at = |d: NaiveDate| {
        rollup
            .projection
            .iter()
            .find(|p| p.date == d)
            .map(|p| p.expected_headcount)
    };

    // Attrition on days 5, 6, 7; handovers (+2 each) on days 30, 31, 32.
    // Process 14 has an empty roster, so its handover is never simulated.
    assert_eq!(at(day(5)), Some(11));
    assert_eq!(at(day(6)), Some(10));
    assert_eq!(at(day(7)), Some(9));
    assert_eq!(at(day(30)), Some(11));
    assert_eq!(at(day(32)), Some(15));
    assert_eq!(at(day(33)), None);
    assert_eq!(rollup.projection.last().unwrap().expected_headcount, 15);
}

#[test]
fn one_failing_process_does_not_blank_the_organization() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let roster = FlakyRoster {
        inner: &store,
        broken: 12,
    };
    let facade = AnalyticsFacade::new(&roster, &store, &store, &store, config.labels.clone());

    let outcomes = facade.organization_analytics(ORG, today()).unwrap();

    assert_eq!(outcomes.len(), 4);
    let degraded: Vec<_> = outcomes
        .iter()
        .filter(|o| o.is_degraded())
        .map(ProcessOutcome::process_id)
        .collect();
    assert_eq!(degraded, vec![12]);
    assert_eq!(computed(&outcomes).len(), 3);

    let err = outcomes[1].clone().into_result().unwrap_err();
    assert!(matches!(err, AnalyticsError::PartialComputation { process_id: 12, .. }));

    let rollup = facade.organization_rollup(ORG, today()).unwrap();
    assert_eq!(rollup.degraded_processes, vec![12]);
    assert_eq!(rollup.total_headcount, 3 + 5);
}

#[test]
fn single_process_call_propagates_storage_failure() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let roster = FlakyRoster {
        inner: &store,
        broken: 12,
    };
    let facade = AnalyticsFacade::new(&roster, &store, &store, &store, config.labels.clone());

    let err = facade.process_analytics(ORG, 12, today()).unwrap_err();
    assert!(matches!(err, AnalyticsError::DataAccess(_)));
    assert!(facade.process_analytics(ORG, 11, today()).is_ok());
}

#[test]
fn corrupt_row_degrades_only_its_process() {
    let path = std::env::temp_dir().join(format!(
        "headcount-rollup-corrupt-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let path_str = path.to_str().unwrap().to_string();

    let config = AnalyticsConfig::default_test();
    let store = AnalyticsStore::open(&path_str, &config.store).unwrap();
    seed(&store);

    // Person 1 sits on process 11; damage it from a second connection.
    let raw = rusqlite::Connection::open(&path_str).unwrap();
    raw.execute(
        "UPDATE person SET last_working_day = 'end of quarter' WHERE id = 1",
        [],
    )
    .unwrap();
    drop(raw);

    let facade = AnalyticsFacade::over_store(&store, &config);
    let outcomes = facade.organization_analytics(ORG, today()).unwrap();

    match &outcomes[0] {
        ProcessOutcome::Failed(failure) => {
            assert_eq!(failure.process_id, 11);
            assert!(failure.reason.contains("last_working_day"), "{}", failure.reason);
        }
        other => panic!("process 11 should be degraded, got {other:?}"),
    }
    assert!(outcomes[1..].iter().all(|o| !o.is_degraded()));

    let json = serde_json::to_value(&outcomes[0]).unwrap();
    assert_eq!(json["status"], "failed");
    assert_eq!(json["processId"], 11);

    drop(facade);
    drop(store);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn computed_outcome_serialises_with_status_tag() {
    let store = make_store();
    let config = AnalyticsConfig::default_test();
    let facade = AnalyticsFacade::over_store(&store, &config);

    let outcomes = facade.organization_analytics(ORG, today()).unwrap();
    let json = serde_json::to_value(&outcomes[0]).unwrap();

    assert_eq!(json["status"], "computed");
    assert_eq!(json["processId"], 11);
    assert_eq!(json["totalHeadcount"], 3);
}
