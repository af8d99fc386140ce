//! Roster, schedule and catalog records as seen by the analytics engine.
//!
//! All of these are owned by surrounding systems (roster management, batch
//! lifecycle, process catalog). The engine only ever reads them.

use crate::types::{BatchId, Headcount, LobId, LocationId, OrgId, PersonId, ProcessId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Role ─────────────────────────────────────────────────────────────────────

/// A person's role on a process.
///
/// The known roles are closed variants; anything else is carried verbatim in
/// `Other` so new roles show up in `byRole` without an enum change here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Trainee,
    Trainer,
    Manager,
    Admin,
    QualityAnalyst,
    Owner,
    Other(String),
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "trainee" => Role::Trainee,
            "trainer" => Role::Trainer,
            "manager" => Role::Manager,
            "admin" => Role::Admin,
            "quality_analyst" => Role::QualityAnalyst,
            "owner" => Role::Owner,
            other => Role::Other(other.to_string()),
        }
    }

    /// The literal role string used as the `byRole` key.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Trainee => "trainee",
            Role::Trainer => "trainer",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::QualityAnalyst => "quality_analyst",
            Role::Owner => "owner",
            Role::Other(raw) => raw,
        }
    }
}

// ── Category ─────────────────────────────────────────────────────────────────

/// Whether a person is in training or fully operational. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Active,
    Trainee,
}

impl Category {
    /// Returns `None` for values outside the two recognised buckets.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Category::Active),
            "trainee" => Some(Category::Trainee),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Active => "active",
            Category::Trainee => "trainee",
        }
    }
}

// ── Assignment ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    Unassigned,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Unassigned => "unassigned",
        }
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

/// One person currently assigned to a process.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub person_id: PersonId,
    pub role: Role,
    /// `None` when the stored category is neither `active` nor `trainee`.
    pub category: Option<Category>,
    pub location_id: Option<LocationId>,
    pub last_working_day: Option<NaiveDate>,
}

/// A future batch handover into operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handover {
    pub batch_id: BatchId,
    pub handover_to_ops_date: NaiveDate,
    /// Expected graduates. Missing capacity is read as 0.
    pub capacity_limit: Headcount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    pub org_id: OrgId,
    pub name: String,
    pub line_of_business_id: Option<LobId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

// ── Seeding records ──────────────────────────────────────────────────────────

/// Full person row, used by the store's insert path and the demo seeder.
#[derive(Debug, Clone)]
pub struct PersonRecord {
    pub id: PersonId,
    pub org_id: OrgId,
    pub name: String,
    pub role: String,
    pub category: String,
    pub location_id: Option<LocationId>,
    pub last_working_day: Option<NaiveDate>,
}

/// Full batch row, used by the store's insert path and the demo seeder.
#[derive(Debug, Clone)]
pub struct BatchRecord {
    pub id: BatchId,
    pub org_id: OrgId,
    pub process_id: ProcessId,
    pub name: String,
    pub handover_to_ops_date: Option<NaiveDate>,
    pub capacity_limit: Option<Headcount>,
}
