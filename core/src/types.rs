//! Shared primitive types used across the entire engine.

/// Organization primary key.
pub type OrgId = i64;

/// Process (queue / workflow) primary key.
pub type ProcessId = i64;

/// Line-of-business primary key.
pub type LobId = i64;

/// Roster person primary key.
pub type PersonId = i64;

/// Location primary key. Only used for label resolution.
pub type LocationId = i64;

/// Training batch primary key.
pub type BatchId = i64;

/// Signed headcount change or running total. Never clamped.
pub type Headcount = i64;
