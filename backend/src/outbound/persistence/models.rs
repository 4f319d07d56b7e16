//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{agencies, boards, questions, rank_tiers, subjects, topics, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub xp: i64,
    pub answered_count: i64,
    pub rank_id: Option<Uuid>,
    pub plan: String,
    pub active: bool,
    #[expect(dead_code, reason = "schema field read for audit purposes only")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field read for audit purposes only")]
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the questions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub statement: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub option_e: Option<String>,
    pub answer_key: String,
    pub subject_id: Uuid,
    pub board_id: Option<Uuid>,
    pub agency_id: Option<Uuid>,
    pub year: Option<i32>,
    pub active: bool,
    #[expect(dead_code, reason = "schema field read for audit purposes only")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field read for audit purposes only")]
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the rank_tiers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rank_tiers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RankTierRow {
    pub id: Uuid,
    pub name: String,
    pub xp_threshold: i64,
}

/// Row struct for reading from the subjects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subjects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubjectRow {
    pub id: Uuid,
    pub name: String,
    pub discipline: String,
}

/// Row struct for reading from the boards table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BoardRow {
    pub id: Uuid,
    pub name: String,
}

/// Row struct for reading from the agencies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = agencies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AgencyRow {
    pub id: Uuid,
    pub name: String,
}

/// Row struct for reading from the topics table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = topics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TopicRow {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub name: String,
}
