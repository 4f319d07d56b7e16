//! Port for the response ledger: one row per (user, question) pair.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{OptionLabel, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by response ledger adapters.
    pub enum ResponseLedgerError {
        /// Ledger connection could not be established.
        Connection { message: String } =>
            "response ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "response ledger query failed: {message}",
    }
}

/// Field bundle for one ledger write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntryDraft {
    /// Answering user.
    pub user_id: UserId,
    /// Answered question.
    pub question_id: Uuid,
    /// Option the user chose.
    pub chosen_option: OptionLabel,
    /// Whether the chosen option matched the answer key.
    pub correct: bool,
    /// Self-reported time to answer, in seconds.
    pub response_time_seconds: Option<i32>,
    /// When the submission was scored.
    pub answered_at: DateTime<Utc>,
}

/// Result of a ledger upsert: whether the store inserted a new row or
/// updated the pair's existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// `true` for a first submission, `false` for a resubmission.
    pub inserted: bool,
}

/// Port for ledger reads and the atomic pair-keyed upsert.
///
/// `upsert` must be a single conditional write at the store: when two
/// submissions race on the same pair, the store's uniqueness constraint
/// decides which one inserts, and the other updates. The engine performs no
/// locking of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponseLedger: Send + Sync {
    /// Whether a ledger entry exists for the pair.
    async fn exists(
        &self,
        user_id: &UserId,
        question_id: Uuid,
    ) -> Result<bool, ResponseLedgerError>;

    /// Insert the pair's entry, or overwrite it when the pair was already
    /// answered. Reports which of the two happened.
    async fn upsert(&self, entry: LedgerEntryDraft) -> Result<UpsertOutcome, ResponseLedgerError>;
}

/// Fixture implementation behaving like an always-empty ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureResponseLedger;

#[async_trait]
impl ResponseLedger for FixtureResponseLedger {
    async fn exists(
        &self,
        _user_id: &UserId,
        _question_id: Uuid,
    ) -> Result<bool, ResponseLedgerError> {
        Ok(false)
    }

    async fn upsert(&self, _entry: LedgerEntryDraft) -> Result<UpsertOutcome, ResponseLedgerError> {
        Ok(UpsertOutcome { inserted: true })
    }
}
