//! Driving port for answer submission and progression.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, OptionLabel, RankTier, UserId};

/// One answer submission from an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    /// Authenticated user submitting the answer.
    pub user_id: UserId,
    /// Question being answered.
    pub question_id: Uuid,
    /// Option the user chose.
    pub chosen_option: OptionLabel,
    /// Self-reported time to answer, in seconds.
    pub response_time_seconds: Option<i32>,
}

/// Scored outcome of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerResponse {
    /// Whether the chosen option matched the answer key.
    pub correct: bool,
    /// The question's answer key, revealed after scoring.
    pub answer_key: OptionLabel,
    /// Option the user chose.
    pub chosen_option: OptionLabel,
    /// XP granted by this submission (zero for resubmissions and wrong
    /// answers).
    pub xp_awarded: i64,
    /// The user's XP after this submission.
    pub new_total_xp: i64,
    /// The user's distinct-question counter after this submission.
    pub answered_count: i64,
    /// Newly attained rank tier, when this submission crossed a threshold.
    pub new_rank: Option<RankTier>,
    /// `true` when the pair already had a ledger entry and it was updated in
    /// place.
    pub was_resubmission: bool,
}

/// Driving port: score a submission and persist its side effects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Evaluate the submission, record it in the ledger, and update the
    /// user's progression.
    ///
    /// # Errors
    /// - [`crate::domain::ErrorCode::NotFound`]: question or user absent or
    ///   inactive.
    /// - [`crate::domain::ErrorCode::InvalidRequest`]: the chosen option is
    ///   not one of the question's populated slots.
    /// - [`crate::domain::ErrorCode::QuotaExceeded`]: free-tier quota
    ///   reached on a genuinely new pair.
    /// - [`crate::domain::ErrorCode::ServiceUnavailable`] /
    ///   [`crate::domain::ErrorCode::InternalError`]: backing store
    ///   failures.
    async fn submit_answer(
        &self,
        request: SubmitAnswerRequest,
    ) -> Result<SubmitAnswerResponse, Error>;
}
