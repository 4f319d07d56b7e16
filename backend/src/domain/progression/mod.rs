//! Answer-submission and progression engine.
//!
//! Scores a submission against the question's answer key, records it in the
//! response ledger (at most one entry per user/question pair), awards XP, and
//! re-evaluates the user's rank tier. All validation happens before any
//! write, so a failed submission leaves no partial state and a retried one is
//! absorbed by the ledger upsert.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{
    LedgerEntryDraft, QuestionRepository, QuestionRepositoryError, RankTierRepository,
    RankTierRepositoryError, ResponseLedger, ResponseLedgerError, SubmissionService,
    SubmitAnswerRequest, SubmitAnswerResponse, UserRepository, UserRepositoryError,
};
use crate::domain::{Question, RankTier, User};

/// Maximum distinct questions a free-tier user may answer.
pub const FREE_TIER_QUESTION_QUOTA: i64 = 10;

/// XP granted for a correct first submission.
pub const CORRECT_ANSWER_XP: i64 = 20;

fn map_question_error(error: QuestionRepositoryError) -> Error {
    match error {
        QuestionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionRepositoryError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_ledger_error(error: ResponseLedgerError) -> Error {
    match error {
        ResponseLedgerError::Connection { message } => {
            Error::service_unavailable(format!("response ledger unavailable: {message}"))
        }
        ResponseLedgerError::Query { message } => {
            Error::internal(format!("response ledger error: {message}"))
        }
    }
}

fn map_rank_error(error: RankTierRepositoryError) -> Error {
    match error {
        RankTierRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("rank tier repository unavailable: {message}"))
        }
        RankTierRepositoryError::Query { message } => {
            Error::internal(format!("rank tier repository error: {message}"))
        }
        RankTierRepositoryError::Integrity { message } => {
            Error::internal(format!("rank tier table invalid: {message}"))
        }
    }
}

/// Progression engine implementing the submission driving port.
#[derive(Clone)]
pub struct ProgressionService<Q, U, R, L> {
    questions: Arc<Q>,
    users: Arc<U>,
    rank_tiers: Arc<R>,
    ledger: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<Q, U, R, L> ProgressionService<Q, U, R, L> {
    /// Create a new engine over the four driven ports.
    pub fn new(
        questions: Arc<Q>,
        users: Arc<U>,
        rank_tiers: Arc<R>,
        ledger: Arc<L>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            questions,
            users,
            rank_tiers,
            ledger,
            clock,
        }
    }
}

impl<Q, U, R, L> ProgressionService<Q, U, R, L>
where
    Q: QuestionRepository,
    U: UserRepository,
    R: RankTierRepository,
    L: ResponseLedger,
{
    async fn load_question(&self, request: &SubmitAnswerRequest) -> Result<Question, Error> {
        let question = self
            .questions
            .find_active_by_id(request.question_id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| Error::not_found(format!("question {} not found", request.question_id)))?;

        if !question.has_option(request.chosen_option) {
            return Err(Error::invalid_request(
                "chosenOption must be one of the question's options",
            )
            .with_details(json!({
                "field": "chosenOption",
                "value": request.chosen_option.as_str(),
                "code": "unknown_option",
            })));
        }

        Ok(question)
    }

    async fn load_user(&self, request: &SubmitAnswerRequest) -> Result<User, Error> {
        let user = self
            .users
            .find_by_id(&request.user_id)
            .await
            .map_err(map_user_error)?
            .filter(User::is_active)
            .ok_or_else(|| Error::not_found(format!("user {} not found", request.user_id)))?;

        Ok(user)
    }

    /// Reject a new pair once a free-tier user has exhausted the quota.
    /// Resubmissions of an already-answered question never count.
    async fn enforce_quota(&self, request: &SubmitAnswerRequest, user: &User) -> Result<(), Error> {
        if user.is_premium() || user.answered_count() < FREE_TIER_QUESTION_QUOTA {
            return Ok(());
        }

        let already_answered = self
            .ledger
            .exists(&request.user_id, request.question_id)
            .await
            .map_err(map_ledger_error)?;
        if already_answered {
            return Ok(());
        }

        Err(
            Error::quota_exceeded("free tier question limit reached").with_details(json!({
                "quota": FREE_TIER_QUESTION_QUOTA,
                "answeredCount": user.answered_count(),
            })),
        )
    }

    /// Re-evaluate the rank after an XP change; persists and returns the new
    /// tier when the user crossed a threshold.
    async fn evaluate_rank(&self, user: &User) -> Result<Option<RankTier>, Error> {
        let ladder = self.rank_tiers.load_ladder().await.map_err(map_rank_error)?;
        let Some(tier) = ladder.rank_for_xp(user.xp()) else {
            return Ok(None);
        };
        if user.rank_id() == Some(tier.id) {
            return Ok(None);
        }

        self.users
            .set_rank(user.id(), tier.id)
            .await
            .map_err(map_user_error)?;
        Ok(Some(tier.clone()))
    }
}

#[async_trait]
impl<Q, U, R, L> SubmissionService for ProgressionService<Q, U, R, L>
where
    Q: QuestionRepository,
    U: UserRepository,
    R: RankTierRepository,
    L: ResponseLedger,
{
    async fn submit_answer(
        &self,
        request: SubmitAnswerRequest,
    ) -> Result<SubmitAnswerResponse, Error> {
        let question = self.load_question(&request).await?;
        let user = self.load_user(&request).await?;
        self.enforce_quota(&request, &user).await?;

        let correct = question.is_correct(request.chosen_option);

        // The store's pair-keyed uniqueness constraint decides first
        // submission vs. resubmission, not engine-side locking.
        let outcome = self
            .ledger
            .upsert(LedgerEntryDraft {
                user_id: request.user_id.clone(),
                question_id: request.question_id,
                chosen_option: request.chosen_option,
                correct,
                response_time_seconds: request.response_time_seconds,
                answered_at: self.clock.utc(),
            })
            .await
            .map_err(map_ledger_error)?;

        if !outcome.inserted {
            return Ok(SubmitAnswerResponse {
                correct,
                answer_key: question.answer_key(),
                chosen_option: request.chosen_option,
                xp_awarded: 0,
                new_total_xp: user.xp(),
                answered_count: user.answered_count(),
                new_rank: None,
                was_resubmission: true,
            });
        }

        let xp_awarded = if correct { CORRECT_ANSWER_XP } else { 0 };
        let updated = self
            .users
            .record_first_answer(&request.user_id, xp_awarded)
            .await
            .map_err(map_user_error)?;

        let new_rank = if xp_awarded > 0 {
            self.evaluate_rank(&updated).await?
        } else {
            None
        };

        Ok(SubmitAnswerResponse {
            correct,
            answer_key: question.answer_key(),
            chosen_option: request.chosen_option,
            xp_awarded,
            new_total_xp: updated.xp(),
            answered_count: updated.answered_count(),
            new_rank,
            was_resubmission: false,
        })
    }
}

#[cfg(test)]
mod tests;
