//! Answer submission HTTP handler.
//!
//! ```text
//! POST /api/v1/submissions
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{SubmitAnswerRequest, SubmitAnswerResponse};
use crate::domain::RankTier;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_option_label, parse_response_time, parse_uuid,
};

/// Request payload for submitting an answer.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequestBody {
    /// Question being answered.
    #[schema(format = "uuid")]
    pub question_id: String,
    /// Chosen option label, "A" through "E".
    #[schema(example = "B")]
    pub chosen_option: String,
    /// Self-reported time to answer, in seconds.
    pub response_time_seconds: Option<i32>,
}

/// Rank tier payload returned on promotion.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankTierBody {
    /// Tier identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Tier display name.
    pub name: String,
    /// Minimum XP required to hold the tier.
    pub xp_threshold: i64,
}

/// Response payload for a scored submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerResponseBody {
    /// Whether the chosen option matched the answer key.
    pub correct: bool,
    /// The question's answer key, revealed after scoring.
    pub answer_key: String,
    /// Option the user chose.
    pub chosen_option: String,
    /// XP granted by this submission.
    pub xp_awarded: i64,
    /// The user's XP after this submission.
    pub new_total_xp: i64,
    /// The user's distinct-question counter after this submission.
    pub answered_count: i64,
    /// Newly attained rank tier, when a threshold was crossed.
    pub new_rank: Option<RankTierBody>,
    /// Whether this overwrote an earlier answer to the same question.
    pub was_resubmission: bool,
}

impl From<RankTier> for RankTierBody {
    fn from(value: RankTier) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            xp_threshold: value.xp_threshold,
        }
    }
}

impl From<SubmitAnswerResponse> for SubmitAnswerResponseBody {
    fn from(value: SubmitAnswerResponse) -> Self {
        Self {
            correct: value.correct,
            answer_key: value.answer_key.to_string(),
            chosen_option: value.chosen_option.to_string(),
            xp_awarded: value.xp_awarded,
            new_total_xp: value.new_total_xp,
            answered_count: value.answered_count,
            new_rank: value.new_rank.map(RankTierBody::from),
            was_resubmission: value.was_resubmission,
        }
    }
}

/// Score an answer for the authenticated user.
///
/// Resubmitting an already-answered question rescores it in place without
/// re-counting it against the free-tier quota or re-awarding XP.
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    request_body = SubmitAnswerRequestBody,
    responses(
        (status = 200, description = "Submission scored", body = SubmitAnswerResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Free-tier quota exhausted", body = ErrorSchema),
        (status = 404, description = "Question or user not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["submissions"],
    operation_id = "submitAnswer",
    security(("SessionCookie" = []))
)]
#[post("/submissions")]
pub async fn submit_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitAnswerRequestBody>,
) -> ApiResult<web::Json<SubmitAnswerResponseBody>> {
    let user_id = session.require_user_id()?;
    let SubmitAnswerRequestBody {
        question_id,
        chosen_option,
        response_time_seconds,
    } = payload.into_inner();

    let request = SubmitAnswerRequest {
        user_id,
        question_id: parse_uuid(question_id, FieldName::new("questionId"))?,
        chosen_option: parse_option_label(chosen_option, FieldName::new("chosenOption"))?,
        response_time_seconds: parse_response_time(
            response_time_seconds,
            FieldName::new("responseTimeSeconds"),
        )?,
    };

    let response = state.submissions.submit_answer(request).await?;
    Ok(web::Json(SubmitAnswerResponseBody::from(response)))
}

#[cfg(test)]
#[path = "submissions_tests.rs"]
mod tests;
