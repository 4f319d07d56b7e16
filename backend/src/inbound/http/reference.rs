//! Reference-data HTTP handlers.
//!
//! ```text
//! GET  /api/v1/reference/subjects
//! GET  /api/v1/reference/boards
//! GET  /api/v1/reference/agencies
//! GET  /api/v1/reference/subjects/{subjectId}/topics
//! POST /api/v1/admin/reference-cache/invalidations
//! ```
//!
//! Reads are served through the category cache. The invalidation endpoint is
//! the synchronous hook admin CRUD calls after mutating any reference table;
//! role enforcement for it lives in the surrounding admin middleware, not
//! here.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Agency, Board, Subject, Topic};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Subject payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectBody {
    /// Subject identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Discipline grouping.
    pub discipline: String,
}

/// Examining board payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardBody {
    /// Board identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Agency payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgencyBody {
    /// Agency identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Topic payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicBody {
    /// Topic identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Owning subject.
    #[schema(format = "uuid")]
    pub subject_id: String,
    /// Display name.
    pub name: String,
}

impl From<Subject> for SubjectBody {
    fn from(value: Subject) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            discipline: value.discipline,
        }
    }
}

impl From<Board> for BoardBody {
    fn from(value: Board) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
        }
    }
}

impl From<Agency> for AgencyBody {
    fn from(value: Agency) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
        }
    }
}

impl From<Topic> for TopicBody {
    fn from(value: Topic) -> Self {
        Self {
            id: value.id.to_string(),
            subject_id: value.subject_id.to_string(),
            name: value.name,
        }
    }
}

/// List all subjects.
#[utoipa::path(
    get,
    path = "/api/v1/reference/subjects",
    responses(
        (status = 200, description = "Subjects listed", body = [SubjectBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listSubjects",
    security([])
)]
#[get("/reference/subjects")]
pub async fn list_subjects(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<SubjectBody>>> {
    let subjects = state.reference.list_subjects().await?;
    Ok(web::Json(
        subjects.into_iter().map(SubjectBody::from).collect(),
    ))
}

/// List all examining boards.
#[utoipa::path(
    get,
    path = "/api/v1/reference/boards",
    responses(
        (status = 200, description = "Boards listed", body = [BoardBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listBoards",
    security([])
)]
#[get("/reference/boards")]
pub async fn list_boards(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BoardBody>>> {
    let boards = state.reference.list_boards().await?;
    Ok(web::Json(boards.into_iter().map(BoardBody::from).collect()))
}

/// List all agencies.
#[utoipa::path(
    get,
    path = "/api/v1/reference/agencies",
    responses(
        (status = 200, description = "Agencies listed", body = [AgencyBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listAgencies",
    security([])
)]
#[get("/reference/agencies")]
pub async fn list_agencies(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<AgencyBody>>> {
    let agencies = state.reference.list_agencies().await?;
    Ok(web::Json(
        agencies.into_iter().map(AgencyBody::from).collect(),
    ))
}

/// List the topics of one subject.
#[utoipa::path(
    get,
    path = "/api/v1/reference/subjects/{subjectId}/topics",
    params(("subjectId" = String, Path, description = "Owning subject")),
    responses(
        (status = 200, description = "Topics listed", body = [TopicBody]),
        (status = 400, description = "Invalid subject id", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listTopics",
    security([])
)]
#[get("/reference/subjects/{subjectId}/topics")]
pub async fn list_topics(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TopicBody>>> {
    let subject_id = parse_uuid(path.into_inner(), FieldName::new("subjectId"))?;
    let topics = state.reference.list_topics(subject_id).await?;
    Ok(web::Json(topics.into_iter().map(TopicBody::from).collect()))
}

/// Drop every cached reference listing.
///
/// Admin CRUD for subjects, boards, agencies, and topics calls this hook
/// synchronously after a successful mutation so subsequent reads refetch
/// from the source of truth.
#[utoipa::path(
    post,
    path = "/api/v1/admin/reference-cache/invalidations",
    responses(
        (status = 204, description = "Cache invalidated"),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "invalidateReferenceCache",
    security(("SessionCookie" = []))
)]
#[post("/admin/reference-cache/invalidations")]
pub async fn invalidate_reference_cache(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    state.reference_cache.invalidate_all();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "reference_tests.rs"]
mod tests;
