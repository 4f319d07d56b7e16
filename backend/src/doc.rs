//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: endpoint paths from the inbound layer, domain schema
//! wrappers, and the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::reference::{AgencyBody, BoardBody, SubjectBody, TopicBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::submissions::{
    RankTierBody, SubmitAnswerRequestBody, SubmitAnswerResponseBody,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued at login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Patente backend API",
        description = "Answer submission, rank progression, and cached reference data."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::submissions::submit_answer,
        crate::inbound::http::reference::list_subjects,
        crate::inbound::http::reference::list_boards,
        crate::inbound::http::reference::list_agencies,
        crate::inbound::http::reference::list_topics,
        crate::inbound::http::reference::invalidate_reference_cache,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SubmitAnswerRequestBody,
        SubmitAnswerResponseBody,
        RankTierBody,
        SubjectBody,
        BoardBody,
        AgencyBody,
        TopicBody,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_includes_core_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/api/v1/submissions"));
        assert!(paths.contains_key("/api/v1/reference/subjects"));
        assert!(paths.contains_key("/api/v1/admin/reference-cache/invalidations"));
        assert!(paths.contains_key("/health/ready"));
    }
}
