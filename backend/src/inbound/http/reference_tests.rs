//! Tests for the reference-data HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test, web};
use serde_json::Value;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockReferenceCacheControl, MockReferenceQuery, MockSubmissionService,
};
use crate::domain::Error;
use crate::inbound::http::test_utils::test_session_middleware;

fn state_with(
    reference: MockReferenceQuery,
    cache: MockReferenceCacheControl,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(MockSubmissionService::new()),
        Arc::new(reference),
        Arc::new(cache),
    ))
}

macro_rules! reference_app {
    ($state:expr) => {
        test::init_service(
            App::new().app_data($state).service(
                web::scope("/api/v1")
                    .wrap(test_session_middleware())
                    .route(
                        "/test-login",
                        web::post().to(
                            |session: crate::inbound::http::session::SessionContext| async move {
                                let id = crate::domain::UserId::random();
                                session.persist_user(&id)?;
                                Ok::<_, Error>(HttpResponse::Ok())
                            },
                        ),
                    )
                    .service(list_subjects)
                    .service(list_boards)
                    .service(list_agencies)
                    .service(list_topics)
                    .service(invalidate_reference_cache),
            ),
        )
    };
}

#[actix_web::test]
async fn subjects_listing_serialises_records() {
    let mut reference = MockReferenceQuery::new();
    reference.expect_list_subjects().times(1).returning(|| {
        Ok(vec![Subject {
            id: Uuid::nil(),
            name: "Direito Penal".to_owned(),
            discipline: "Direito".to_owned(),
        }])
    });

    let app = reference_app!(state_with(reference, MockReferenceCacheControl::new())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/reference/subjects")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["name"], "Direito Penal");
    assert_eq!(body[0]["discipline"], "Direito");
}

#[actix_web::test]
async fn topics_listing_validates_the_subject_id() {
    let mut reference = MockReferenceQuery::new();
    reference.expect_list_topics().times(0);

    let app = reference_app!(state_with(reference, MockReferenceCacheControl::new())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/reference/subjects/banana/topics")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "subjectId");
}

#[actix_web::test]
async fn topics_listing_passes_the_subject_through() {
    let subject_id = Uuid::new_v4();
    let mut reference = MockReferenceQuery::new();
    reference
        .expect_list_topics()
        .times(1)
        .withf(move |requested| *requested == subject_id)
        .returning(|subject_id| {
            Ok(vec![Topic {
                id: Uuid::new_v4(),
                subject_id,
                name: "Crimes contra a pessoa".to_owned(),
            }])
        });

    let app = reference_app!(state_with(reference, MockReferenceCacheControl::new())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/reference/subjects/{subject_id}/topics"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["subjectId"], subject_id.to_string());
}

#[actix_web::test]
async fn store_outage_propagates_as_service_unavailable() {
    let mut reference = MockReferenceQuery::new();
    reference
        .expect_list_boards()
        .times(1)
        .returning(|| Err(Error::service_unavailable("reference repository unavailable")));

    let app = reference_app!(state_with(reference, MockReferenceCacheControl::new())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/reference/boards")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn invalidation_hook_requires_a_session() {
    let mut cache = MockReferenceCacheControl::new();
    cache.expect_invalidate_all().times(0);

    let app = reference_app!(state_with(MockReferenceQuery::new(), cache)).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/admin/reference-cache/invalidations")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn invalidation_hook_clears_the_cache_synchronously() {
    let mut cache = MockReferenceCacheControl::new();
    cache.expect_invalidate_all().times(1).return_const(());

    let app = reference_app!(state_with(MockReferenceQuery::new(), cache)).await;

    let login = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/v1/test-login").to_request(),
    )
    .await;
    let cookie = login
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/admin/reference-cache/invalidations")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
