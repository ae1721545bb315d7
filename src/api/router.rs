//! HTTP router for the complaint intake API.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Layers (outermost → innermost): CORS → request logging → handlers.

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::state::AppState;

/// Browser origins allowed by the CORS policy (the local frontend).
const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost", "http://localhost:3000"];

/// Build the API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
/// Trailing slashes are significant: creation routes keep their
/// trailing-slash form, list routes do not.
pub fn api_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(ALLOWED_ORIGINS.map(HeaderValue::from_static)))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/complaint-categories/", get(endpoints::categories::grouped))
        .route("/complainants/", post(endpoints::complainants::create))
        .route("/complainants", get(endpoints::complainants::list))
        .route("/complainants/:id", get(endpoints::complainants::fetch))
        .route("/complaints/", post(endpoints::complaints::create))
        .route("/complaints/:id", get(endpoints::complaints::fetch))
        .route("/patients", get(endpoints::patients::list))
        .route("/cases", get(endpoints::cases::list))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Settings;
    use crate::db::{self, repository};
    use crate::models::{Case, Complainant, ComplaintCategory, Patient};
    use crate::state::AppState;

    use super::*;

    /// State backed by a migrated tempdir database. The tempdir guard
    /// must be kept alive for the duration of the test.
    fn test_state() -> (Arc<AppState>, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let settings = Settings {
            database_path: tmp.path().join("intake.db"),
            ..Settings::default()
        };
        db::open_database(&settings.database_path).unwrap();
        (Arc::new(AppState::new(settings)), tmp)
    }

    struct Fixtures {
        category: ComplaintCategory,
        complainant: Complainant,
        patient: Patient,
        other_patient: Patient,
        case: Case,
    }

    fn seed_fixtures(state: &AppState) -> Fixtures {
        let conn = state.open_db().unwrap();

        let category = ComplaintCategory {
            id: Uuid::new_v4(),
            main_category: "Clinical".into(),
            sub_category: "Diagnosis".into(),
        };
        repository::category::insert_category(&conn, &category).unwrap();

        let now = Utc::now();
        let complainant = Complainant {
            id: Uuid::new_v4(),
            name: "Jane Doe".into(),
            email: "jane.doe@example.com".into(),
            phone: None,
            address_line1: "1 High Street".into(),
            address_line2: None,
            city: "Leeds".into(),
            postcode: "LS1 1AA".into(),
            created_at: now,
            updated_at: now,
        };
        repository::complainant::insert_complainant(&conn, &complainant).unwrap();

        let patient = Patient {
            id: Uuid::new_v4(),
            name: "John Smith".into(),
            date_of_birth: Utc.with_ymd_and_hms(1985, 3, 15, 0, 0, 0).unwrap(),
        };
        let other_patient = Patient {
            id: Uuid::new_v4(),
            name: "Sarah Johnson".into(),
            date_of_birth: Utc.with_ymd_and_hms(1990, 7, 22, 0, 0, 0).unwrap(),
        };
        repository::patient::insert_patient(&conn, &patient).unwrap();
        repository::patient::insert_patient(&conn, &other_patient).unwrap();

        let case = Case {
            id: Uuid::new_v4(),
            case_reference: "CASE-2026-001-001".into(),
            patient_id: patient.id,
        };
        repository::case::insert_case(&conn, &case).unwrap();

        Fixtures {
            category,
            complainant,
            patient,
            other_patient,
            case,
        }
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(payload) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn complaint_payload(fixtures: &Fixtures, description: &str) -> Value {
        json!({
            "description": description,
            "category_id": fixtures.category.id,
            "complainant_id": fixtures.complainant.id,
            "patient_id": fixtures.patient.id,
            "case_id": fixtures.case.id,
        })
    }

    fn complaint_count(state: &AppState) -> i64 {
        let conn = state.open_db().unwrap();
        repository::complaint::count_complaints(&conn).unwrap()
    }

    #[tokio::test]
    async fn health_check_responds() {
        let (state, _tmp) = test_state();
        let router = api_router(state);

        let (status, body) = send(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_complaint_embeds_validated_relations() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state.clone());

        let (status, body) = send(
            &router,
            "POST",
            "/complaints/",
            Some(complaint_payload(&fixtures, "Diagnosis was delayed by three weeks")),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["description"], "Diagnosis was delayed by three weeks");
        assert_eq!(body["category"]["id"], fixtures.category.id.to_string());
        assert_eq!(body["complainant"]["id"], fixtures.complainant.id.to_string());
        assert_eq!(body["complainant"]["name"], "Jane Doe");
        assert_eq!(body["patient"]["id"], fixtures.patient.id.to_string());
        assert_eq!(body["case"]["id"], fixtures.case.id.to_string());
        assert_eq!(body["case"]["case_reference"], "CASE-2026-001-001");
        assert_eq!(complaint_count(&state), 1);
    }

    #[tokio::test]
    async fn unknown_category_rejected_without_write() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state.clone());

        let mut payload = complaint_payload(&fixtures, "Wrong dosage dispensed");
        payload["category_id"] = json!(Uuid::new_v4());

        let (status, body) = send(&router, "POST", "/complaints/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REFERENCE");
        assert_eq!(body["error"]["field"], "category");
        assert_eq!(complaint_count(&state), 0);
    }

    #[tokio::test]
    async fn unknown_complainant_rejected_without_write() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state.clone());

        let mut payload = complaint_payload(&fixtures, "Wrong dosage dispensed");
        payload["complainant_id"] = json!(Uuid::new_v4());

        let (status, body) = send(&router, "POST", "/complaints/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REFERENCE");
        assert_eq!(body["error"]["field"], "complainant");
        assert_eq!(complaint_count(&state), 0);
    }

    #[tokio::test]
    async fn unknown_patient_rejected_without_write() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state.clone());

        let mut payload = complaint_payload(&fixtures, "Wrong dosage dispensed");
        payload["patient_id"] = json!(Uuid::new_v4());

        let (status, body) = send(&router, "POST", "/complaints/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REFERENCE");
        assert_eq!(body["error"]["field"], "patient");
        assert_eq!(complaint_count(&state), 0);
    }

    #[tokio::test]
    async fn unknown_case_rejected_without_write() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state.clone());

        let mut payload = complaint_payload(&fixtures, "Wrong dosage dispensed");
        payload["case_id"] = json!(Uuid::new_v4());

        let (status, body) = send(&router, "POST", "/complaints/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REFERENCE");
        assert_eq!(body["error"]["field"], "case");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Unknown case_id"), "got: {message}");
        assert_eq!(complaint_count(&state), 0);
    }

    #[tokio::test]
    async fn case_owned_by_other_patient_rejected() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state.clone());

        // Both the case and the patient exist, but the case belongs to
        // a different patient.
        let mut payload = complaint_payload(&fixtures, "Wrong dosage dispensed");
        payload["patient_id"] = json!(fixtures.other_patient.id);

        let (status, body) = send(&router, "POST", "/complaints/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REFERENCE");
        assert_eq!(body["error"]["field"], "case");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("does not belong"), "got: {message}");
        assert_eq!(complaint_count(&state), 0);
    }

    #[tokio::test]
    async fn blank_description_rejected_without_write() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state.clone());

        let (status, body) = send(
            &router,
            "POST",
            "/complaints/",
            Some(complaint_payload(&fixtures, "   ")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EMPTY_DESCRIPTION");
        assert_eq!(complaint_count(&state), 0);
    }

    #[tokio::test]
    async fn repeated_valid_creation_yields_distinct_complaints() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state.clone());

        let payload = complaint_payload(&fixtures, "Appointment cancelled twice");
        let (status1, body1) = send(&router, "POST", "/complaints/", Some(payload.clone())).await;
        let (status2, body2) = send(&router, "POST", "/complaints/", Some(payload)).await;

        assert_eq!(status1, StatusCode::CREATED);
        assert_eq!(status2, StatusCode::CREATED);
        assert_ne!(body1["id"], body2["id"]);
        assert_eq!(complaint_count(&state), 2);
    }

    #[tokio::test]
    async fn fetch_complaint_embeds_relations() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state);

        let (_, created) = send(
            &router,
            "POST",
            "/complaints/",
            Some(complaint_payload(&fixtures, "Billing error on discharge")),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(&router, "GET", &format!("/complaints/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], "Billing error on discharge");
        assert_eq!(body["category"]["sub_category"], "Diagnosis");
        assert_eq!(body["patient"]["name"], "John Smith");
        assert_eq!(body["case"]["patient_id"], fixtures.patient.id.to_string());
    }

    #[tokio::test]
    async fn fetch_unknown_complaint_is_404() {
        let (state, _tmp) = test_state();
        let router = api_router(state);

        let (status, body) =
            send(&router, "GET", &format!("/complaints/{}", Uuid::new_v4()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn complainant_create_then_fetch_roundtrip() {
        let (state, _tmp) = test_state();
        let router = api_router(state);

        let (status, created) = send(
            &router,
            "POST",
            "/complainants/",
            Some(json!({
                "name": "Tom Hardwick",
                "email": "tom@example.com",
                "address_line1": "22 Mill Lane",
                "city": "Sheffield",
                "postcode": "S1 2BJ",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Tom Hardwick");
        assert!(created["phone"].is_null());

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(&router, "GET", &format!("/complainants/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["address_line1"], "22 Mill Lane");
        assert_eq!(fetched["created_at"], fetched["updated_at"]);
    }

    #[tokio::test]
    async fn fetch_unknown_complainant_is_404_not_500() {
        let (state, _tmp) = test_state();
        let router = api_router(state);

        let (status, body) =
            send(&router, "GET", &format!("/complainants/{}", Uuid::new_v4()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Complainant not found");
    }

    #[tokio::test]
    async fn malformed_complainant_id_is_bad_request() {
        let (state, _tmp) = test_state();
        let router = api_router(state);

        let (status, body) = send(&router, "GET", "/complainants/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn complainant_list_filters_on_name_or_email() {
        let (state, _tmp) = test_state();
        seed_fixtures(&state);
        let router = api_router(state);

        let (status, all) = send(&router, "GET", "/complainants", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 1);

        let (_, by_name) = send(&router, "GET", "/complainants?q=JANE", None).await;
        assert_eq!(by_name.as_array().unwrap().len(), 1);

        let (_, by_email) = send(&router, "GET", "/complainants?q=example.com", None).await;
        assert_eq!(by_email.as_array().unwrap().len(), 1);

        // No match is an empty 200, not an error
        let (status, none) = send(&router, "GET", "/complainants?q=zzz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(none.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn grouped_categories_keep_first_seen_order() {
        let (state, _tmp) = test_state();
        {
            let conn = state.open_db().unwrap();
            for (main, sub) in [
                ("Clinical", "Diagnosis"),
                ("Admin", "Billing"),
                ("Clinical", "Medication"),
            ] {
                repository::category::insert_category(
                    &conn,
                    &ComplaintCategory {
                        id: Uuid::new_v4(),
                        main_category: main.into(),
                        sub_category: sub.into(),
                    },
                )
                .unwrap();
            }
        }
        let router = api_router(state);

        let (status, body) = send(&router, "GET", "/complaint-categories/", None).await;
        assert_eq!(status, StatusCode::OK);

        let groups = body.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["main_category"], "Clinical");
        let clinical: Vec<&str> = groups[0]["sub_categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(clinical, ["Diagnosis", "Medication"]);
        assert_eq!(groups[1]["main_category"], "Admin");
    }

    #[tokio::test]
    async fn empty_category_table_groups_to_empty_list() {
        let (state, _tmp) = test_state();
        let router = api_router(state);

        let (status, body) = send(&router, "GET", "/complaint-categories/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn patient_list_filters_on_name() {
        let (state, _tmp) = test_state();
        seed_fixtures(&state);
        let router = api_router(state);

        let (status, all) = send(&router, "GET", "/patients", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, filtered) = send(&router, "GET", "/patients?q=smith", None).await;
        let filtered = filtered.as_array().unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0]["name"], "John Smith");
    }

    #[tokio::test]
    async fn case_list_filters_on_patient() {
        let (state, _tmp) = test_state();
        let fixtures = seed_fixtures(&state);
        let router = api_router(state);

        let uri = format!("/cases?patient_id={}", fixtures.patient.id);
        let (status, filtered) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let filtered = filtered.as_array().unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0]["case_reference"], "CASE-2026-001-001");

        let uri = format!("/cases?patient_id={}", fixtures.other_patient.id);
        let (status, empty) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(empty.as_array().unwrap().is_empty());
    }
}
