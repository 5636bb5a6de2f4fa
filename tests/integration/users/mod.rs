//! User endpoint tests
//!
//! Covers the CRUD surface and its failure envelopes:
//! - GET /users (listing, pagination headers, authorization filter)
//! - POST /users, GET /users/{id}, PUT /users/{id}, DELETE /users/{id}

use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};

use crate::common::{self, get, json_request, request, TestApp};

mod test_index {
    use super::*;

    #[tokio::test]
    async fn test_listing_attaches_cars() {
        let app = TestApp::new();
        let owner = app.seed_user("Nelson", "nelson@example.com", "secret-pw").await;
        app.seed_car("NPQ-2001", owner.id).await;
        app.seed_car("NPQ-2002", owner.id).await;

        let (status, body) = common::send(app.router(), get("/users")).await;

        assert_eq!(status, StatusCode::OK);
        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["email"], "nelson@example.com");
        assert_eq!(users[0]["cars"].as_array().unwrap().len(), 2);
        assert!(users[0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_pagination_headers_bound_the_listing() {
        let app = TestApp::new();
        for i in 0..5 {
            app.seed_user("Emerson", &format!("emerson{i}@example.com"), "secret-pw")
                .await;
        }

        let req = Request::builder()
            .method(Method::GET)
            .uri("/users")
            .header("page_start", "2")
            .header("page_end", "2")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, body) = common::send(app.router(), req).await;

        assert_eq!(status, StatusCode::OK);
        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["email"], "emerson2@example.com");
    }

    #[tokio::test]
    async fn test_authorization_header_filters_to_one_user() {
        let app = TestApp::new();
        let first = app.seed_user("Jose", "jose@example.com", "secret-pw").await;
        app.seed_user("Carlos", "carlos@example.com", "secret-pw").await;
        app.seed_car("JCP-0001", first.id).await;

        let req = Request::builder()
            .method(Method::GET)
            .uri("/users")
            .header("authorization", first.id.to_string())
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, body) = common::send(app.router(), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "jose@example.com");
        assert_eq!(body["cars"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_filter_id_is_an_envelope() {
        let app = TestApp::new();

        let req = Request::builder()
            .method(Method::GET)
            .uri("/users")
            .header("authorization", "99")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, body) = common::send(app.router(), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["fields"], json!([]));
    }

    #[tokio::test]
    async fn test_non_numeric_filter_names_the_header() {
        let app = TestApp::new();

        let req = Request::builder()
            .method(Method::GET)
            .uri("/users")
            .header("authorization", "Bearer token")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, body) = common::send(app.router(), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"], json!(["authorization"]));
    }
}

mod test_store {
    use super::*;

    #[tokio::test]
    async fn test_store_then_show_round_trip() {
        let app = TestApp::new();

        let (status, created) = common::send(
            app.router(),
            json_request(
                Method::POST,
                "/users",
                &json!({"name": "Felipe", "email": "felipe@example.com", "password": "secret-pw"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_i64().unwrap();

        let (status, shown) = common::send(app.router(), get(&format!("/users/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(shown["name"], "Felipe");
        assert_eq!(shown["email"], "felipe@example.com");
        assert!(shown.get("password").is_none());
        assert!(shown.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_missing_fields_are_named_in_order() {
        let app = TestApp::new();

        let (status, body) = common::send(
            app.router(),
            json_request(Method::POST, "/users", &json!({"name": "Felipe"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["fields"], json!(["email", "password"]));
        // The submission is echoed back
        assert_eq!(body["payload"]["name"], "Felipe");
    }

    #[tokio::test]
    async fn test_undeclared_fields_are_dropped() {
        let app = TestApp::new();

        let (status, created) = common::send(
            app.router(),
            json_request(
                Method::POST,
                "/users",
                &json!({
                    "name": "Felipe",
                    "email": "felipe@example.com",
                    "password": "secret-pw",
                    "admin": true
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(created.get("admin").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_surfaces_the_conflict() {
        let app = TestApp::new();
        app.seed_user("Felipe", "felipe@example.com", "secret-pw").await;

        let (status, body) = common::send(
            app.router(),
            json_request(
                Method::POST,
                "/users",
                &json!({"name": "Other", "email": "felipe@example.com", "password": "secret-pw"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("users_email_key"));
    }

    #[tokio::test]
    async fn test_non_object_body_reports_the_parse_failure() {
        let app = TestApp::new();

        let (status, body) = common::send(
            app.router(),
            json_request(Method::POST, "/users", &json!("just a string")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["fields"], json!([]));
    }

    #[tokio::test]
    async fn test_invalid_email_fails_validation() {
        let app = TestApp::new();

        let (status, body) = common::send(
            app.router(),
            json_request(
                Method::POST,
                "/users",
                &json!({"name": "Felipe", "email": "not-an-email", "password": "secret-pw"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert!(body["message"].as_str().unwrap().contains("validation"));
    }
}

mod test_show {
    use super::*;

    #[tokio::test]
    async fn test_show_unknown_id_is_not_found() {
        let app = TestApp::new();

        let (status, body) = common::send(app.router(), get("/users/99")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["fields"], json!([]));
        assert!(body["message"].as_str().unwrap().contains("99"));
    }

    #[tokio::test]
    async fn test_show_non_numeric_id_names_the_field() {
        let app = TestApp::new();

        let (status, body) = common::send(app.router(), get("/users/abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"], json!(["id"]));
    }
}

mod test_update {
    use super::*;

    #[tokio::test]
    async fn test_update_patches_submitted_fields() {
        let app = TestApp::new();
        let user = app.seed_user("Rubens", "rubens@example.com", "secret-pw").await;

        let (status, body) = common::send(
            app.router(),
            json_request(
                Method::PUT,
                &format!("/users/{}", user.id),
                &json!({"payload": {"name": "Rubinho"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Rubinho");
        assert_eq!(body["email"], "rubens@example.com");
    }

    #[tokio::test]
    async fn test_update_without_payload_key_reports_empty_fields() {
        let app = TestApp::new();
        let user = app.seed_user("Rubens", "rubens@example.com", "secret-pw").await;

        let (status, body) = common::send(
            app.router(),
            json_request(
                Method::PUT,
                &format!("/users/{}", user.id),
                &json!({"name": "Rubinho"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["fields"], json!([]));
    }

    #[tokio::test]
    async fn test_update_unknown_id_echoes_the_payload() {
        let app = TestApp::new();

        let (status, body) = common::send(
            app.router(),
            json_request(
                Method::PUT,
                "/users/99",
                &json!({"payload": {"name": "Rubinho"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["payload"], json!({"name": "Rubinho"}));
        assert_eq!(body["fields"], json!(["email", "password"]));
    }

    #[tokio::test]
    async fn test_patch_works_like_put() {
        let app = TestApp::new();
        let user = app.seed_user("Rubens", "rubens@example.com", "secret-pw").await;

        let (status, body) = common::send(
            app.router(),
            json_request(
                Method::PATCH,
                &format!("/users/{}", user.id),
                &json!({"payload": {"email": "rubinho@example.com"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "rubinho@example.com");
    }
}

mod test_destroy {
    use super::*;

    #[tokio::test]
    async fn test_destroy_answers_no_content() {
        let app = TestApp::new();
        let user = app.seed_user("Rubens", "rubens@example.com", "secret-pw").await;

        let (status, body) = common::send(
            app.router(),
            request(Method::DELETE, &format!("/users/{}", user.id)),
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = common::send(app.router(), get(&format!("/users/{}", user.id))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_destroy_unknown_id_reports_not_found_with_empty_fields() {
        let app = TestApp::new();

        let (status, body) = common::send(app.router(), request(Method::DELETE, "/users/99")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["fields"], json!([]));
        assert!(body["message"].as_str().unwrap().contains("cannot find"));
    }

    #[tokio::test]
    async fn test_destroy_cascades_to_cars() {
        let app = TestApp::new();
        let user = app.seed_user("Rubens", "rubens@example.com", "secret-pw").await;
        let car = app.seed_car("RBC-0011", user.id).await;

        let (status, _) = common::send(
            app.router(),
            request(Method::DELETE, &format!("/users/{}", user.id)),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = common::send(app.router(), get(&format!("/cars/{}", car.id))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
