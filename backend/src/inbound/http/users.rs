//! Account synchronisation endpoint.
//!
//! ```text
//! POST /api/v1/users/me/sync    (Authorization: Bearer <token>)
//! ```
//!
//! Clients call this after sign-in so the verified identity gets a local user
//! row; bookmark operations resolve the caller through that row.

use actix_web::{post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerContext;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Synced account payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Local user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Identity provider subject.
    #[schema(example = "user_2abc")]
    pub external_id: String,
    /// Display name from the identity provider.
    #[schema(example = "홍길동")]
    pub display_name: Option<String>,
    /// First sync time.
    #[schema(example = "2025-01-14T09:30:15Z")]
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            external_id: user.external_id().to_string(),
            display_name: user.display_name().map(ToString::to_string),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Create the caller's local account on first call, return it afterwards.
#[utoipa::path(
    post,
    path = "/api/v1/users/me/sync",
    responses(
        (status = 200, description = "Synced account", body = UserResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "syncCurrentUser",
    security(("BearerAuth" = []))
)]
#[post("/users/me/sync")]
pub async fn sync_current_user(
    state: web::Data<HttpState>,
    caller: CallerContext,
) -> ApiResult<web::Json<UserResponse>> {
    let identity = caller.require_identity()?;
    let user = state.users.sync(identity).await?;
    Ok(web::Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::MockUserSync;
    use crate::domain::{Error, UserId};
    use crate::inbound::http::test_utils::{bearer, fixture_ports, state_with};

    fn app_with(
        users: MockUserSync,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let mut ports = fixture_ports();
        ports.users = Arc::new(users);
        App::new()
            .app_data(web::Data::new(state_with(ports)))
            .service(web::scope("/api/v1").service(sync_current_user))
    }

    #[rstest]
    #[actix_web::test]
    async fn sync_returns_camel_case_user() {
        let mut users = MockUserSync::new();
        users
            .expect_sync()
            .withf(|identity| {
                identity.external_id.as_ref() == "user_2abc"
                    && identity.display_name.as_ref().map(AsRef::as_ref) == Some("홍길동")
            })
            .times(1)
            .returning(|identity| {
                Ok(User::new(
                    UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid"),
                    identity.external_id.clone(),
                    identity.display_name.clone(),
                    Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 15)
                        .single()
                        .expect("timestamp"),
                ))
            });
        let app = actix_test::init_service(app_with(users)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/me/sync")
            .insert_header(("authorization", bearer("user_2abc", Some("홍길동"))))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["id"], "3fa85f64-5717-4562-b3fc-2c963f66afa6");
        assert_eq!(body["externalId"], "user_2abc");
        assert_eq!(body["displayName"], "홍길동");
        assert_eq!(body["createdAt"], "2025-01-14T09:30:15+00:00");
        assert!(body.get("display_name").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn sync_without_token_is_unauthorised() {
        let mut users = MockUserSync::new();
        users.expect_sync().never();
        let app = actix_test::init_service(app_with(users)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/me/sync")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[rstest]
    #[actix_web::test]
    async fn store_outage_is_service_unavailable() {
        let mut users = MockUserSync::new();
        users
            .expect_sync()
            .returning(|_| Err(Error::service_unavailable("user repository unavailable")));
        let app = actix_test::init_service(app_with(users)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/me/sync")
            .insert_header(("authorization", bearer("user_2abc", None)))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
