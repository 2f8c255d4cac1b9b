//! User handlers.
//!
//! Each handler extracts its parameters and calls the repository directly;
//! absent rows map to 404 through [`OptionExt::ok_or_not_found`].

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::config::{USER_ITEM_PATH, USER_RESOURCE_PATH};
use crate::domain::{User, UserPayload};
use crate::errors::{AppError, AppResult, OptionExt};

/// Status, `Location` header and body of a 201 reply
type CreatedAt<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(USER_RESOURCE_PATH, get(list_users).post(create_user))
        .route(
            USER_ITEM_PATH,
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Location of a user resource
pub fn user_location(id: i32) -> String {
    format!("{}/{}", USER_RESOURCE_PATH, id)
}

fn created_at<T>(id: i32, body: T) -> CreatedAt<T> {
    (
        StatusCode::CREATED,
        [(header::LOCATION, user_location(id))],
        Json(body),
    )
}

/// List all users
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "Every stored user", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.users.list_all().await?;
    Ok(Json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<User>> {
    let user = state.users.get_by_id(id).await?.ok_or_not_found()?;
    Ok(Json(user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Malformed or null body")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Option<UserPayload>>,
) -> AppResult<CreatedAt<User>> {
    let user = state
        .users
        .create(payload)
        .await?
        .ok_or_else(|| AppError::bad_request("Request body must not be null"))?;

    Ok(created_at(user.id, user))
}

/// Update a user's name and country
#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 201, description = "User updated, body is its id", body = i32,
            headers(("Location" = String, description = "Path of the updated user"))),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(patch): JsonBody<UserPayload>,
) -> AppResult<CreatedAt<i32>> {
    let user = state.users.update(patch, id).await?.ok_or_not_found()?;
    Ok(created_at(user.id, user.id))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted, or no such user")
    )
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.users.delete(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use mockall::predicate::eq;
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    use super::*;
    use crate::api::create_router;
    use crate::config::Config;
    use crate::infra::{Database, MockUserRepository};

    fn test_user(id: i32) -> User {
        User {
            id,
            user_name: Some("alice".to_string()),
            country: Some("US".to_string()),
        }
    }

    fn app(repo: MockUserRepository) -> Router {
        let database = Arc::new(Database::from_connection(DatabaseConnection::Disconnected));
        let state = AppState::new(Arc::new(repo), database, &Config::default());
        create_router(state)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn list_returns_every_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all()
            .returning(|| Ok(vec![test_user(1), test_user(2)]));

        let response = app(repo)
            .oneshot(Request::get("/user").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let users: Vec<User> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn get_missing_user_is_404_with_empty_body() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(999999))
            .returning(|_| Ok(None));

        let response = app(repo)
            .oneshot(Request::get("/user/999999").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn get_with_non_integer_id_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().never();

        let response = app(repo)
            .oneshot(Request::get("/user/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_sets_location_from_assigned_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|payload| payload.as_ref() == Some(&UserPayload::new("alice", "US")))
            .returning(|_| Ok(Some(test_user(17))));

        let response = app(repo)
            .oneshot(json_request(
                "POST",
                "/user",
                r#"{"userName":"alice","country":"US"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/user/17");
        let user: User = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(user, test_user(17));
    }

    #[tokio::test]
    async fn create_with_null_body_is_bad_request() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .with(eq(None::<UserPayload>))
            .returning(|_| Ok(None));

        let response = app(repo)
            .oneshot(json_request("POST", "/user", "null"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn create_with_malformed_body_never_reaches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let response = app(repo)
            .oneshot(json_request("POST", "/user", r#"{"userName": 5"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_uses_path_id_and_returns_it() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .withf(|patch, id| *id == 4 && patch.user_name.as_deref() == Some("alicia"))
            .returning(|patch, id| {
                Ok(Some(User {
                    id,
                    user_name: patch.user_name,
                    country: patch.country,
                }))
            });

        let response = app(repo)
            .oneshot(json_request(
                "PUT",
                "/user/4",
                r#"{"id":99,"userName":"alicia","country":"US"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/user/4");
        assert_eq!(body_bytes(response).await, b"4");
    }

    #[tokio::test]
    async fn update_missing_user_is_404() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().returning(|_, _| Ok(None));

        let response = app(repo)
            .oneshot(json_request(
                "PUT",
                "/user/8",
                r#"{"userName":"nobody","country":"US"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn update_with_malformed_body_never_reaches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().never();

        let response = app(repo)
            .oneshot(json_request("PUT", "/user/4", r#"{"userName": ["alicia"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn create_without_json_content_type_is_415() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let response = app(repo)
            .oneshot(
                Request::post("/user")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from(r#"{"userName":"alice","country":"US"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn health_reports_unreachable_database_as_503() {
        let repo = MockUserRepository::new();

        let response = app(repo)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["services"]["database"]["status"], "unhealthy");
        assert!(body["services"]["database"]["error"].is_string());
    }

    #[tokio::test]
    async fn delete_is_ok_whether_or_not_user_exists() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq(12))
            .times(1)
            .returning(|_| Ok(()));

        let response = app(repo)
            .oneshot(Request::delete("/user/12").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all()
            .returning(|| Err(AppError::Database(sea_orm::DbErr::Custom("boom".into()))));

        let response = app(repo)
            .oneshot(Request::get("/user").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["message"], "A database error occurred");
    }
}
