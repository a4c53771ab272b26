//! Authentication routes: signup, login, logout and session check

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use rand::seq::SliceRandom;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    AuthState,
    error::AuthError,
    middleware::{CurrentUser, require_auth},
    models::{LoginRequest, NewUser, SignupRequest, UserProfile},
    password,
    repositories::CreateUserError,
    validation::{validate_email, validate_password, validate_username},
};

/// Avatars assigned to new accounts
const PROFILE_PICS: [&str; 3] = ["/avatar1.png", "/avatar2.png", "/avatar3.png"];

/// Create the router for the authentication routes
///
/// `/authCheck` sits behind the access guard; the other routes are public.
pub fn create_router(state: AuthState) -> Router {
    let protected_routes = Router::new()
        .route("/authCheck", get(auth_check))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(protected_routes)
        .with_state(state)
}

/// User signup endpoint
pub async fn signup(
    State(state): State<AuthState>,
    jar: CookieJar,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(payload) = payload?;
    let email = payload.email.trim().to_string();
    let username = payload.username.trim().to_string();
    let password = payload.password;

    info!("Signup attempt for email: {}", email);

    if email.is_empty() || username.is_empty() || password.is_empty() {
        return Err(AuthError::BadRequest("All fields are required".to_string()));
    }

    validate_email(&email).map_err(AuthError::BadRequest)?;
    validate_password(&password).map_err(AuthError::BadRequest)?;
    validate_username(&username).map_err(AuthError::BadRequest)?;

    let existing_email = state.user_store.find_by_email(&email).await.map_err(|e| {
        error!("Failed to look up email {}: {}", email, e);
        AuthError::InternalServerError
    })?;
    if existing_email.is_some() {
        return Err(AuthError::BadRequest("Email already exists".to_string()));
    }

    let existing_username = state
        .user_store
        .find_by_username(&username)
        .await
        .map_err(|e| {
            error!("Failed to look up username {}: {}", username, e);
            AuthError::InternalServerError
        })?;
    if existing_username.is_some() {
        return Err(AuthError::BadRequest("Username already exists".to_string()));
    }

    let password_hash = password::hash_password(&password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        AuthError::InternalServerError
    })?;

    let image = PROFILE_PICS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PROFILE_PICS[0])
        .to_string();

    let user = state
        .user_store
        .create(&NewUser {
            username,
            email,
            password_hash,
            image,
        })
        .await
        .map_err(|e| match e {
            // A concurrent signup claimed the email or username after the checks above
            CreateUserError::DuplicateEmail(_) => {
                AuthError::BadRequest("Email already exists".to_string())
            }
            CreateUserError::DuplicateUsername(_) => {
                AuthError::BadRequest("Username already exists".to_string())
            }
            CreateUserError::Other(e) => {
                error!("Failed to create user: {}", e);
                AuthError::InternalServerError
            }
        })?;

    let jar = issue_session_cookie(&state, jar, &user.id)?;
    info!("User created: {}", user.id);

    Ok((
        jar,
        Json(json!({ "success": true, "user": UserProfile::from(user) })),
    ))
}

/// User login endpoint
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(payload) = payload?;
    let email = payload.email.trim();
    info!("Login attempt for email: {}", email);

    if email.is_empty() || payload.password.is_empty() {
        return Err(AuthError::BadRequest("All fields are required".to_string()));
    }

    let user = state
        .user_store
        .find_by_email(email)
        .await
        .map_err(|e| {
            error!("Failed to look up email {}: {}", email, e);
            AuthError::InternalServerError
        })?
        .ok_or_else(|| {
            warn!("Login failed, unknown email: {}", email);
            AuthError::InvalidCredentials
        })?;

    let password_matches =
        password::verify_password(&user.password_hash, &payload.password).map_err(|e| {
            error!("Failed to verify password for {}: {}", user.id, e);
            AuthError::InternalServerError
        })?;
    if !password_matches {
        warn!("Login failed, wrong password for user: {}", user.id);
        return Err(AuthError::InvalidCredentials);
    }

    let jar = issue_session_cookie(&state, jar, &user.id)?;

    Ok((
        jar,
        Json(json!({ "success": true, "user": UserProfile::from(user) })),
    ))
}

/// Logout endpoint
///
/// Only clears the cookie; the token stays valid until it expires.
pub async fn logout(State(state): State<AuthState>, jar: CookieJar) -> impl IntoResponse {
    info!("Logout request");

    (
        jar.add(state.cookie_config.removal_cookie()),
        Json(json!({ "success": true, "message": "Logged out successfully" })),
    )
}

/// Session check endpoint
pub async fn auth_check(Extension(CurrentUser(user)): Extension<CurrentUser>) -> impl IntoResponse {
    Json(json!({ "success": true, "user": user }))
}

fn issue_session_cookie(
    state: &AuthState,
    jar: CookieJar,
    user_id: &uuid::Uuid,
) -> Result<CookieJar, AuthError> {
    let token = state.jwt_service.issue(*user_id).map_err(|e| {
        error!("Failed to issue session token: {}", e);
        AuthError::InternalServerError
    })?;

    Ok(jar.add(state.cookie_config.session_cookie(token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        jwt::{JwtConfig, JwtService},
        models::User,
        repositories::{InMemoryUserStore, UserStore},
        session::{CookieConfig, SESSION_COOKIE},
    };
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode, header},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> (AuthState, InMemoryUserStore) {
        let store = InMemoryUserStore::new();
        let state = AuthState {
            jwt_service: JwtService::new(JwtConfig::new("routes-secret")).unwrap(),
            user_store: Arc::new(store.clone()),
            cookie_config: CookieConfig::default(),
        };
        (state, store)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn session_cookie(response: &Response<Body>) -> Option<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(SESSION_COOKIE))
            .map(|value| value.split(';').next().unwrap_or_default().to_string())
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn signup(app: &Router, email: &str, username: &str, password: &str) -> Response<Body> {
        app.clone()
            .oneshot(post_json(
                "/signup",
                json!({ "email": email, "username": username, "password": password }),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_signup_then_auth_check() {
        let (state, _) = state();
        let app = create_router(state);

        let response = signup(&app, "a@b.com", "a", "secret1").await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response).expect("session cookie set");
        let body = body_json(response).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "a@b.com");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("password_hash").is_none());
        let image = body["user"]["image"].as_str().unwrap();
        assert!(PROFILE_PICS.iter().any(|pic| *pic == image));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/authCheck")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let check = body_json(response).await;
        assert_eq!(check["user"]["id"], body["user"]["id"]);
    }

    #[tokio::test]
    async fn test_signup_rejects_missing_fields() {
        let (state, _) = state();
        let app = create_router(state);

        let response = app
            .oneshot(post_json("/signup", json!({ "email": "a@b.com" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "All fields are required" })
        );
    }

    #[tokio::test]
    async fn test_signup_validation_messages() {
        let (state, _) = state();
        let app = create_router(state);

        let response = signup(&app, "not-an-email", "a", "secret1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Invalid email");

        let response = signup(&app, "a@b.com", "a", "12345").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Password must be at least 6 characters"
        );
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicates() {
        let (state, store) = state();
        let app = create_router(state);

        assert_eq!(
            signup(&app, "a@b.com", "a", "secret1").await.status(),
            StatusCode::OK
        );

        let response = signup(&app, "a@b.com", "other", "secret1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Email already exists");

        let response = signup(&app, "other@b.com", "a", "secret1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Username already exists");

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_login_sets_cookie() {
        let (state, _) = state();
        let app = create_router(state);
        signup(&app, "a@b.com", "a", "secret1").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/login",
                json!({ "email": "a@b.com", "password": "secret1" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).is_some());
        assert_eq!(body_json(response).await["user"]["username"], "a");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (state, _) = state();
        let app = create_router(state);
        signup(&app, "a@b.com", "a", "secret1").await;

        for body in [
            json!({ "email": "a@b.com", "password": "wrong-password" }),
            json!({ "email": "nobody@b.com", "password": "secret1" }),
        ] {
            let response = app.clone().oneshot(post_json("/login", body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(session_cookie(&response).is_none());
            assert_eq!(
                body_json(response).await,
                json!({ "success": false, "message": "Invalid credentials" })
            );
        }
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (state, _) = state();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("jwt-netflix=;"));
        assert!(set_cookie.contains("Max-Age=0"));
        assert_eq!(body_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn test_auth_check_requires_cookie() {
        let (state, _) = state();
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/authCheck")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_duplicate_signups() {
        let (state, store) = state();
        let app = create_router(state);

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let app = app.clone();
                tokio::spawn(async move {
                    let response = signup(&app, "race@b.com", "racer", "secret1").await;
                    let status = response.status();
                    (status, body_json(response).await)
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results.sort_by_key(|(status, _)| status.as_u16());

        assert_eq!(results[0].0, StatusCode::OK);
        assert_eq!(results[1].0, StatusCode::BAD_REQUEST);
        assert_eq!(
            results[1].1,
            json!({ "success": false, "message": "Email already exists" })
        );
        assert_eq!(store.len().await, 1);
    }

    /// Store whose lookups miss but whose insert loses a uniqueness race
    struct LateConflictStore(fn() -> CreateUserError);

    #[async_trait]
    impl UserStore for LateConflictStore {
        async fn find_by_id(&self, _: uuid::Uuid) -> anyhow::Result<Option<User>> {
            Ok(None)
        }
        async fn find_by_email(&self, _: &str) -> anyhow::Result<Option<User>> {
            Ok(None)
        }
        async fn find_by_username(&self, _: &str) -> anyhow::Result<Option<User>> {
            Ok(None)
        }
        async fn create(&self, _: &NewUser) -> Result<User, CreateUserError> {
            Err((self.0)())
        }
    }

    #[tokio::test]
    async fn test_insert_conflicts_map_to_bad_request() {
        let cases: [(fn() -> CreateUserError, StatusCode, &str); 3] = [
            (
                || CreateUserError::DuplicateEmail("a@b.com".to_string()),
                StatusCode::BAD_REQUEST,
                "Email already exists",
            ),
            (
                || CreateUserError::DuplicateUsername("a".to_string()),
                StatusCode::BAD_REQUEST,
                "Username already exists",
            ),
            (
                || CreateUserError::Other(anyhow::anyhow!("connection reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        ];

        for (conflict, status, message) in cases {
            let (mut state, _) = state();
            state.user_store = Arc::new(LateConflictStore(conflict));
            let app = create_router(state);

            let response = signup(&app, "a@b.com", "a", "secret1").await;
            assert_eq!(response.status(), status);
            assert!(session_cookie(&response).is_none());
            assert_eq!(
                body_json(response).await,
                json!({ "success": false, "message": message })
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_json_gets_envelope() {
        let (state, _) = state();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn test_missing_content_type_gets_envelope() {
        let (state, _) = state();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .body(Body::from(
                        json!({ "email": "a@b.com", "password": "secret1" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().is_some_and(|m| m.contains("Content-Type")));
    }
}
