//! services/site/src/web/auth.rs
//!
//! Mock authentication endpoints for login and logout.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use healthbook_core::{PortError, User};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};
use utoipa::ToSchema;

use crate::cookies::{cleared_session_cookie, session_cookie};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Reads the credentials out of any JSON value.
    ///
    /// Returns `None` when either field is missing or not a string; such a
    /// body is a failed sign-in, not a malformed request.
    fn from_json(body: &Value) -> Option<Self> {
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            email: field("email")?,
            password: field("password")?,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserBody {
    pub id: u32,
    pub name: String,
    pub email: String,
    /// One of `admin`, `doctor`, `client`, `guest`.
    pub role: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserBody,
    /// Access token issued by the credential backend.
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, message: &str) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/login - Check demo credentials and open a session
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; sets the session cookie", body = LoginResponse),
        (status = 400, description = "Body is not JSON", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ErrorResponse> {
    // 1. Parse the body. The Content-Type header is not checked.
    let json = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Null) | Err(_) => {
            debug!("login request body is not a JSON value");
            return Err(error_response(StatusCode::BAD_REQUEST, "Invalid request"));
        }
        Ok(json) => json,
    };

    // 2. Check credentials
    let checked = match LoginRequest::from_json(&json) {
        Some(req) => {
            state
                .credentials
                .verify_credentials(&req.email, &req.password)
                .await
        }
        None => Err(PortError::Unauthorized),
    };
    let user = checked.map_err(|e| match e {
        PortError::Unauthorized => error_response(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        other => {
            error!("Failed to verify credentials: {:?}", other);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed")
        }
    })?;

    // 3. Sign the session token
    let access_token = state.credentials.access_token_for(&user);
    let session_token = state.sessions.issue(&user, &access_token).map_err(|e| {
        error!("Failed to issue session token: {:?}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session")
    })?;

    // 4. Create session cookie
    let cookie = session_cookie(
        &state.config.session_cookie_name,
        &session_token,
        state.config.session_ttl,
        state.config.production,
    );

    info!(email = %user.email, role = %user.role, "user signed in");
    let response = LoginResponse {
        user: user.into(),
        token: access_token,
    };

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)))
}

/// POST /api/auth/logout - Clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout successful")
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookie = cleared_session_cookie(&state.config.session_cookie_name, state.config.production);
    (StatusCode::OK, [(header::SET_COOKIE, cookie)])
}
