//! services/site/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification of the JSON endpoints.

use utoipa::OpenApi;

use crate::web::auth::{ErrorBody, LoginRequest, LoginResponse, UserBody};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
    ),
    components(
        schemas(LoginRequest, LoginResponse, UserBody, ErrorBody)
    ),
    tags(
        (name = "Healthbook Site API", description = "Mock authentication endpoints for the booking site.")
    )
)]
pub struct ApiDoc;
