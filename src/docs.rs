use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use campusgate_core::{AccessState, PermissionSnapshot};

use crate::modules::session::controller::ErrorResponse;
use crate::modules::session::model::{AccessCheckResponse, CheckAccessParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::session::controller::start_session,
        crate::modules::session::controller::get_session,
        crate::modules::session::controller::end_session,
        crate::modules::session::controller::check_access,
    ),
    components(
        schemas(
            PermissionSnapshot,
            AccessState,
            AccessCheckResponse,
            CheckAccessParams,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Session", description = "Permission sessions and access checks")
    ),
    info(
        title = "Campusgate API",
        version = "0.1.0",
        description = "Path-based page access control for the Campusgate learning portal.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
