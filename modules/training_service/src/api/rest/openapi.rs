//! OpenAPI document for the REST DTOs

use super::dto::*;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct BearerAddon;

impl Modify for BearerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /auth/login"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAddon),
    info(title = "Training portal API"),
    security(("BearerToken" = [])),
    components(schemas(
        LoginRequest,
        LoginResponse,
        UserDto,
        CreateUserRequest,
        UpdateUserRequest,
        ChangePasswordRequest,
        UsersListResponse,
        TerminationDto,
        TerminationsListResponse,
        AgentIdPreviewDto,
        AssignAgentIdRequest,
        AgentIdAssignmentDto,
        VideoDto,
        CreateVideoRequest,
        UpdateVideoRequest,
        VideosListResponse,
        MarkCompleteRequest,
        VideoProgressDto,
        ProgressListResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_are_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        for name in [
            "UserDto",
            "VideoDto",
            "AgentIdPreviewDto",
            "LoginResponse",
            "VideoProgressDto",
        ] {
            assert!(components.schemas.contains_key(name), "missing {name}");
        }
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
