use utoipa::{Modify, OpenApi};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};


pub struct CookieAuthModifier;

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(schema) = openapi.components.as_mut() {
            schema.add_security_scheme("cookie", SecurityScheme::ApiKey(
                    ApiKey::Cookie(ApiKeyValue::with_description("SID", "JWT token carrying the actor id and role"))
            ));
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::modules::modules_list_handler,
        crate::web::routes::modules::modules_get_handler,
        crate::web::routes::modules::modules_toggle_handler,
        crate::web::routes::modules::modules_edit_handler,
        crate::web::routes::modules::modules_draft_handler,
        crate::web::routes::modules::modules_save_handler,
        crate::web::routes::modules::modules_cancel_handler,
        crate::web::routes::resources::resources_list_handler,
        crate::web::routes::resources::resources_upload_handler,
    ),
    modifiers(&CookieAuthModifier),
)]
pub struct ApiDoc;
