use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State, multipart::MultipartError},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};

use crate::{
    model::{Authorizer, Page, ResourceTyped, entity::Resource},
    notify::NotificationLog,
    uploader::{ResourceUploader, SelectedFile},
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::resources::{UploadForm, UploadResponse},
        error::ErrorResponse,
        middlewares,
        routes::PaginationQuery,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(resources_list_handler).post(resources_upload_handler))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/",
    description = "Page through the course resources in upload order",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Resources page", body = Page<Resource>),
        (status = 401, description = "You had to be authorized to do this", body = ErrorResponse),
    ),
    tag = "resources",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn resources_list_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;
    let page = state
        .mm()
        .store()
        .resources_page(query.limit(), query.offset());

    Ok((StatusCode::OK, Json(page)))
}

#[utoipa::path(
    post,
    path = "/api/v1/resources/",
    description = "Upload a file as a course resource",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Resource uploaded", body = UploadResponse),
        (status = 400, description = "File or name missing", body = ErrorResponse),
        (status = 403, description = "Only admins and instructors may upload", body = ErrorResponse),
        (status = 413, description = "Request exceeds the upload size limit", body = ErrorResponse),
        (status = 500, description = "Storage failed", body = ErrorResponse),
    ),
    tag = "resources",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn resources_upload_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    if !user.can_edit() {
        return Err(WebError::resource_forbidden(Resource::get_resource_type()));
    }

    let limit = state.max_upload_bytes();
    let mut name = None;
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        match field.name() {
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, limit))?;
                name = Some(text);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let media_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, limit))?;
                file = Some(SelectedFile::new(file_name, media_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let notifications = NotificationLog::new();
    let store = state.mm().store().clone();
    let mut uploader = ResourceUploader::new(
        state.storage(),
        Arc::new(notifications.clone()),
        move |resource| store.add_resource(resource),
    );

    uploader.open();
    if let Some(name) = name {
        uploader.set_name(name);
    }
    if let Some(file) = file {
        uploader.select_file(file);
    }

    let resource = uploader.upload().await?;
    let response = UploadResponse {
        resource,
        notifications: notifications.drain(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

fn multipart_error(error: MultipartError, limit: usize) -> WebError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        WebError::upload_too_large(limit)
    } else {
        WebError::upload_malformed(error.body_text())
    }
}
