use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::{
    editor::ModuleView,
    model::{ResourceTyped, entity::{ModuleId, Resource}},
    web::{
        AppState, RequestContext, WebError, WebResult,
        dto::modules::{DraftEditBody, ModuleActionResponse},
        error::ErrorResponse,
        middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(modules_list_handler))
        .route("/{id}", get(modules_get_handler))
        .route("/{id}/toggle", post(modules_toggle_handler))
        .route("/{id}/edit", post(modules_edit_handler))
        .route("/{id}/draft", put(modules_draft_handler))
        .route("/{id}/save", post(modules_save_handler))
        .route("/{id}/cancel", post(modules_cancel_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/modules/",
    description = "List all modules as the current actor sees them",
    responses(
        (status = 200, description = "Successfully collected modules", body = Vec<ModuleView>),
        (status = 401, description = "You had to be authorized to do this", body = ErrorResponse),
    ),
    tag = "modules",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn modules_list_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let views = state.sessions().views(state.mm(), user).await;

    Ok((StatusCode::OK, Json(views)))
}

#[utoipa::path(
    get,
    path = "/api/v1/modules/{module_id}",
    description = "Fetch one module; while editing this is the draft",
    params(
        ("module_id" = u32, Path, description = "ID of the module")
    ),
    responses(
        (status = 200, description = "Module found", body = ModuleView),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
    ),
    tag = "modules",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn modules_get_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<ModuleId>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let view = state
        .sessions()
        .with_session(state.mm(), user, id, |session| Ok(session.editor().view()))
        .await?;

    Ok((StatusCode::OK, Json(view)))
}

#[utoipa::path(
    post,
    path = "/api/v1/modules/{module_id}/toggle",
    description = "Expand or collapse the lesson list",
    params(
        ("module_id" = u32, Path, description = "ID of the module")
    ),
    responses(
        (status = 200, description = "Toggled", body = ModuleView),
        (status = 404, description = "Module not found", body = ErrorResponse),
    ),
    tag = "modules",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn modules_toggle_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<ModuleId>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let view = state
        .sessions()
        .with_session(state.mm(), user, id, |session| {
            session.editor_mut().toggle_open();
            Ok(session.editor().view())
        })
        .await?;

    Ok((StatusCode::OK, Json(view)))
}

#[utoipa::path(
    post,
    path = "/api/v1/modules/{module_id}/edit",
    description = "Start editing a copy of the module",
    params(
        ("module_id" = u32, Path, description = "ID of the module")
    ),
    responses(
        (status = 200, description = "Editing started", body = ModuleView),
        (status = 403, description = "Only admins and instructors may edit", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
    ),
    tag = "modules",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn modules_edit_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<ModuleId>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let view = state
        .sessions()
        .with_session(state.mm(), user, id, |session| {
            session.editor_mut().begin_edit()?;
            Ok(session.editor().view())
        })
        .await?;

    Ok((StatusCode::OK, Json(view)))
}

#[utoipa::path(
    put,
    path = "/api/v1/modules/{module_id}/draft",
    description = "Apply one change to the draft",
    params(
        ("module_id" = u32, Path, description = "ID of the module")
    ),
    request_body = DraftEditBody,
    responses(
        (status = 200, description = "Draft updated", body = ModuleView),
        (status = 400, description = "Lesson index out of range", body = ErrorResponse),
        (status = 403, description = "Only admins and instructors may edit", body = ErrorResponse),
        (status = 404, description = "Module or resource not found", body = ErrorResponse),
        (status = 409, description = "Module is not being edited", body = ErrorResponse),
    ),
    tag = "modules",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn modules_draft_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<ModuleId>,
    Json(body): Json<DraftEditBody>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;

    let resource = match &body {
        DraftEditBody::AddResource { resource_id } => Some(
            state
                .mm()
                .store()
                .resources()
                .into_iter()
                .find(|r| r.id() == resource_id.as_str())
                .ok_or(WebError::resource_not_found(Resource::get_resource_type()))?,
        ),
        _ => None,
    };

    let view = state
        .sessions()
        .with_session(state.mm(), user, id, |session| {
            let editor = session.editor_mut();
            match body.into_edit(resource) {
                Some(edit) => editor.apply(edit)?,
                None => editor.toggle_resource_selector()?,
            }
            Ok(editor.view())
        })
        .await?;

    Ok((StatusCode::OK, Json(view)))
}

#[utoipa::path(
    post,
    path = "/api/v1/modules/{module_id}/save",
    description = "Commit the draft",
    params(
        ("module_id" = u32, Path, description = "ID of the module")
    ),
    responses(
        (status = 200, description = "Module saved", body = ModuleActionResponse),
        (status = 403, description = "Only admins and instructors may edit", body = ErrorResponse),
        (status = 409, description = "Module is not being edited", body = ErrorResponse),
    ),
    tag = "modules",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn modules_save_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<ModuleId>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let response = state
        .sessions()
        .with_session(state.mm(), user, id, |session| {
            session.editor_mut().save()?;
            Ok(ModuleActionResponse {
                module: session.editor().view(),
                notifications: session.take_notifications(),
            })
        })
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/modules/{module_id}/cancel",
    description = "Discard the draft",
    params(
        ("module_id" = u32, Path, description = "ID of the module")
    ),
    responses(
        (status = 200, description = "Draft discarded", body = ModuleView),
        (status = 403, description = "Only admins and instructors may edit", body = ErrorResponse),
        (status = 409, description = "Module is not being edited", body = ErrorResponse),
    ),
    tag = "modules",
    security(
        ("cookie" = [])
    )
)]
pub(crate) async fn modules_cancel_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<ModuleId>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let view = state
        .sessions()
        .with_session(state.mm(), user, id, |session| {
            session.editor_mut().cancel()?;
            Ok(session.editor().view())
        })
        .await?;

    Ok((StatusCode::OK, Json(view)))
}
