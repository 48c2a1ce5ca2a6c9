use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};
use tfy_board::{ChangePassword, NewComment, NewThread, PhotoUpload, SignIn, SignUp};
use tfy_types::{CommentId, LikeToggle, ThreadId, ThreadPatch};

use crate::auth::Caller;
use crate::error::{ApiError, ApiResult};
use crate::extract::Body;
use crate::state::AppState;

fn thread_id(raw: &str) -> ApiResult<ThreadId> {
    raw.parse().map_err(|_| ApiError::NotFound("thread"))
}

fn comment_id(raw: &str) -> ApiResult<CommentId> {
    raw.parse().map_err(|_| ApiError::NotFound("comment"))
}

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": "threadify",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub async fn sign_up(
    State(state): State<AppState>,
    Body(request): Body<SignUp>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let user = state.board.accounts.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Body(request): Body<SignIn>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let user = state.board.accounts.sign_in(request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

pub async fn change_password(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Body(request): Body<ChangePassword>,
) -> ApiResult<StatusCode> {
    state.board.accounts.change_password(&caller, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn sign_out(State(state): State<AppState>, Caller(caller): Caller) -> ApiResult<StatusCode> {
    state.board.accounts.sign_out(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Threads and comments
// ---------------------------------------------------------------------------

pub async fn list_threads(State(state): State<AppState>, _: Caller) -> ApiResult<Json<Value>> {
    let threads = state.board.threads.list().await?;
    Ok(Json(json!({ "threads": threads })))
}

pub async fn show_thread(
    State(state): State<AppState>,
    _: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let thread = state.board.threads.show(&thread_id(&id)?).await?;
    Ok(Json(json!({ "thread": thread })))
}

pub async fn create_thread(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Body(request): Body<NewThread>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let thread = state.board.threads.create(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "thread": thread }))))
}

pub async fn update_thread(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Body(patch): Body<ThreadPatch>,
) -> ApiResult<StatusCode> {
    state
        .board
        .threads
        .update(&caller, &thread_id(&id)?, &patch)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_thread(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.board.threads.delete(&caller, &thread_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_comment(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Body(request): Body<NewComment>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let comment = state
        .board
        .threads
        .add_comment(&caller, &thread_id(&id)?, request)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

pub async fn remove_comment(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((id, comment)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let thread = thread_id(&id)?;
    let Ok(comment) = comment_id(&comment) else {
        state.board.threads.show(&thread).await?;
        return Err(ApiError::NotFound("comment"));
    };
    state
        .board
        .threads
        .remove_comment(&caller, &thread, &comment)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<LikeToggle>> {
    let toggled = state.board.likes.toggle(&caller, &thread_id(&id)?).await?;
    Ok(Json(toggled))
}

// ---------------------------------------------------------------------------
// Profile photo
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct PhotoQuery {
    pub filename: Option<String>,
}

pub async fn upload_photo(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Query(query): Query<PhotoQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let upload = PhotoUpload {
        filename: query.filename,
        content_type,
        data: body.to_vec(),
    };
    let meta = state.board.photos.upload(&caller, upload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "photo": meta }))))
}

pub async fn fetch_photo(State(state): State<AppState>, Caller(caller): Caller) -> ApiResult<Response> {
    let photo = state.board.photos.fetch(&caller).await?;
    let content_type = HeaderValue::from_str(&photo.meta.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    Ok(([(CONTENT_TYPE, content_type)], photo.data).into_response())
}

pub async fn remove_photo(State(state): State<AppState>, Caller(caller): Caller) -> ApiResult<StatusCode> {
    state.board.photos.remove(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
