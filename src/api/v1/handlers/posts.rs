/*
 * Responsibility
 * - /posts 系 handler (作成・一覧・取得)
 * - 作成は access middleware の内側。author_id がトークンの主体と一致しなければ 401
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
};

use crate::{
    api::v1::{
        dto::posts::{CreatePostRequest, PostResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::post_repo,
    state::AppState,
};

/// Upper bound on a single listing.
pub const LIST_LIMIT: usize = 100;

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = post_repo::list(&state.db, LIST_LIMIT, 0).await?;

    Ok(Json(rows.into_iter().map(PostResponse::from).collect()))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<PostResponse>), AppError> {
    let Json(req) = payload?;

    let req = req.prepare();
    req.validate().map_err(|msg| AppError::Unprocessable(msg.to_string()))?;

    ctx.ensure_owner(req.author_id).inspect_err(|_| {
        tracing::warn!(
            user_id = ctx.user_id,
            author_id = req.author_id,
            "author_id does not match token subject"
        );
    })?;

    let row = post_repo::create(&state.db, &req.title, &req.content, req.author_id).await?;
    let location = format!("/api/v1/posts/{}", row.post_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(row.into()),
    ))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let post_id: u64 = post_id.parse().map_err(|_| {
        AppError::bad_request("invalid_post_id", "post id must be an unsigned integer")
    })?;

    let row = post_repo::get(&state.db, post_id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok(Json(row.into()))
}
