//! access token 検証 → AuthCtx を extensions に入れる
//!
//! 流れ:
//! - `AuthService::extract_token` でリクエストからトークン候補を取り出す
//!   (`?token=` ゲート + `Authorization: <scheme> <token>`)
//! - 署名・アルゴリズム・期限を検証し、claims を `AuthCtx` に変換する
//! - 失敗は全て 401。理由は warn ログにだけ残す (トークン文字列は出さない)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 認証が必要な Router に access middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/session", get(current_session));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let Some(token) = state.auth.extract_token(&parts) else {
        tracing::debug!(path = %parts.uri.path(), "no access token on request");
        return Err(AppError::Unauthorized);
    };

    let claims = match state.auth.verify_claims(&token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                error = %err,
                path = %parts.uri.path(),
                "access token verification failed"
            );
            return Err(err.into());
        }
    };

    // middleware → extractor への受け渡し
    parts.extensions.insert(AuthCtx::from_claims(&claims));

    Ok(next.run(Request::from_parts(parts, body)).await)
}
