/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証が必要な範囲にだけ access middleware を適用する
 *
 * Notes
 * - /posts は GET が公開、POST が保護。同じパスでもメソッド単位で merge される
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    health::health,
    login::login,
    posts::{create_post, get_post, list_posts},
    session::current_session,
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/session", get(current_session))
        .route("/posts", post(create_post));
    let protected = access::apply(protected, state);

    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/posts", get(list_posts))
        .route("/posts/{post_id}", get(get_post))
        .merge(protected)
}
