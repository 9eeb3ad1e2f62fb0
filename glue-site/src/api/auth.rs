//! Admin cookie middleware
//!
//! Applied to `/api/admin/*` only. The request passes when its
//! `glue_admin` cookie carries the configured admin token.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use glue_common::api::{extract_cookie, verify_admin_token, ADMIN_COOKIE};
use tracing::warn;

use crate::{ApiError, AppState};

pub async fn admin_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| extract_cookie(header, ADMIN_COOKIE));

    if let Err(e) = verify_admin_token(provided, state.admin_token.as_deref()) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = %e,
            "Admin request rejected"
        );
        return Err(e.into());
    }

    Ok(next.run(request).await)
}
