//! Dashboard login.

use actix_web::{HttpResponse, web};

use shop_shared::SuccessResponse;
use shop_shared::dto::LoginRequest;

use crate::middleware::error::AppResult;
use crate::observability::request_id::RequestId;
use crate::state::AppState;

/// POST /api/auth/login
///
/// Checks the pair against the configured dashboard credentials. No session
/// or token is issued.
pub async fn login(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if let Err(e) = state.credentials.verify(req.email.trim(), &req.password) {
        tracing::info!(request_id = %request_id.0, reason = %e, "Dashboard login rejected");
        return Err(e.into());
    }

    tracing::info!("Dashboard login succeeded");
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
