//! Backup handlers - snapshots, uploads, restores and downloads.

use actix_web::{
    HttpRequest, HttpResponse,
    http::header::{self, ContentDisposition, DispositionParam, DispositionType},
    web,
};

use shop_core::DomainError;
use shop_core::domain::PostsData;
use shop_shared::SuccessResponse;
use shop_shared::dto::BackupCreatedResponse;

use super::form::{self, FormData};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Upload cap for backup files (10 MB).
const MAX_BACKUP_BYTES: usize = 10 * 1024 * 1024;

/// GET /api/backups - newest first.
pub async fn list_backups(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let backups = state.backups.list_backups().await?;
    Ok(HttpResponse::Ok().json(backups))
}

/// POST /api/backups
///
/// A JSON request snapshots the live document. A multipart request with a
/// `file` field imports that file and makes it live.
///
/// An upload must deserialize as a full posts document, not merely parse as
/// JSON, so a restore can never leave the live file unloadable.
pub async fn create_backup(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let backup_name = if form::is_json(&req) {
        state.backups.create_backup().await?
    } else if form::is_multipart(&req) {
        let mut form = FormData::read(form::multipart(&req, payload), MAX_BACKUP_BYTES).await?;
        let file = form
            .take_file("file")
            .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

        let content = String::from_utf8(file.bytes)
            .map_err(|_| AppError::BadRequest("Backup file must be UTF-8 text".to_string()))?;
        serde_json::from_str::<PostsData>(&content)
            .map_err(|e| AppError::BadRequest(format!("Invalid backup file: {}", e)))?;

        let name = state.backups.import_upload(&content).await?;
        tracing::info!(backup = %name, "Backup imported and restored");
        name
    } else {
        return Err(AppError::BadRequest("Invalid content type".to_string()));
    };

    Ok(HttpResponse::Created().json(BackupCreatedResponse { backup_name }))
}

/// POST /api/backups/{name} - make a stored backup the live document.
pub async fn restore_backup(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();

    if !state.backups.restore_backup(&name).await? {
        return Err(DomainError::backup_not_found(name).into());
    }

    tracing::info!(backup = %name, "Backup restored");
    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// DELETE /api/backups/{name}
pub async fn delete_backup(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();

    if !state.backups.delete_backup(&name).await? {
        return Err(DomainError::backup_not_found(name).into());
    }

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// GET /api/backups/download/{name}
pub async fn download_backup(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();
    let bytes = state.backups.read_backup(&name).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(name)],
        })
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(bytes))
}
