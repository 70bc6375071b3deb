//! Request body decoding shared by the upload-capable endpoints.

use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, http::header, web};
use futures::{StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;

use crate::middleware::error::{AppError, AppResult};

/// Cap for JSON bodies, and for all text fields of one form combined.
const MAX_TEXT_BYTES: usize = 256 * 1024;

/// Most parts accepted in one multipart body, unnamed ones included.
const MAX_PARTS: usize = 16;

/// A file part of a multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Accept only parts that declare an `image/*` type.
    pub fn ensure_image(&self) -> AppResult<()> {
        let is_image = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"));

        if is_image {
            Ok(())
        } else {
            Err(AppError::BadRequest("Uploaded file must be an image".to_string()))
        }
    }
}

/// Decoded `multipart/form-data` body.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Drain the multipart stream.
    ///
    /// File parts share a budget of `max_file_bytes` and text parts share
    /// `MAX_TEXT_BYTES`; both are enforced while streaming, as is `MAX_PARTS`.
    pub async fn read(mut payload: Multipart, max_file_bytes: usize) -> AppResult<Self> {
        let mut form = FormData::default();
        let mut parts = 0;
        let mut file_bytes = 0;
        let mut text_bytes = 0;

        while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
            parts += 1;
            if parts > MAX_PARTS {
                return Err(AppError::BadRequest(format!(
                    "Form has more than {} parts",
                    MAX_PARTS
                )));
            }

            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);
            let content_type = field.content_type().map(|m| m.essence_str().to_string());

            let (used, limit) = if filename.is_some() {
                (&mut file_bytes, max_file_bytes)
            } else {
                (&mut text_bytes, MAX_TEXT_BYTES)
            };

            let mut bytes = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(malformed)? {
                *used += chunk.len();
                if *used > limit {
                    return Err(AppError::BadRequest(format!(
                        "Field '{}' exceeds the limit of {} bytes",
                        name, limit
                    )));
                }
                bytes.extend_from_slice(&chunk);
            }

            match filename {
                Some(filename) => {
                    form.files.insert(
                        name,
                        UploadedFile {
                            filename,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let value = String::from_utf8(bytes).map_err(|_| {
                        AppError::BadRequest(format!("Field '{}' is not valid UTF-8", name))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Trimmed text value; blank values count as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Raw text value, including empty strings.
    pub fn raw_text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Take a non-empty file part.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(|f| !f.is_empty())
    }
}

fn malformed(err: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart body: {}", err))
}

fn content_type(req: &HttpRequest) -> &str {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub fn is_multipart(req: &HttpRequest) -> bool {
    content_type(req).contains("multipart/form-data")
}

pub fn is_json(req: &HttpRequest) -> bool {
    content_type(req).contains("application/json")
}

/// Open the body of a multipart request.
pub fn multipart(req: &HttpRequest, payload: web::Payload) -> Multipart {
    Multipart::new(req.headers(), payload)
}

/// Buffer and parse a JSON body from a raw payload.
pub async fn read_json<T: DeserializeOwned>(mut payload: web::Payload) -> AppResult<T> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("Unreadable body: {}", e)))?;
        if body.len() + chunk.len() > MAX_TEXT_BYTES {
            return Err(AppError::BadRequest("Request body too large".to_string()));
        }
        body.extend_from_slice(&chunk);
    }

    serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}
