//! Shared request-body parsing for the update endpoints.
//!
//! The SPA submits `multipart/form-data` (text fields plus at most one file
//! part); plain JSON bodies are accepted for clients that have no file to
//! send. Empty-string fields count as absent, matching partial-update
//! semantics where only fields present in the request are applied.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;

use crate::error::ApiError;
use crate::uploads::UploadStore;

const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

/// Text fields plus the public path of an uploaded file, if one was sent.
/// The file is already written to disk by the time the handler sees this.
#[derive(Debug, Default)]
pub struct UpdateForm {
    fields: HashMap<String, String>,
    pub upload: Option<String>,
}

impl UpdateForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.upload.is_none()
    }

    /// Read the request body, storing the `file_field` part via `store`.
    pub async fn read(
        request: Request,
        file_field: &str,
        store: &UploadStore,
    ) -> Result<Self, ApiError> {
        if is_multipart(&request) {
            Self::from_multipart(request, file_field, store).await
        } else {
            Self::from_json(request).await
        }
    }

    async fn from_multipart(
        request: Request,
        file_field: &str,
        store: &UploadStore,
    ) -> Result<Self, ApiError> {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_owned);

            if name == file_field {
                if let Some(original) = file_name {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::validation(e.body_text()))?;
                    form.upload = Some(store.save(&original, &data).await?);
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| ApiError::validation(e.body_text()))?;
            if !value.is_empty() {
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    async fn from_json(request: Request) -> Result<Self, ApiError> {
        let bytes = axum::body::to_bytes(request.into_body(), MAX_JSON_BODY_BYTES)
            .await
            .map_err(|_| ApiError::validation("Request body too large"))?;

        let mut form = Self::default();
        if bytes.is_empty() {
            return Ok(form);
        }

        let values: HashMap<String, serde_json::Value> = serde_json::from_slice(&bytes)
            .map_err(|_| ApiError::validation("Invalid request body"))?;
        for (name, value) in values {
            if let serde_json::Value::String(text) = value {
                if !text.is_empty() {
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false)
}
