use std::io::Write;

use anyhow::Context as _;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tempfile::NamedTempFile;

use crate::ats::models::AtsReport;
use crate::ats::pipeline;
use crate::errors::AppError;
use crate::extraction::MediaType;
use crate::progress::ProgressEvent;
use crate::state::AppState;

/// POST /api/ats/analyze
///
/// Multipart body: a `resume` file part (PDF, DOCX, or image; ≤10MB enforced
/// by the body limit) and a `client_id` text part naming the progress channel
/// opened on `/ws`. The upload is spooled to a temp file that is removed on
/// every exit path, success or failure.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AtsReport>, AppError> {
    let mut client_id: Option<String> = None;
    let mut upload: Option<(MediaType, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "client_id" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable client_id: {e}")))?;
                client_id = Some(value);
            }
            "resume" => {
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AppError::Validation("resume part is missing a content type".to_string())
                    })?;
                let media = MediaType::from_mime(&content_type)?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable resume upload: {e}")))?;
                upload = Some((media, bytes));
            }
            _ => {}
        }
    }

    let client_id = client_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("missing client_id".to_string()))?;
    let (media, bytes) = upload.ok_or_else(|| {
        AppError::Validation("no resume file uploaded".to_string())
    })?;

    // Spool to disk for the extractors; the NamedTempFile guard deletes the
    // file when this handler returns, on every path.
    let mut temp = NamedTempFile::new().context("failed to create upload temp file")?;
    temp.write_all(&bytes)
        .context("failed to spool upload to disk")?;
    temp.flush().context("failed to flush upload temp file")?;

    match pipeline::run_analysis(&state, &client_id, temp.path(), media).await {
        Ok(report) => {
            state
                .progress
                .emit(
                    &client_id,
                    ProgressEvent::AnalysisComplete(Box::new(report.clone())),
                )
                .await;
            Ok(Json(report))
        }
        Err(e) => {
            state
                .progress
                .emit(
                    &client_id,
                    ProgressEvent::AnalysisError {
                        error: e.to_string(),
                    },
                )
                .await;
            Err(e)
        }
    }
}
