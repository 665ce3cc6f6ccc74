use std::io::Write;

use anyhow::Context as _;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::chat::context::{build_prompt, chunk_text, select_relevant_chunks, TOP_CHUNKS};
use crate::chat::models::{ChatMessageRow, ChatSessionRow, ROLE_ASSISTANT, ROLE_USER};
use crate::chat::prompts::{CHAT_SYSTEM, IMAGE_CHAT_PROMPT_TEMPLATE};
use crate::chat::store;
use crate::errors::AppError;
use crate::extraction::{self, MediaType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: Uuid,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionWithMessages {
    #[serde(flatten)]
    pub session: ChatSessionRow,
    pub messages: Vec<ChatMessageRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTurnResponse {
    pub user_message: ChatMessageRow,
    pub bot_message: ChatMessageRow,
    pub session: ChatSessionRow,
}

/// GET /api/chat/sessions
pub async fn handle_list_sessions(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ChatSessionRow>>, AppError> {
    let sessions = store::list_sessions(&state.db, params.user_id).await?;
    Ok(Json(sessions))
}

/// POST /api/chat/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<ChatSessionRow>, AppError> {
    let session = store::create_session(&state.db, req.user_id, req.title).await?;
    Ok(Json(session))
}

/// GET /api/chat/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SessionWithMessages>, AppError> {
    let session = store::get_session(&state.db, params.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    let messages = store::list_messages(&state.db, session.id).await?;
    Ok(Json(SessionWithMessages { session, messages }))
}

/// DELETE /api/chat/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let deleted = store::delete_session(&state.db, params.user_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/chat/sessions/:id/messages
///
/// Multipart body: `user_id` and `message` text parts, plus an optional
/// `document` file part (PDF, DOCX, or image) the reply should draw on.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<MessageTurnResponse>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut message: Option<String> = None;
    let mut attachment: Option<(MediaType, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_id" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable user_id: {e}")))?;
                let parsed = raw
                    .parse::<Uuid>()
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                user_id = Some(parsed);
            }
            "message" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable message: {e}")))?;
                message = Some(text);
            }
            "document" => {
                let content_type = field.content_type().map(str::to_string).ok_or_else(|| {
                    AppError::Validation("document part is missing a content type".to_string())
                })?;
                let media = MediaType::from_mime(&content_type)?;
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("unreadable document upload: {e}"))
                })?;
                attachment = Some((media, bytes));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::Validation("missing user_id".to_string()))?;
    let message = message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation("missing message".to_string()))?;

    let session = store::get_session(&state.db, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    let history = store::list_messages(&state.db, session.id).await?;

    let reply = generate_reply(&state, &history, &message, attachment).await?;

    let user_message = store::append_message(&state.db, session.id, ROLE_USER, &message).await?;
    let bot_message = store::append_message(&state.db, session.id, ROLE_ASSISTANT, &reply).await?;
    // Re-read so the response carries the bumped updated_at.
    let session = store::get_session(&state.db, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    Ok(Json(MessageTurnResponse {
        user_message,
        bot_message,
        session,
    }))
}

async fn generate_reply(
    state: &AppState,
    history: &[ChatMessageRow],
    message: &str,
    attachment: Option<(MediaType, Bytes)>,
) -> Result<String, AppError> {
    match attachment {
        // Images go straight to the vision path; there is no text to chunk.
        Some((media, bytes)) if media.is_image() => {
            let prompt = IMAGE_CHAT_PROMPT_TEMPLATE.replace("{message}", message);
            let reply = state
                .llm
                .call_vision(&prompt, CHAT_SYSTEM, media.mime(), &bytes)
                .await?;
            Ok(reply)
        }
        Some((media, bytes)) => {
            let mut temp = NamedTempFile::new().context("failed to create upload temp file")?;
            temp.write_all(&bytes)
                .context("failed to spool upload to disk")?;
            temp.flush().context("failed to flush upload temp file")?;

            let document = extraction::extract_text(&state.llm, temp.path(), media).await?;
            let chunks = chunk_text(&document);
            let relevant = select_relevant_chunks(&chunks, message, TOP_CHUNKS).join("\n\n");

            let prompt = build_prompt(history, Some(&relevant), message);
            Ok(state.llm.call_text(&prompt, CHAT_SYSTEM).await?)
        }
        None => {
            let prompt = build_prompt(history, None, message);
            Ok(state.llm.call_text(&prompt, CHAT_SYSTEM).await?)
        }
    }
}
