//! Persistence for chat sessions and messages.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::chat::models::{ChatMessageRow, ChatSessionRow};

pub async fn list_sessions(pool: &PgPool, user_id: Uuid) -> Result<Vec<ChatSessionRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM chat_sessions WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create_session(
    pool: &PgPool,
    user_id: Uuid,
    title: Option<String>,
) -> Result<ChatSessionRow, sqlx::Error> {
    let title = match title.filter(|t| !t.trim().is_empty()) {
        Some(t) => t,
        None => {
            let (count,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM chat_sessions WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(pool)
                    .await?;
            format!("Chat {}", count + 1)
        }
    };

    sqlx::query_as(
        r#"
        INSERT INTO chat_sessions (id, user_id, title, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(title)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn get_session(
    pool: &PgPool,
    user_id: Uuid,
    session_id: Uuid,
) -> Result<Option<ChatSessionRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM chat_sessions WHERE id = $1 AND user_id = $2")
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Deletes a session and, via cascade, its messages. Returns whether a row
/// was actually removed.
pub async fn delete_session(
    pool: &PgPool,
    user_id: Uuid,
    session_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chat_sessions WHERE id = $1 AND user_id = $2")
        .bind(session_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_messages(
    pool: &PgPool,
    session_id: Uuid,
) -> Result<Vec<ChatMessageRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM chat_messages WHERE session_id = $1 ORDER BY created_at, id",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
}

/// Appends one message and bumps the session's `updated_at`.
pub async fn append_message(
    pool: &PgPool,
    session_id: Uuid,
    role: &str,
    content: &str,
) -> Result<ChatMessageRow, sqlx::Error> {
    let now = Utc::now();
    let message: ChatMessageRow = sqlx::query_as(
        r#"
        INSERT INTO chat_messages (id, session_id, role, content, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(session_id)
    .bind(role)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await?;

    sqlx::query("UPDATE chat_sessions SET updated_at = $1 WHERE id = $2")
        .bind(now)
        .bind(session_id)
        .execute(pool)
        .await?;

    Ok(message)
}
