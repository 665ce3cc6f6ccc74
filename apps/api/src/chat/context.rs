//! Context assembly for the career-advice chat.
//!
//! A reply is grounded in three things: the persona, a sliding window over
//! the session history, and — when the user attached a document — the chunks
//! of that document most relevant to the current query. Relevance is keyword
//! overlap, which keeps retrieval deterministic and local.

use crate::chat::models::{ChatMessageRow, ROLE_USER};

/// How many prior messages are replayed into the prompt.
pub const HISTORY_WINDOW: usize = 10;

/// Chunking parameters for attached documents.
pub const CHUNK_SIZE: usize = 1000;
pub const CHUNK_OVERLAP: usize = 200;

/// How many document chunks are surfaced to the model.
pub const TOP_CHUNKS: usize = 3;

/// Splits a document into overlapping chunks of roughly `CHUNK_SIZE`
/// characters.
pub fn chunk_text(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![];
    }

    let step = CHUNK_SIZE - CHUNK_OVERLAP;
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + CHUNK_SIZE).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
    chunks
}

/// Ranks chunks by how many distinct query keywords they contain and returns
/// the best `k`, in their original document order.
pub fn select_relevant_chunks(chunks: &[String], query: &str, k: usize) -> Vec<String> {
    let keywords: Vec<String> = query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .map(str::to_string)
        .collect();

    let mut scored: Vec<(usize, usize)> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let haystack = chunk.to_lowercase();
            let hits = keywords.iter().filter(|kw| haystack.contains(*kw)).count();
            (index, hits)
        })
        .collect();

    // Highest overlap first; ties keep document order.
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let mut selected: Vec<usize> = scored.into_iter().take(k).map(|(index, _)| index).collect();
    selected.sort_unstable();
    selected.into_iter().map(|i| chunks[i].clone()).collect()
}

/// Builds the full prompt for one chat turn.
pub fn build_prompt(
    history: &[ChatMessageRow],
    document_context: Option<&str>,
    query: &str,
) -> String {
    let mut prompt = String::new();

    if !history.is_empty() {
        prompt.push_str("Previous conversation context:\n");
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        for message in &history[start..] {
            let speaker = if message.role == ROLE_USER {
                "User"
            } else {
                "HireBot"
            };
            prompt.push_str(speaker);
            prompt.push_str(": ");
            prompt.push_str(&message.content);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    if let Some(document) = document_context {
        prompt.push_str("Document content for reference:\n");
        prompt.push_str(document);
        prompt.push_str("\n\n");
    }

    prompt.push_str("Current user query: ");
    prompt.push_str(query);
    prompt
        .push_str("\n\nPlease provide a helpful, motivating, and emotionally intelligent response:");
    prompt
}
