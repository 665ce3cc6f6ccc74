// Career-advice chat ("HireBot").
// Session CRUD backed by Postgres, plus one LLM turn per message with
// optional document grounding. All LLM calls go through llm_client.

pub mod context;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod store;
