// ============================
// crates/backend-lib/src/http_router.rs
// ============================
//! HTTP router and request handlers.
//!
//! This is the external collaborator around the core: it validates input,
//! creates rooms on demand, appends messages, and answers the incremental
//! "what is new since T" poll. The core itself never blocks, sleeps, or
//! holds a connection; repeated polling is entirely the client's loop.

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use metrics::counter;
use roomfeed_common::{ChatMessage, MessageBatch, PostMessage};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::metrics::POLL_REQUESTS;
use crate::pages;
use crate::validation;
use crate::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rooms", get(room_index))
        .route("/rooms/{room}", get(room_page))
        .route(
            "/rooms/{room}/messages",
            get(poll_messages).post(post_message),
        )
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query parameters for the poll endpoint
#[derive(Debug, Deserialize)]
struct PollQuery {
    /// RFC 3339 watermark; absent means "now" (future messages only)
    since: Option<DateTime<Utc>>,
}

/// Index of known rooms.
async fn room_index(State(state): State<AppState>) -> Html<String> {
    let mut room_ids = state.registry.room_ids();
    room_ids.sort();
    Html(pages::room_index(&room_ids))
}

/// Chat page for one room. Referencing a room creates it, for readers and
/// writers alike.
async fn room_page(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Html<String>, AppError> {
    validation::validate_room_id(&room, state.settings.max_room_id_len)?;
    state.registry.get_or_create(&room);
    Ok(Html(pages::room_page(
        &room,
        state.settings.poll_interval_ms,
        state.settings.max_text_len,
    )))
}

/// Return every message strictly newer than `since`, together with the
/// server clock reading for this poll.
///
/// `now` is read *before* the snapshot is taken: a message that lands
/// between the clock read and the snapshot may be delivered twice across
/// consecutive polls, but can never be silently skipped. The client
/// advances its watermark to `now`, not to the last message's timestamp.
async fn poll_messages(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Query(query): Query<PollQuery>,
) -> Result<Json<MessageBatch>, AppError> {
    validation::validate_room_id(&room, state.settings.max_room_id_len)?;
    counter!(POLL_REQUESTS).increment(1);

    let log = state.registry.get_or_create(&room);
    let now = Utc::now();
    let since = query.since.unwrap_or(now);
    let messages = log.messages_since(since);

    tracing::debug!(room = %room, count = messages.len(), "poll");
    Ok(Json(MessageBatch { now, messages }))
}

/// Append a message to a room and echo the stored message back, timestamp
/// included.
async fn post_message(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Form(body): Form<PostMessage>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    validation::validate_room_id(&room, state.settings.max_room_id_len)?;
    validation::validate_text(&body.text, state.settings.max_text_len)?;

    // an empty name field means anonymous
    let user_name = body
        .user_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let log = state.registry.get_or_create(&room);
    let message = log.append(user_name, body.text);

    tracing::info!(room = %room, author = message.display_name(), "message appended");
    Ok((StatusCode::CREATED, Json(message)))
}

/// Liveness probe
async fn healthz() -> &'static str {
    "ok"
}
