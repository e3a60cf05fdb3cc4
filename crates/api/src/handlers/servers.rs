use crate::{dto::ServerEntryResponse, state::AppState};
use axum::{extract::State, Json};

pub async fn list_servers(State(state): State<AppState>) -> Json<Vec<ServerEntryResponse>> {
    let entries = state
        .list_servers
        .execute()
        .iter()
        .map(ServerEntryResponse::from)
        .collect();

    Json(entries)
}
