//! Settings API Handlers
//!
//! Generic keyed JSON blobs. The notification channel configs have their
//! own typed endpoints in [`crate::api::notifications`]; this surface is
//! for everything else the back office stores (site contacts, social
//! links, about blocks, …).

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::SettingRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct SettingsQuery {
    /// Comma-separated list of keys to fetch
    pub keys: String,
}

/// GET /api/admin/settings?keys=a,b — parsed blobs keyed by name; missing
/// keys are simply absent from the response
pub async fn get_keys(
    State(state): State<ServerState>,
    Query(query): Query<SettingsQuery>,
) -> AppResult<Json<BTreeMap<String, serde_json::Value>>> {
    let repo = SettingRepository::new(state.db.clone());

    let mut blobs = BTreeMap::new();
    for key in query.keys.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if let Some(value) = repo.get_typed::<serde_json::Value>(key).await? {
            blobs.insert(key.to_string(), value);
        }
    }
    Ok(Json(blobs))
}

#[derive(Debug, Deserialize)]
pub struct UpsertSettingRequest {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub group: String,
}

/// PUT /api/admin/settings — create or overwrite one keyed blob
pub async fn upsert(
    State(state): State<ServerState>,
    Json(req): Json<UpsertSettingRequest>,
) -> AppResult<Json<bool>> {
    validate_required_text(&req.key, "key", MAX_NAME_LEN)?;
    if !req
        .key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::validation(
            "key may only contain alphanumerics and underscores",
        ));
    }

    let repo = SettingRepository::new(state.db.clone());
    repo.upsert(&req.key, &req.value, &req.label, &req.group)
        .await?;
    Ok(Json(true))
}
