//! Checklist HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::types::CreateChecklistRequest;
use crate::backend::engine::{
    create_and_link, delete_and_unlink, path_id, require_owner, Deleted, NewChild,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, ValidJson};
use crate::backend::server::state::AppState;
use crate::backend::store::cards;
use crate::backend::store::checklists::{self, ChecklistPatch};
use crate::shared::models::{now_millis, sort_by_order, Checklist, Entity, EntityKind};

/// POST /api/checklists
pub async fn create_checklist(
    State(app_state): State<AppState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<CreateChecklistRequest>,
) -> Result<(StatusCode, Json<Entity>), BackendError> {
    let checklist = create_and_link(
        &app_state.pool,
        auth.id(),
        request.owner,
        NewChild::Checklist {
            objective: request.objective,
            is_completed: request.is_completed,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(checklist)))
}

/// GET /api/checklists/card/{cardId}
pub async fn get_checklists_by_card(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<String>,
) -> Result<Json<Vec<Checklist>>, BackendError> {
    let card_id = path_id(EntityKind::Card, &card_id)?;

    let card = cards::find(&app_state.pool, card_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Card))?;
    require_owner(auth.id(), &card)?;

    let mut found = checklists::find_by_owner(&app_state.pool, card_id).await?;
    sort_by_order(&mut found, &card.checklist_order, |checklist| checklist.id);
    Ok(Json(found))
}

/// GET /api/checklists/{checklistId}
pub async fn get_checklist(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(checklist_id): Path<String>,
) -> Result<Json<Checklist>, BackendError> {
    let checklist_id = path_id(EntityKind::Checklist, &checklist_id)?;

    let checklist = checklists::find(&app_state.pool, checklist_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Checklist))?;
    require_owner(auth.id(), &checklist)?;

    Ok(Json(checklist))
}

/// PATCH /api/checklists/{checklistId}
pub async fn update_checklist(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(checklist_id): Path<String>,
    ValidJson(patch): ValidJson<ChecklistPatch>,
) -> Result<Json<Checklist>, BackendError> {
    let checklist_id = path_id(EntityKind::Checklist, &checklist_id)?;

    let checklist = checklists::find(&app_state.pool, checklist_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Checklist))?;
    require_owner(auth.id(), &checklist)?;

    let updated = checklists::update(&app_state.pool, checklist_id, &patch, now_millis())
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Checklist))?;

    Ok(Json(updated))
}

/// DELETE /api/checklists/{checklistId}
pub async fn delete_checklist(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(checklist_id): Path<String>,
) -> Result<Json<Deleted>, BackendError> {
    let checklist_id = path_id(EntityKind::Checklist, &checklist_id)?;
    let deleted =
        delete_and_unlink(&app_state.pool, auth.id(), EntityKind::Checklist, checklist_id).await?;
    Ok(Json(deleted))
}
