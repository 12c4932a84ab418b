//! Card HTTP Handlers
//!
//! Cards change lists only through `PATCH /api/lists/update/card/order`;
//! `PATCH /api/cards/{cardId}` edits content fields only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::types::CreateCardRequest;
use crate::backend::auth::handlers::MessageResponse;
use crate::backend::engine::{
    create_and_link, delete_and_unlink, move_child, path_id, require_owner, Deleted, MoveRequest,
    NewChild,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, ValidJson};
use crate::backend::server::state::AppState;
use crate::backend::store::cards::{self, CardPatch};
use crate::backend::store::{checklists, lists};
use crate::shared::models::{now_millis, sort_by_order, Card, CardDetail, Entity, EntityKind};

/// POST /api/cards
pub async fn create_card(
    State(app_state): State<AppState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<CreateCardRequest>,
) -> Result<(StatusCode, Json<Entity>), BackendError> {
    let card = create_and_link(
        &app_state.pool,
        auth.id(),
        request.owner,
        NewChild::Card {
            name: request.name,
            description: request.description,
            color: request.color,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// GET /api/cards/list/{listId}
pub async fn get_cards_by_list(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<String>,
) -> Result<Json<Vec<Card>>, BackendError> {
    let list_id = path_id(EntityKind::List, &list_id)?;

    let list = lists::find(&app_state.pool, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::List))?;
    require_owner(auth.id(), &list)?;

    let mut found = cards::find_by_owner(&app_state.pool, list_id).await?;
    sort_by_order(&mut found, &list.card_order, |card| card.id);
    Ok(Json(found))
}

/// GET /api/cards/{cardId}
pub async fn get_card(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<String>,
) -> Result<Json<CardDetail>, BackendError> {
    let card_id = path_id(EntityKind::Card, &card_id)?;

    let mut tx = app_state.pool.begin().await?;
    let card = cards::find(&mut *tx, card_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Card))?;
    require_owner(auth.id(), &card)?;

    let card_checklists = checklists::find_by_owner(&mut *tx, card_id).await?;
    tx.commit().await?;

    Ok(Json(card.populate(card_checklists)))
}

/// PATCH /api/cards/{cardId}
pub async fn update_card(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<String>,
    ValidJson(patch): ValidJson<CardPatch>,
) -> Result<Json<Card>, BackendError> {
    let card_id = path_id(EntityKind::Card, &card_id)?;

    let card = cards::find(&app_state.pool, card_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Card))?;
    require_owner(auth.id(), &card)?;

    let updated = cards::update(&app_state.pool, card_id, &patch, now_millis())
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Card))?;

    tracing::info!("Card {} updated", card_id);
    Ok(Json(updated))
}

/// DELETE /api/cards/{cardId}
pub async fn delete_card(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<String>,
) -> Result<Json<Deleted>, BackendError> {
    let card_id = path_id(EntityKind::Card, &card_id)?;
    let deleted = delete_and_unlink(&app_state.pool, auth.id(), EntityKind::Card, card_id).await?;
    Ok(Json(deleted))
}

/// PATCH /api/cards/update/checklist/order
pub async fn update_checklist_order(
    State(app_state): State<AppState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<MoveRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    move_child(&app_state.pool, auth.id(), EntityKind::Card, &request).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("order updated"))))
}
