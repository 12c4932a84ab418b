//! List HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::types::CreateListRequest;
use crate::backend::auth::handlers::MessageResponse;
use crate::backend::engine::{
    create_and_link, delete_and_unlink, move_child, path_id, require_owner, Deleted, MoveRequest,
    NewChild,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, ValidJson};
use crate::backend::server::state::AppState;
use crate::backend::store::lists::{self, ListPatch};
use crate::backend::store::{boards, cards};
use crate::shared::models::{now_millis, sort_by_order, Entity, EntityKind, List, ListDetail};

/// POST /api/lists
pub async fn create_list(
    State(app_state): State<AppState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<CreateListRequest>,
) -> Result<(StatusCode, Json<Entity>), BackendError> {
    let list = create_and_link(
        &app_state.pool,
        auth.id(),
        request.owner,
        NewChild::List { name: request.name },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /api/lists/board/{boardId}
///
/// Lists of the board in the board's `list_order`.
pub async fn get_lists_by_board(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<Vec<List>>, BackendError> {
    let board_id = path_id(EntityKind::Board, &board_id)?;

    let board = boards::find(&app_state.pool, board_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Board))?;
    require_owner(auth.id(), &board)?;

    let mut found = lists::find_by_owner(&app_state.pool, board_id).await?;
    sort_by_order(&mut found, &board.list_order, |list| list.id);
    Ok(Json(found))
}

/// GET /api/lists/{listId}
pub async fn get_list(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<String>,
) -> Result<Json<ListDetail>, BackendError> {
    let list_id = path_id(EntityKind::List, &list_id)?;

    let mut tx = app_state.pool.begin().await?;
    let list = lists::find(&mut *tx, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::List))?;
    require_owner(auth.id(), &list)?;

    let list_cards = cards::find_by_owner(&mut *tx, list_id).await?;
    tx.commit().await?;

    Ok(Json(list.populate(list_cards)))
}

/// PATCH /api/lists/{listId}
pub async fn update_list(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<String>,
    ValidJson(patch): ValidJson<ListPatch>,
) -> Result<Json<List>, BackendError> {
    let list_id = path_id(EntityKind::List, &list_id)?;

    let list = lists::find(&app_state.pool, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::List))?;
    require_owner(auth.id(), &list)?;

    let updated = lists::update(&app_state.pool, list_id, &patch, now_millis())
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::List))?;

    tracing::info!("List {} updated", list_id);
    Ok(Json(updated))
}

/// DELETE /api/lists/{listId}
pub async fn delete_list(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<String>,
) -> Result<Json<Deleted>, BackendError> {
    let list_id = path_id(EntityKind::List, &list_id)?;
    let deleted = delete_and_unlink(&app_state.pool, auth.id(), EntityKind::List, list_id).await?;
    Ok(Json(deleted))
}

/// PATCH /api/lists/update/card/order
pub async fn update_card_order(
    State(app_state): State<AppState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<MoveRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    move_child(&app_state.pool, auth.id(), EntityKind::List, &request).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("order updated"))))
}
