//! Board HTTP Handlers
//!
//! Every handler checks that the caller owns the board before touching it.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::types::CreateBoardRequest;
use crate::backend::auth::handlers::MessageResponse;
use crate::backend::engine::{
    create_and_link, delete_and_unlink, move_child, path_id, require_owner, Deleted, MoveRequest,
    NewChild,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, ValidJson};
use crate::backend::server::state::AppState;
use crate::backend::store::boards::{self, BoardPatch};
use crate::backend::store::{cards, lists};
use crate::shared::access::authorize;
use crate::shared::models::{now_millis, Board, BoardDetail, Card, Entity, EntityKind};

/// POST /api/boards
pub async fn create_board(
    State(app_state): State<AppState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Entity>), BackendError> {
    let board = create_and_link(
        &app_state.pool,
        auth.id(),
        auth.id(),
        NewChild::Board {
            name: request.name,
            color: request.color,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(board)))
}

/// GET /api/boards/user/{userId}
pub async fn get_boards_by_user(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Board>>, BackendError> {
    if !authorize(auth.id(), &user_id) {
        tracing::warn!("User {} asked for boards of {}", auth.id(), user_id);
        return Err(BackendError::unauthorized(EntityKind::Board));
    }

    let boards = boards::find_by_owner(&app_state.pool, auth.id()).await?;
    Ok(Json(boards))
}

/// GET /api/boards/{boardId}
///
/// Returns the board with its lists and their cards, each in user order.
/// All reads happen in one transaction so the tree is a consistent snapshot.
pub async fn get_board(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<BoardDetail>, BackendError> {
    let board_id = path_id(EntityKind::Board, &board_id)?;

    let mut tx = app_state.pool.begin().await?;

    let board = boards::find(&mut *tx, board_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Board))?;
    require_owner(auth.id(), &board)?;

    let board_lists = lists::find_by_owner(&mut *tx, board_id).await?;
    let list_ids: Vec<Uuid> = board_lists.iter().map(|list| list.id).collect();
    let all_cards = cards::find_by_owners(&mut *tx, &list_ids).await?;
    tx.commit().await?;

    let mut cards_by_list: HashMap<Uuid, Vec<Card>> = HashMap::new();
    for card in all_cards {
        cards_by_list.entry(card.owner).or_default().push(card);
    }

    let details = board_lists
        .into_iter()
        .map(|list| {
            let list_cards = cards_by_list.remove(&list.id).unwrap_or_default();
            list.populate(list_cards)
        })
        .collect();

    Ok(Json(board.populate(details)))
}

/// PATCH /api/boards/{boardId}
pub async fn update_board(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<String>,
    ValidJson(patch): ValidJson<BoardPatch>,
) -> Result<Json<Board>, BackendError> {
    let board_id = path_id(EntityKind::Board, &board_id)?;

    let board = boards::find(&app_state.pool, board_id)
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Board))?;
    require_owner(auth.id(), &board)?;

    let updated = boards::update(&app_state.pool, board_id, &patch, now_millis())
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::Board))?;

    tracing::info!("Board {} updated", board_id);
    Ok(Json(updated))
}

/// DELETE /api/boards/{boardId}
pub async fn delete_board(
    State(app_state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<Deleted>, BackendError> {
    let board_id = path_id(EntityKind::Board, &board_id)?;
    let deleted = delete_and_unlink(&app_state.pool, auth.id(), EntityKind::Board, board_id).await?;
    Ok(Json(deleted))
}

/// PATCH /api/boards/update/list/order
pub async fn update_list_order(
    State(app_state): State<AppState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<MoveRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    move_child(&app_state.pool, auth.id(), EntityKind::Board, &request).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("order updated"))))
}
