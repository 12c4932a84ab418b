/**
 * API Routes
 *
 * Everything below `/api`. Signup and login are public; every other route
 * sits behind `auth_middleware`.
 *
 * ## User
 * - `POST /user/signup`, `POST /user/login`
 * - `GET /user/me`, `PATCH /user/password`, `DELETE /user`
 *
 * ## Boards, lists, cards, checklists
 * - `POST /{kind}` creates under the owner named in the body
 * - `GET /{kind}/{parent}/{parentId}` lists the children of a parent
 * - `GET | PATCH | DELETE /{kind}/{id}`
 * - `PATCH /{kind}/update/{child}/order` moves one child
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

use crate::backend::auth::handlers::{change_password, delete_user, get_me, login, signup};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::{boards, cards, checklists, lists};

/// Build the `/api` router
pub fn configure_api_routes(app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/user/signup", post(signup))
        .route("/user/login", post(login));

    let protected = Router::new()
        // User
        .route("/user", axum::routing::delete(delete_user))
        .route("/user/me", get(get_me))
        .route("/user/password", patch(change_password))
        // Boards
        .route("/boards", post(boards::create_board))
        .route("/boards/user/{userId}", get(boards::get_boards_by_user))
        .route("/boards/update/list/order", patch(boards::update_list_order))
        .route(
            "/boards/{boardId}",
            get(boards::get_board)
                .patch(boards::update_board)
                .delete(boards::delete_board),
        )
        // Lists
        .route("/lists", post(lists::create_list))
        .route("/lists/board/{boardId}", get(lists::get_lists_by_board))
        .route("/lists/update/card/order", patch(lists::update_card_order))
        .route(
            "/lists/{listId}",
            get(lists::get_list)
                .patch(lists::update_list)
                .delete(lists::delete_list),
        )
        // Cards
        .route("/cards", post(cards::create_card))
        .route("/cards/list/{listId}", get(cards::get_cards_by_list))
        .route("/cards/update/checklist/order", patch(cards::update_checklist_order))
        .route(
            "/cards/{cardId}",
            get(cards::get_card)
                .patch(cards::update_card)
                .delete(cards::delete_card),
        )
        // Checklists
        .route("/checklists", post(checklists::create_checklist))
        .route("/checklists/card/{cardId}", get(checklists::get_checklists_by_card))
        .route(
            "/checklists/{checklistId}",
            get(checklists::get_checklist)
                .patch(checklists::update_checklist)
                .delete(checklists::delete_checklist),
        )
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    public.merge(protected).fallback(api_not_found)
}

async fn api_not_found() -> BackendError {
    BackendError::NotFound {
        message: "route not found".to_string(),
    }
}
