/**
 * Assignable User Handler
 *
 * GET /api/kanban/users - users the caller may assign tasks to. Admins can
 * assign to any admin; everyone else only to themselves.
 */

use axum::{extract::State, Json};

use crate::backend::error::BackendError;
use crate::backend::kanban::db;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::model::AssignableUser;

/// List assignable users (GET /api/kanban/users)
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<AssignableUser>>, BackendError> {
    let pool = state.pool()?;
    let users = db::fetch_assignable_users(pool, &user).await?;
    Ok(Json(users))
}
