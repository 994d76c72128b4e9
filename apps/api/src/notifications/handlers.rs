use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::state::AppState;

const LIST_LIMIT: i64 = 50;

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<NotificationRow>>, AppError> {
    let notifications: Vec<NotificationRow> = sqlx::query_as(
        "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user.id)
    .bind(LIST_LIMIT)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(notifications))
}

/// PUT /api/v1/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationRow>, AppError> {
    let notification: Option<NotificationRow> = sqlx::query_as(
        "UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;
    let notification =
        notification.ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;
    Ok(Json(notification))
}

#[derive(Serialize)]
pub struct MarkAllReadResponse {
    pub message: String,
}

/// PUT /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<MarkAllReadResponse>, AppError> {
    sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND NOT read")
        .bind(user.id)
        .execute(&state.db)
        .await?;
    Ok(Json(MarkAllReadResponse {
        message: "All notifications marked as read".to_string(),
    }))
}
