//! Contact-form endpoints. Submissions are plain JSON; when SMTP is
//! configured a notification email is sent in the background so mail
//! trouble never fails the submission.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use gazette_core::models::{ContactMessageResponse, CreateContactMessageRequest};
use gazette_core::AppError;
use gazette_db::Page;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListContactQuery {
    /// Max rows to return (1-100, default 20)
    pub limit: Option<i64>,
    /// Rows to skip
    pub offset: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = CreateContactMessageRequest,
    responses(
        (status = 201, description = "Message received", body = ContactMessageResponse),
        (status = 400, description = "Invalid submission", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_contact_message(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateContactMessageRequest>,
) -> Result<(StatusCode, Json<ContactMessageResponse>), HttpAppError> {
    let saved = state
        .db
        .contacts
        .create(
            &request.name,
            &request.email,
            request.subject.as_deref(),
            &request.message,
        )
        .await?;

    if let Some(email) = state.email.clone() {
        let message = saved.clone();
        tokio::spawn(async move {
            if let Err(err) = email.notify_contact(&message).await {
                tracing::warn!(contact_id = %message.id, error = %err, "Contact notification email failed");
            }
        });
    }

    tracing::info!(contact_id = %saved.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(saved.into())))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "contact",
    params(ListContactQuery),
    responses(
        (status = 200, description = "Contact messages, newest first", body = Vec<ContactMessageResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_contact_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListContactQuery>,
) -> Result<Json<Vec<ContactMessageResponse>>, HttpAppError> {
    let page = Page::new(query.limit, query.offset);
    let messages = state.db.contacts.list(page).await?;

    Ok(Json(
        messages
            .into_iter()
            .map(ContactMessageResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    tag = "contact",
    params(("id" = Uuid, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "Contact message", body = ContactMessageResponse),
        (status = 404, description = "Contact message not found", body = ErrorResponse)
    )
)]
pub async fn get_contact_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactMessageResponse>, HttpAppError> {
    let message = state
        .db
        .contacts
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact message {} not found", id)))?;

    Ok(Json(message.into()))
}

#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    tag = "contact",
    params(("id" = Uuid, Path, description = "Contact message id")),
    responses(
        (status = 204, description = "Contact message deleted"),
        (status = 404, description = "Contact message not found", body = ErrorResponse)
    )
)]
pub async fn delete_contact_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let deleted = state.db.contacts.delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Contact message {} not found", id)).into());
    }

    tracing::info!(contact_id = %id, "Contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}
