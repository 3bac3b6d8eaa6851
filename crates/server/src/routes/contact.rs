//! Contact form submission and inbox handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use stonebridge_core::{ContactMessageId, ContactStatus, Email};

use crate::db::store::NewContact;
use crate::error::AppError;
use crate::middleware::CurrentAdmin;
use crate::models::{ContactMessage, ContactReply, ContactUpdate, NewContactMessage, PageQuery, Paginated};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Validate a public submission into a store-ready record.
fn validate_submission(body: NewContactMessage) -> Result<NewContact, AppError> {
    let name = body.name.trim().to_owned();
    let message = body.message.trim().to_owned();

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push("name is required".to_owned());
    }
    if message.is_empty() {
        errors.push("message is required".to_owned());
    }
    let email = match Email::parse(&body.email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push(e.to_string());
            None
        }
    };

    match email {
        Some(email) if errors.is_empty() => Ok(NewContact {
            name,
            email,
            phone: body.phone.filter(|p| !p.trim().is_empty()),
            message,
        }),
        _ => Err(AppError::Validation {
            message: "Invalid contact submission".to_owned(),
            errors,
        }),
    }
}

/// POST /api/contact
///
/// Public endpoint. The operator notification email is fire-and-forget;
/// a delivery failure never fails the submission.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<NewContactMessage>,
) -> Result<ApiResponse<ContactMessage>, AppError> {
    let submission = validate_submission(body)?;
    let message = state.repos().contact.create(submission).await?;

    if let Some(mailer) = state.mailer() {
        let mailer = mailer.clone();
        let notify = message.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_contact_notification(&notify).await {
                tracing::error!(error = %e, "Failed to send contact notification email");
            }
        });
    }

    Ok(ApiResponse::created("Message received", message))
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct InboxQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ContactStatus>,
}

/// GET /api/contact
#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    CurrentAdmin(_): CurrentAdmin,
    Query(query): Query<InboxQuery>,
) -> Result<ApiResponse<Paginated<ContactMessage>>, AppError> {
    let (page, limit, offset) = PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .resolve();
    let (items, total) = state
        .repos()
        .contact
        .list(query.status, limit, offset)
        .await?;
    Ok(ApiResponse::ok(
        "Messages fetched",
        Paginated {
            items,
            total,
            page,
            limit,
        },
    ))
}

/// PATCH /api/contact/{id}
#[instrument(skip_all, fields(id))]
pub async fn update(
    State(state): State<AppState>,
    CurrentAdmin(_): CurrentAdmin,
    Path(id): Path<i32>,
    Json(body): Json<ContactUpdate>,
) -> Result<ApiResponse<ContactMessage>, AppError> {
    let message = state
        .repos()
        .contact
        .update(ContactMessageId::new(id), body)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_owned()))?;
    Ok(ApiResponse::ok("Message updated", message))
}

/// POST /api/contact/{id}/reply
///
/// Records the reply, then emails it to the submitter fire-and-forget.
#[instrument(skip_all, fields(admin = admin.id.as_i32(), id))]
pub async fn reply(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<i32>,
    Json(body): Json<ContactReply>,
) -> Result<ApiResponse<ContactMessage>, AppError> {
    let reply_text = body.reply.trim().to_owned();
    if reply_text.is_empty() {
        return Err(AppError::BadRequest("reply must not be empty".to_owned()));
    }

    let message = state
        .repos()
        .contact
        .reply(ContactMessageId::new(id), reply_text.clone(), admin.id, body.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_owned()))?;

    if let Some(mailer) = state.mailer() {
        let mailer = mailer.clone();
        let recipient = message.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_contact_reply(&recipient, &reply_text).await {
                tracing::error!(error = %e, "Failed to send contact reply email");
            }
        });
    }

    Ok(ApiResponse::ok("Reply sent", message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn body(name: &str, email: &str, message: &str) -> NewContactMessage {
        NewContactMessage {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: None,
            message: message.to_owned(),
        }
    }

    #[test]
    fn test_valid_submission_is_trimmed() {
        let submission =
            validate_submission(body("  Jane  ", "jane@example.com", " Quote please. ")).unwrap();
        assert_eq!(submission.name, "Jane");
        assert_eq!(submission.message, "Quote please.");
    }

    #[test]
    fn test_invalid_submission_collects_all_errors() {
        let err = validate_submission(body("", "not-an-email", "")).unwrap_err();
        match err {
            AppError::Validation { errors, .. } => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_phone_dropped() {
        let mut b = body("Jane", "jane@example.com", "Hello");
        b.phone = Some("   ".to_owned());
        let submission = validate_submission(b).unwrap();
        assert!(submission.phone.is_none());
    }
}
