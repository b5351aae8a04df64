use anyhow::anyhow;
use tracing::{info, instrument, warn};

use schoolhub_core::AppError;
use schoolhub_db::SchoolStore;
use schoolhub_models::contact::{ContactMessage, ContactMessageDto};

use crate::metrics::track_contact_message;
use crate::utils::email::EmailService;

pub struct ContactService;

impl ContactService {
    /// Stores a complete submission and notifies staff by email.
    ///
    /// Nothing is written when a field is missing or empty. A failed
    /// notification is logged and does not fail the submission.
    #[instrument(skip(store, email, dto))]
    pub async fn submit(
        store: &dyn SchoolStore,
        email: &EmailService,
        dto: ContactMessageDto,
    ) -> Result<Vec<ContactMessage>, AppError> {
        let message = dto
            .into_complete()
            .ok_or_else(|| AppError::bad_request(anyhow!("Missing required fields")))?;

        let rows = store.create_contact_message(message).await?;

        let mut notified = false;
        if let Some(row) = rows.first() {
            info!(contact_id = %row.id, "Contact message stored");
            match email.send_contact_notification(row).await {
                Ok(sent) => notified = sent,
                Err(e) => warn!(error = %e.message(), "Failed to send contact notification"),
            }
        }
        track_contact_message(notified);

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_config::EmailConfig;
    use schoolhub_db::MemoryProvider;

    #[tokio::test]
    async fn test_incomplete_submission_writes_nothing() {
        let store = MemoryProvider::new();
        let email = EmailService::new(EmailConfig::disabled());
        let dto = ContactMessageDto {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            subject: Some(String::new()),
            message: Some("Hello".to_string()),
        };

        let err = ContactService::submit(&store, &email, dto).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.message(), "Missing required fields");
        assert!(store.contact_messages().await.is_empty());
    }
}
