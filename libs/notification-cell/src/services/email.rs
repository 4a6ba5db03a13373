// libs/notification-cell/src/services/email.rs
use std::path::Path;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{
    AppointmentEmail, CancelationEmail, EmailAttachment, NotificationError, OutgoingEmail,
    PrescriptionEmail,
};

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_appointment_email(&self, email: &AppointmentEmail) -> Result<(), NotificationError>;

    async fn send_cancelation_email(&self, email: &CancelationEmail) -> Result<(), NotificationError>;

    async fn send_prescription(&self, email: &PrescriptionEmail) -> Result<(), NotificationError>;
}

/// Transactional email API client (JSON over HTTPS, bearer key).
pub struct HttpEmailSender {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
    configured: bool,
}

impl HttpEmailSender {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.email_api_url.clone(),
            api_key: config.email_api_key.clone(),
            from: config.email_from.clone(),
            configured: config.is_email_configured(),
        }
    }

    async fn deliver(&self, email: OutgoingEmail) -> Result<(), NotificationError> {
        if !self.configured {
            return Err(NotificationError::NotConfigured {
                channel: "Email".to_string(),
            });
        }

        debug!("Sending email '{}' to {:?}", email.subject, email.to);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Email provider rejected message: {} - {}", status, body);
            return Err(NotificationError::ProviderError {
                message: format!("HTTP {}: {}", status, body),
            });
        }

        info!("Email '{}' delivered to provider", email.subject);
        Ok(())
    }

    async fn attachment_from(path: &Path) -> Result<EmailAttachment, NotificationError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| NotificationError::AttachmentError {
            message: format!("{}: {}", path.display(), e),
        })?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());

        Ok(EmailAttachment {
            filename,
            content: STANDARD.encode(bytes),
        })
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send_appointment_email(&self, email: &AppointmentEmail) -> Result<(), NotificationError> {
        let text = format!(
            "Hello {},\n\nYour appointment with {} ({}) is confirmed for {} at {}.\n",
            email.name, email.medic_name, email.specialty, email.date, email.hour
        );

        self.deliver(OutgoingEmail {
            from: self.from.clone(),
            to: vec![email.email.clone()],
            subject: "Appointment confirmed".to_string(),
            text,
            attachments: Vec::new(),
        })
        .await
    }

    async fn send_cancelation_email(&self, email: &CancelationEmail) -> Result<(), NotificationError> {
        let text = format!(
            "Hello {},\n\nYour appointment with {} ({}) on {} at {} has been cancelled.\n",
            email.name, email.medic_name, email.specialty, email.date, email.hour
        );

        self.deliver(OutgoingEmail {
            from: self.from.clone(),
            to: vec![email.email.clone()],
            subject: "Appointment cancelled".to_string(),
            text,
            attachments: Vec::new(),
        })
        .await
    }

    async fn send_prescription(&self, email: &PrescriptionEmail) -> Result<(), NotificationError> {
        let mut attachments = Vec::new();
        if let Some(path) = &email.attachment {
            attachments.push(Self::attachment_from(path).await?);
        }

        let text = format!(
            "Hello {},\n\nAttached is the prescription issued by {} ({}).\n",
            email.name, email.medic_name, email.specialty
        );

        self.deliver(OutgoingEmail {
            from: self.from.clone(),
            to: vec![email.email.clone()],
            subject: "Your prescription".to_string(),
            text,
            attachments,
        })
        .await
    }
}
