// libs/notification-cell/src/services/whatsapp.rs
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{
    CancelationMessage, NotificationError, RescheduleMessage, WhatsAppText, WhatsAppTextMessage,
};

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_update_whatsapp(&self, message: &RescheduleMessage) -> Result<(), NotificationError>;

    async fn send_cancelation_whatsapp(&self, message: &CancelationMessage) -> Result<(), NotificationError>;
}

/// WhatsApp Cloud API client for plain text messages.
/// POST {base_url}/{phone_number_id}/messages
pub struct WhatsAppClient {
    client: Client,
    base_url: String,
    api_token: String,
    phone_number_id: String,
    configured: bool,
}

impl WhatsAppClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.whatsapp_api_url.clone(),
            api_token: config.whatsapp_api_token.clone(),
            phone_number_id: config.whatsapp_phone_number_id.clone(),
            configured: config.is_whatsapp_configured(),
        }
    }

    /// The API expects the destination as digits only, country code included.
    pub fn normalize_phone(phone: &str) -> String {
        phone.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    async fn send_text(&self, phone: &str, body: String) -> Result<(), NotificationError> {
        if !self.configured {
            return Err(NotificationError::NotConfigured {
                channel: "WhatsApp".to_string(),
            });
        }

        let to = Self::normalize_phone(phone);
        if to.is_empty() {
            return Err(NotificationError::ProviderError {
                message: format!("Invalid destination phone '{}'", phone),
            });
        }

        let url = format!("{}/{}/messages", self.base_url, self.phone_number_id);
        debug!("Sending WhatsApp message to {} via {}", to, url);

        let request_body = WhatsAppTextMessage {
            messaging_product: "whatsapp".to_string(),
            to,
            message_type: "text".to_string(),
            text: WhatsAppText { body },
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("WhatsApp message failed: {} - {}", status, response_text);
            return Err(NotificationError::ProviderError {
                message: format!("HTTP {}: {}", status, response_text),
            });
        }

        info!("WhatsApp message accepted for {}", request_body.to);
        Ok(())
    }
}

#[async_trait]
impl MessageSender for WhatsAppClient {
    async fn send_update_whatsapp(&self, message: &RescheduleMessage) -> Result<(), NotificationError> {
        let body = format!(
            "Hello {}, your appointment with {} ({}) was rescheduled to {}.",
            message.patient_name,
            message.professional_name,
            message.specialty,
            message.date.format("%d/%m/%Y %H:%M"),
        );

        self.send_text(&message.patient_phone, body).await
    }

    async fn send_cancelation_whatsapp(&self, message: &CancelationMessage) -> Result<(), NotificationError> {
        let body = format!(
            "Hello {}, your appointment with {} ({}) has been cancelled.",
            message.patient_name, message.professional_name, message.specialty,
        );

        self.send_text(&message.patient_phone, body).await
    }
}
