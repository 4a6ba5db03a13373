// libs/notification-cell/src/models.rs
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==============================================================================
// EMAIL PAYLOADS
// ==============================================================================

/// Booking confirmation sent to the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentEmail {
    pub name: String,
    pub medic_name: String,
    pub email: String,
    pub specialty: String,
    pub date: String,
    pub hour: String,
}

/// Cancellation notice sent to the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelationEmail {
    pub name: String,
    pub medic_name: String,
    pub email: String,
    pub specialty: String,
    pub date: String,
    pub hour: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionEmail {
    pub email: String,
    pub name: String,
    pub medic_name: String,
    pub specialty: String,
    pub attachment: Option<PathBuf>,
}

// ==============================================================================
// WHATSAPP PAYLOADS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleMessage {
    pub patient_name: String,
    pub patient_phone: String,
    pub professional_name: String,
    pub specialty: String,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelationMessage {
    pub patient_name: String,
    pub professional_name: String,
    pub patient_phone: String,
    pub specialty: String,
}

// ==============================================================================
// PROVIDER WIRE TYPES
// ==============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailAttachment {
    pub filename: String,
    /// Base64 encoded file content
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppTextMessage {
    pub messaging_product: String,
    pub to: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: WhatsAppText,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WhatsAppText {
    pub body: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("{channel} delivery not configured")]
    NotConfigured { channel: String },

    #[error("Provider error: {message}")]
    ProviderError { message: String },

    #[error("Attachment error: {message}")]
    AttachmentError { message: String },
}

impl From<reqwest::Error> for NotificationError {
    fn from(err: reqwest::Error) -> Self {
        NotificationError::ProviderError {
            message: err.to_string(),
        }
    }
}
