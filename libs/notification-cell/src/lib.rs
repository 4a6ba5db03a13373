// libs/notification-cell/src/lib.rs
//! # Notification Cell
//!
//! Outbound patient notifications for appointment changes and prescriptions.
//!
//! - `services/email.rs`    - `EmailSender` port and the transactional email API client
//! - `services/whatsapp.rs` - `MessageSender` port and the WhatsApp Cloud API client
//!
//! Both clients are constructed from `AppConfig` and report
//! `NotificationError::NotConfigured` on send when their channel has no
//! credentials, so callers can treat delivery as best-effort.

pub mod models;
pub mod services;

pub use models::{
    AppointmentEmail, CancelationEmail, CancelationMessage, NotificationError,
    PrescriptionEmail, RescheduleMessage,
};

pub use services::{EmailSender, HttpEmailSender, MessageSender, WhatsAppClient};
