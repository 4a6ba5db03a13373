pub mod email;
pub mod whatsapp;

pub use email::{EmailSender, HttpEmailSender};
pub use whatsapp::{MessageSender, WhatsAppClient};
