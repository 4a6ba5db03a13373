// libs/prescription-cell/src/services/prescription.rs
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use notification_cell::{EmailSender, HttpEmailSender, PrescriptionEmail};
use shared_config::AppConfig;

use crate::models::{PrescriptionError, PrescriptionRequest};
use crate::services::document::prescription_document;
use crate::services::renderer::render_document;

/// Every request writes the same output file and the email client rereads it,
/// so render and send run one request at a time.
static OUTPUT_LOCK: Mutex<()> = Mutex::const_new(());

pub struct PrescriptionService {
    email: Arc<dyn EmailSender>,
    output_path: PathBuf,
}

impl PrescriptionService {
    pub fn new(email: Arc<dyn EmailSender>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            email,
            output_path: output_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(HttpEmailSender::new(config)),
            &config.prescription_output_path,
        )
    }

    /// Renders the prescription PDF and mails it to the patient. Failures are
    /// logged and never surface to the caller.
    pub async fn send_prescription(&self, request: PrescriptionRequest) {
        match self.render_and_send(&request).await {
            Ok(()) => info!("Prescription sent to {}", request.email),
            Err(e) => warn!("Prescription for {} was not delivered: {}", request.email, e),
        }
    }

    async fn render_and_send(&self, request: &PrescriptionRequest) -> Result<(), PrescriptionError> {
        let _output = OUTPUT_LOCK.lock().await;

        let definition = prescription_document();
        let output = self.output_path.clone();
        tokio::task::spawn_blocking(move || render_document(&definition, &output))
            .await
            .map_err(|e| PrescriptionError::Render(e.to_string()))??;

        self.email
            .send_prescription(&PrescriptionEmail {
                email: request.email.clone(),
                name: request.name.clone(),
                medic_name: request.medic_name.clone(),
                specialty: request.specialty.clone(),
                attachment: Some(self.output_path.clone()),
            })
            .await?;

        Ok(())
    }
}
