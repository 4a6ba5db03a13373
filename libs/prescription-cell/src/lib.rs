// libs/prescription-cell/src/lib.rs
//! # Prescription Cell
//!
//! Renders a prescription PDF from a declarative document and emails it to
//! the patient as an attachment.
//!
//! - `services/document.rs`     - the prescription document definition
//! - `services/layout.rs`       - style resolution output placed on A4 pages
//! - `services/renderer.rs`     - PDF output with the built-in Courier family
//! - `services/prescription.rs` - render, then send
//!
//! ## API Endpoints
//!
//! - `POST /prescriptions` - Render and email a prescription (202, best-effort)

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{DocumentDefinition, Paragraph, PrescriptionError, PrescriptionRequest, Style, TextRun};
pub use services::{render_document, PrescriptionService};

pub use router::prescription_routes;
