pub mod document;
pub mod layout;
pub mod prescription;
pub mod renderer;

pub use document::prescription_document;
pub use layout::{layout, PageGeometry, PlacedText};
pub use prescription::PrescriptionService;
pub use renderer::render_document;
