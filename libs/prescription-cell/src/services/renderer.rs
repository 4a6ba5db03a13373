// libs/prescription-cell/src/services/renderer.rs
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use tracing::debug;

use crate::models::{DocumentDefinition, PrescriptionError, ResolvedStyle};
use crate::services::layout::{layout, PageGeometry};

struct CourierFamily {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl CourierFamily {
    fn load(doc: &PdfDocumentReference) -> Result<Self, PrescriptionError> {
        let add = |font| doc.add_builtin_font(font).map_err(render_error);
        Ok(Self {
            regular: add(BuiltinFont::Courier)?,
            bold: add(BuiltinFont::CourierBold)?,
            italic: add(BuiltinFont::CourierOblique)?,
            bold_italic: add(BuiltinFont::CourierBoldOblique)?,
        })
    }

    fn pick(&self, style: &ResolvedStyle) -> &IndirectFontRef {
        match (style.bold, style.italics) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

fn render_error(e: printpdf::Error) -> PrescriptionError {
    PrescriptionError::Render(e.to_string())
}

/// Typesets `definition` and writes the PDF to `output`, replacing any file
/// already there. Missing parent directories are created.
pub fn render_document(definition: &DocumentDefinition, output: &Path) -> Result<(), PrescriptionError> {
    let geometry = PageGeometry::default();
    let placed = layout(definition, &geometry);

    let (doc, first_page, first_layer) = PdfDocument::new(
        definition.title.as_str(),
        Mm(geometry.width_mm),
        Mm(geometry.height_mm),
        "Layer 1",
    );
    let fonts = CourierFamily::load(&doc)?;

    let mut layers: Vec<PdfLayerReference> = vec![doc.get_page(first_page).get_layer(first_layer)];
    for item in &placed {
        while layers.len() <= item.page {
            let (page, layer) = doc.add_page(Mm(geometry.width_mm), Mm(geometry.height_mm), "Layer 1");
            layers.push(doc.get_page(page).get_layer(layer));
        }
        layers[item.page].use_text(
            item.text.as_str(),
            item.style.font_size,
            Mm(item.x_mm),
            Mm(item.y_mm),
            fonts.pick(&item.style),
        );
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output)?;
    doc.save(&mut BufWriter::new(file)).map_err(render_error)?;

    debug!("Rendered {} text items over {} page(s) to {}", placed.len(), layers.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::document::prescription_document;
    use assert_matches::assert_matches;

    #[test]
    fn test_render_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("prescription.pdf");

        render_document(&prescription_document(), &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("prescription.pdf");
        std::fs::write(&output, b"stale").unwrap();

        render_document(&prescription_document(), &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_into_file_path_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let result = render_document(&prescription_document(), &blocker.join("out.pdf"));

        assert_matches!(result, Err(PrescriptionError::Io(_)));
    }
}
