// libs/prescription-cell/src/services/document.rs
use std::collections::HashMap;

use crate::models::{DocumentDefinition, Paragraph, Style, TextRun};

/// Fixed prescription layout. It is a placeholder typesetting sample and does
/// not yet carry any of the request's fields.
pub fn prescription_document() -> DocumentDefinition {
    let mut styles = HashMap::new();
    styles.insert(
        "header".to_string(),
        Style { font_size: Some(18.0), bold: Some(true), italics: None },
    );
    styles.insert(
        "bigger".to_string(),
        Style { font_size: Some(15.0), bold: None, italics: Some(true) },
    );

    let content = vec![
        Paragraph {
            style: Some("header".to_string()),
            runs: vec![TextRun::plain(
                "This is a header (whole paragraph uses the same header style)\n\n",
            )],
            ..Paragraph::default()
        },
        Paragraph {
            runs: vec![
                TextRun::plain("It is however possible to provide an array of texts "),
                TextRun::plain("to the paragraph (instead of a single string) and have "),
                TextRun::with("a better ", Style { font_size: Some(15.0), bold: Some(true), italics: None }),
                TextRun::plain("control over it. \nEach inline can be "),
                TextRun::with("styled ", Style::size(20.0)),
                TextRun::with("independently ", Style { font_size: Some(40.0), bold: None, italics: Some(true) }),
                TextRun::plain("then.\n\n"),
            ],
            ..Paragraph::default()
        },
        Paragraph {
            style: Some("header".to_string()),
            runs: vec![TextRun::plain("Mixing named styles and style-overrides")],
            ..Paragraph::default()
        },
        Paragraph {
            style: Some("bigger".to_string()),
            overrides: Style { italics: Some(false), ..Style::default() },
            runs: vec![
                TextRun::plain("We can also mix named-styles and style-overrides at both paragraph and inline level. "),
                TextRun::plain("For example, this paragraph uses the \"bigger\" style, which changes fontSize to 15 and sets italics to true. "),
                TextRun::plain("Texts are not italics though. It's because we've overriden italics back to false at "),
                TextRun::plain("the paragraph level. \n\n"),
                TextRun::plain("We can also change the style of a single inline. Let's use a named style called header: "),
                TextRun::styled("like here.\n", "header", Style::default()),
                TextRun::plain("It got bigger and bold.\n\n"),
                TextRun::plain("OK, now we're going to mix named styles and style-overrides at the inline level. "),
                TextRun::plain("We'll use header style (it makes texts bigger and bold), but we'll override "),
                TextRun::plain("bold back to false: "),
                TextRun::styled("wow! it works!", "header", Style { bold: Some(false), ..Style::default() }),
                TextRun::plain("\n\nMake sure to take a look into the sources to understand what's going on here."),
            ],
        },
    ];

    DocumentDefinition {
        title: "Prescription".to_string(),
        default_style: Style::default(),
        styles,
        content,
    }
}
