//! PDF output for paginated letters, built on `lopdf`.
//!
//! Every page shares one resource dictionary holding the three standard
//! Helvetica faces (WinAnsi encoded). Draw commands arrive in millimetres with
//! a top-left origin and are converted to PDF points measured from the bottom
//! edge.

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use thiserror::Error;

use crate::layout::font_metrics::{FontFace, TextLayout, MM_PER_PT};
use crate::layout::paginator::{Align, DrawCommand, PaginatedDocument};

const PDF_VERSION: &str = "1.4";
const PRODUCER: &str = "letterdesk";
/// Stroke width for border and rules, in points.
const STROKE_PT: f32 = 0.5;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("document has no pages")]
    EmptyDocument,

    #[error("PDF encoding failed: {0}")]
    Encode(#[from] lopdf::Error),

    #[error("PDF output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Info-dictionary metadata.
#[derive(Debug, Clone)]
pub struct PdfInfo<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub created: DateTime<Utc>,
}

/// Serializes every page of `doc`. `layout` resolves centered and
/// right-aligned text to a start position.
pub fn write_pdf(
    doc: &PaginatedDocument,
    layout: &dyn TextLayout,
    info: &PdfInfo<'_>,
) -> Result<Vec<u8>, PdfError> {
    if doc.pages.is_empty() {
        return Err(PdfError::EmptyDocument);
    }

    let width_pt = doc.geometry.width_mm / MM_PER_PT;
    let height_pt = doc.geometry.height_mm / MM_PER_PT;

    let mut pdf = Document::with_version(PDF_VERSION);
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let content = Content {
            operations: page_operations(&page.commands, doc.geometry.height_mm, layout),
        };
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                width_pt.into(),
                height_pt.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = info_dictionary(&mut pdf, info);
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    Ok(bytes)
}

fn info_dictionary(pdf: &mut Document, info: &PdfInfo<'_>) -> ObjectId {
    pdf.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi_bytes(info.title)),
        "Author" => Object::string_literal(win_ansi_bytes(info.author)),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(
            info.created.format("D:%Y%m%d%H%M%SZ").to_string()
        ),
    })
}

fn page_operations(
    commands: &[DrawCommand],
    page_height_mm: f32,
    layout: &dyn TextLayout,
) -> Vec<Operation> {
    let pt = |mm: f32| mm / MM_PER_PT;
    // PDF user space grows upwards from the bottom edge.
    let flip = |y_mm: f32| (page_height_mm - y_mm) / MM_PER_PT;

    let mut ops = Vec::new();
    for command in commands {
        match command {
            DrawCommand::Text {
                text,
                x,
                y,
                align,
                style,
            } => {
                let start_x = match align {
                    Align::Left => *x,
                    Align::Center => x - layout.text_width(text, style) / 2.0,
                    Align::Right => x - layout.text_width(text, style),
                };
                ops.extend([
                    Operation::new("q", vec![]),
                    Operation::new("g", vec![style.gray.into()]),
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Tf",
                        vec![style.face.resource_name().into(), style.size_pt.into()],
                    ),
                    Operation::new("Td", vec![pt(start_x).into(), flip(*y).into()]),
                    Operation::new("Tj", vec![Object::string_literal(win_ansi_bytes(text))]),
                    Operation::new("ET", vec![]),
                    Operation::new("Q", vec![]),
                ]);
            }
            DrawCommand::Line { x1, y1, x2, y2 } => {
                ops.extend([
                    Operation::new("q", vec![]),
                    Operation::new("w", vec![STROKE_PT.into()]),
                    Operation::new("m", vec![pt(*x1).into(), flip(*y1).into()]),
                    Operation::new("l", vec![pt(*x2).into(), flip(*y2).into()]),
                    Operation::new("S", vec![]),
                    Operation::new("Q", vec![]),
                ]);
            }
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
            } => {
                ops.extend([
                    Operation::new("q", vec![]),
                    Operation::new("w", vec![STROKE_PT.into()]),
                    Operation::new(
                        "re",
                        vec![
                            pt(*x).into(),
                            flip(y + height).into(),
                            pt(*width).into(),
                            pt(*height).into(),
                        ],
                    ),
                    Operation::new("S", vec![]),
                    Operation::new("Q", vec![]),
                ]);
            }
        }
    }
    ops
}

/// Latin-1 code points map straight onto WinAnsi; anything else becomes `?`.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(b) if c >= ' ' && !('\u{7f}'..'\u{a0}').contains(&c) => b,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{a4_page, HelveticaLayout, TextStyle};
    use crate::layout::paginator::paginate;
    use crate::letters::document::{build_document, Block, LetterDocument};
    use crate::models::company::CompanyProfile;
    use crate::models::letter::{
        EmployeeInfo, FormData, IncrementFields, LetterFields, LetterType, RelievingFields,
    };
    use chrono::TimeZone;

    fn info() -> PdfInfo<'static> {
        PdfInfo {
            title: "RELIEVING LETTER",
            author: "Acme",
            created: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
        }
    }

    fn relieving_form() -> FormData {
        FormData {
            company: CompanyProfile {
                name: "Acme (India) Pvt Ltd".to_string(),
                ..Default::default()
            },
            employee: EmployeeInfo {
                name: "Jane Doe".to_string(),
                ..Default::default()
            },
            fields: LetterFields::Relieving(RelievingFields {
                joining_date: "2020-01-01".to_string(),
                relieving_date: "2023-01-01".to_string(),
                letter_date: "2023-01-02".to_string(),
                reason_for_leaving: String::new(),
            }),
        }
    }

    fn render(form: &FormData) -> Vec<u8> {
        let doc = paginate(&build_document(form), &HelveticaLayout, &a4_page());
        write_pdf(&doc, &HelveticaLayout, &info()).unwrap()
    }

    fn as_number(object: &Object) -> f64 {
        match object {
            Object::Real(v) => f64::from(*v),
            Object::Integer(v) => *v as f64,
            other => panic!("not a number: {other:?}"),
        }
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let doc = PaginatedDocument {
            geometry: a4_page(),
            pages: Vec::new(),
        };
        assert!(matches!(
            write_pdf(&doc, &HelveticaLayout, &info()),
            Err(PdfError::EmptyDocument)
        ));
    }

    #[test]
    fn test_pdf_structure() {
        let bytes = render(&relieving_form());
        assert!(bytes.starts_with(b"%PDF-1.4"));

        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);

        let base_fonts: Vec<Vec<u8>> = parsed
            .objects
            .values()
            .filter_map(|o| o.as_dict().ok())
            .filter_map(|d| d.get(b"BaseFont").ok())
            .filter_map(|n| n.as_name().ok())
            .map(<[u8]>::to_vec)
            .collect();
        for face in FontFace::ALL {
            assert!(base_fonts.contains(&face.base_font().as_bytes().to_vec()));
        }
    }

    #[test]
    fn test_page_tree_matches_paginated_pages() {
        let doc = LetterDocument {
            letter_type: LetterType::Relieving,
            blocks: (0..40)
                .map(|i| Block::Paragraph(format!("Paragraph {i} ").repeat(20)))
                .collect(),
        };
        let paginated = paginate(&doc, &HelveticaLayout, &a4_page());
        assert!(paginated.pages.len() > 1);

        let bytes = write_pdf(&paginated, &HelveticaLayout, &info()).unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), paginated.pages.len());
    }

    #[test]
    fn test_extracted_text_contains_letter_content() {
        let bytes = render(&relieving_form());
        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("RELIEVING LETTER"));
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Acme (India) Pvt Ltd"));
    }

    #[test]
    fn test_rupee_is_drawn_as_rs() {
        let form = FormData {
            fields: LetterFields::Increment(IncrementFields {
                date: "2024-04-01".to_string(),
                current_salary: Some(40000.0),
                new_salary: Some(50000.0),
                reason: String::new(),
            }),
            ..relieving_form()
        };
        let text = pdf_extract::extract_text_from_mem(&render(&form)).unwrap();
        assert!(text.contains("Rs.50,000"));
    }

    #[test]
    fn test_win_ansi_bytes() {
        assert_eq!(win_ansi_bytes("a(b)"), b"a(b)".to_vec());
        assert_eq!(win_ansi_bytes("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(win_ansi_bytes("日本"), b"??".to_vec());
    }

    #[test]
    fn test_alignment_shifts_start_position() {
        let style = TextStyle::regular(10.0);
        let text = |align| DrawCommand::Text {
            text: "Hi".to_string(),
            x: 100.0,
            y: 50.0,
            align,
            style,
        };
        let commands = vec![text(Align::Left), text(Align::Center), text(Align::Right)];
        let starts: Vec<f64> = page_operations(&commands, 297.0, &HelveticaLayout)
            .iter()
            .filter(|op| op.operator == "Td")
            .map(|op| as_number(&op.operands[0]))
            .collect();
        assert_eq!(starts.len(), 3);
        assert!(starts[1] < starts[0]);
        assert!(starts[2] < starts[1]);
    }
}
