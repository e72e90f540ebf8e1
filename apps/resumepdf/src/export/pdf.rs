//! Serializes a [`DocumentLayout`] into a one-page PDF with `lopdf`.
//!
//! Text uses the standard Type1 fonts with WinAnsiEncoding, so nothing is
//! embedded. Layout coordinates are top-down; PDF space is bottom-up.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::export::error::ExportError;
use crate::export::font_metrics::FontFace;
use crate::export::layout::{DocumentLayout, DrawOp, Rgb};

const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Renders the layout to PDF bytes. The whole file is built in memory, so a
/// failure never leaves a partial document behind.
pub fn render_pdf(layout: &DocumentLayout, title: &str) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in [FontFace::Helvetica, FontFace::HelveticaBold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let content = Content {
        operations: content_operations(layout),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let geometry = layout.geometry;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn content_operations(layout: &DocumentLayout) -> Vec<Operation> {
    let page_height = layout.geometry.height;
    let mut ops = Vec::new();

    for op in &layout.ops {
        match op {
            DrawOp::Text {
                text,
                x,
                y,
                face,
                size,
                color,
            } => {
                ops.push(fill_color(*color));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![face.resource_name().into(), (*size).into()],
                ));
                ops.push(Operation::new(
                    "Td",
                    vec![(*x).into(), (page_height - *y).into()],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                ops.push(stroke_color(*color));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new(
                    "m",
                    vec![from.0.into(), (page_height - from.1).into()],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![to.0.into(), (page_height - to.1).into()],
                ));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

fn color_operands(Rgb(r, g, b): Rgb) -> Vec<Object> {
    [r, g, b]
        .into_iter()
        .map(|c| Object::from(f32::from(c) / 255.0))
        .collect()
}

fn fill_color(color: Rgb) -> Operation {
    Operation::new("rg", color_operands(color))
}

fn stroke_color(color: Rgb) -> Operation {
    Operation::new("RG", color_operands(color))
}

/// Maps text onto WinAnsiEncoding (CP1252). Characters outside it become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::export::layout::{layout_document, PageGeometry, TITLE};
    use crate::models::record::Record;

    fn rendered(record: &Record) -> Document {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let layout = layout_document(record, date, PageGeometry::A4);
        let bytes = render_pdf(&layout, TITLE).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        Document::load_mem(&bytes).unwrap()
    }

    fn shown_strings(doc: &Document) -> Vec<String> {
        let pages = doc.get_pages();
        let page_id = *pages.values().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_document_has_exactly_one_page() {
        let doc = rendered(&Record::default());
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_content_stream_carries_rows_in_order() {
        let record = Record {
            name: "Ann Lee".to_string(),
            email: "ann@lee.dev".to_string(),
            phone: "5551234567".to_string(),
            ..Record::default()
        };
        let strings = shown_strings(&rendered(&record));
        assert_eq!(strings.first().map(String::as_str), Some("Resume Details"));
        assert_eq!(
            strings.last().map(String::as_str),
            Some("Generated on 3/7/2024")
        );
        let position = strings.iter().position(|s| s == "Position:").unwrap();
        assert_eq!(strings[position + 1], "N/A");
        assert!(strings.iter().any(|s| s == "ann@lee.dev"));
    }

    #[test]
    fn test_both_fonts_are_declared() {
        let doc = rendered(&Record::default());
        let base_fonts: Vec<Vec<u8>> = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter_map(|dict| dict.get(b"BaseFont").ok())
            .filter_map(|name| name.as_name().ok().map(|n| n.to_vec()))
            .collect();
        assert!(base_fonts.contains(&b"Helvetica".to_vec()));
        assert!(base_fonts.contains(&b"Helvetica-Bold".to_vec()));
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Café"), vec![b'C', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }
}
