//! Fixed one-page layout for the resume details document.
//!
//! Produces draw operations in top-down page coordinates (points, origin at
//! the top-left corner). `pdf` flips them into PDF space when serializing.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::export::font_metrics::{get_metrics, FontFace};
use crate::models::record::{Field, Record};

pub const TITLE: &str = "Resume Details";
pub const MISSING_VALUE: &str = "N/A";

const TITLE_SIZE: f32 = 24.0;
const BODY_SIZE: f32 = 14.0;
const FOOTER_SIZE: f32 = 10.0;
const LINE_HEIGHT_FACTOR: f32 = 1.2;

const TOP_OFFSET: f32 = 20.0;
const UNDERLINE_OFFSET: f32 = 5.0;
const AFTER_TITLE: f32 = 50.0;
const VALUE_INDENT: f32 = 120.0;
const ROW_GAP: f32 = 20.0;
const LAST_ROW_GAP: f32 = 40.0;
const AFTER_RULE: f32 = 20.0;

const TITLE_COLOR: Rgb = Rgb(51, 51, 51);
const UNDERLINE_COLOR: Rgb = Rgb(22, 160, 133);
const LABEL_COLOR: Rgb = Rgb(68, 68, 68);
const VALUE_COLOR: Rgb = Rgb(102, 102, 102);
const RULE_COLOR: Rgb = Rgb(224, 224, 224);
const FOOTER_COLOR: Rgb = Rgb(136, 136, 136);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// A4 portrait with 40pt margins.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin: 40.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - self.margin * 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    /// `y` is the text baseline.
    Text {
        text: String,
        x: f32,
        y: f32,
        face: FontFace,
        size: f32,
        color: Rgb,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgb,
    },
}

/// The laid-out page: draw operations in paint order plus the final cursor.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub geometry: PageGeometry,
    pub ops: Vec<DrawOp>,
    pub cursor: f32,
}

/// Value drawn for a field; empty fields print [`MISSING_VALUE`].
pub fn display_value(record: &Record, field: Field) -> &str {
    let value = record.get(field);
    if value.is_empty() {
        MISSING_VALUE
    } else {
        value
    }
}

pub fn footer_text(generated_on: NaiveDate) -> String {
    format!("Generated on {}", generated_on.format("%-m/%-d/%Y"))
}

/// Lays out the title, the five labeled rows, the rule and the footer.
pub fn layout_document(
    record: &Record,
    generated_on: NaiveDate,
    geometry: PageGeometry,
) -> DocumentLayout {
    let regular = get_metrics(FontFace::Helvetica);
    let bold = get_metrics(FontFace::HelveticaBold);
    let mut ops = Vec::new();
    let mut y = geometry.margin + TOP_OFFSET;

    // Title with an underline as wide as the rendered title.
    let title_w = bold.measure(TITLE, TITLE_SIZE);
    let title_x = (geometry.width - title_w) / 2.0;
    ops.push(DrawOp::Text {
        text: TITLE.to_string(),
        x: title_x,
        y,
        face: FontFace::HelveticaBold,
        size: TITLE_SIZE,
        color: TITLE_COLOR,
    });
    ops.push(DrawOp::Line {
        from: (title_x, y + UNDERLINE_OFFSET),
        to: (title_x + title_w, y + UNDERLINE_OFFSET),
        width: 2.0,
        color: UNDERLINE_COLOR,
    });
    y += AFTER_TITLE;

    let value_x = geometry.margin + VALUE_INDENT;
    let value_width = geometry.content_width() - VALUE_INDENT;
    let line_height = BODY_SIZE * LINE_HEIGHT_FACTOR;

    for (i, field) in Field::ALL.into_iter().enumerate() {
        ops.push(DrawOp::Text {
            text: format!("{}:", field.label()),
            x: geometry.margin,
            y,
            face: FontFace::HelveticaBold,
            size: BODY_SIZE,
            color: LABEL_COLOR,
        });

        let lines = regular.split_to_width(display_value(record, field), BODY_SIZE, value_width);
        let line_count = lines.len();
        for (j, line) in lines.into_iter().enumerate() {
            ops.push(DrawOp::Text {
                text: line,
                x: value_x,
                y: y + j as f32 * line_height,
                face: FontFace::Helvetica,
                size: BODY_SIZE,
                color: VALUE_COLOR,
            });
        }

        y += line_count as f32 * line_height;
        y += if i + 1 == Field::ALL.len() {
            LAST_ROW_GAP
        } else {
            ROW_GAP
        };
    }

    ops.push(DrawOp::Line {
        from: (geometry.margin, y),
        to: (geometry.width - geometry.margin, y),
        width: 0.5,
        color: RULE_COLOR,
    });
    y += AFTER_RULE;

    let footer = footer_text(generated_on);
    let footer_w = regular.measure(&footer, FOOTER_SIZE);
    ops.push(DrawOp::Text {
        text: footer,
        x: (geometry.width - footer_w) / 2.0,
        y,
        face: FontFace::Helvetica,
        size: FOOTER_SIZE,
        color: FOOTER_COLOR,
    });

    if y > geometry.height - geometry.margin {
        warn!(
            cursor = y,
            page_height = geometry.height,
            "Document content runs past the bottom margin"
        );
    }

    DocumentLayout {
        geometry,
        ops,
        cursor: y,
    }
}
