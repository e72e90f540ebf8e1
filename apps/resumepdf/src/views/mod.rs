//! Server-rendered pages. Templates are compiled into the binary and parsed
//! once at startup; `.html` templates are autoescaped by Tera.

use tera::{Context, Tera};

use crate::form::{EntryForm, Flow, PreviewRow};

const TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("form.html", include_str!("../../templates/form.html")),
    ("preview.html", include_str!("../../templates/preview.html")),
];

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    /// Entry form. `notice` is a blocking message shown above the form.
    pub fn render_form(&self, form: &EntryForm, notice: Option<&str>) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("fields", &form.fields());
        context.insert("notice", &notice);
        self.tera.render("form.html", &context)
    }

    pub fn render_preview(
        &self,
        rows: &[PreviewRow],
        notice: Option<&str>,
    ) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("rows", rows);
        context.insert("back_href", Flow::Preview.back().path());
        context.insert("notice", &notice);
        self.tera.render("preview.html", &context)
    }
}
