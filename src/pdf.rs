//! In-memory PDF writer using the `lopdf` library.
//!
//! Builds the document's object graph page by page from positioned
//! elements and serializes it to a byte buffer in one step at the end, so
//! a failure can never leave a partially written file behind. Text uses
//! the base-14 Helvetica family, which every reader ships.

use crate::error::ExportError;
use crate::paginate::{DrawCmd, Page, PageMetrics, PositionedElement};
use crate::stylesheet::{Color, FontWeight};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::Cursor;

pub struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    metrics: PageMetrics,
}

impl PdfWriter {
    pub fn new(metrics: PageMetrics) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        PdfWriter {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            metrics,
        }
    }

    /// Renders all pages and returns the finished PDF bytes.
    pub fn write(mut self, pages: &[Page]) -> Result<Vec<u8>, ExportError> {
        self.begin_document();
        for page in pages {
            self.write_page(page)?;
        }
        self.finish()
    }

    fn begin_document(&mut self) {
        let regular = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        // One shared resources dictionary; every page refers to it.
        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
            },
        };
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);
    }

    fn write_page(&mut self, page: &Page) -> Result<(), ExportError> {
        let mut ctx = PageContext::new(self.metrics.height);
        for element in &page.elements {
            ctx.draw_element(element);
        }
        let content = ctx.finish();

        let content_stream = Stream::new(dictionary! {}, content.encode()?);
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                self.metrics.width.into(),
                self.metrics.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>, ExportError> {
        if let Some(Object::Dictionary(pages_dict)) =
            self.document.objects.get_mut(&self.pages_id)
        {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", self.page_ids.len() as i32);
        }
        self.document.compress();

        let mut cursor = Cursor::new(Vec::new());
        self.document.save_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

// The declared fonts use WinAnsiEncoding, so text must be single-byte
// Latin-1. Characters outside that range have no glyph in the base-14 set.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}

/// Builds the content stream for a single page, deduplicating font and
/// color state changes between consecutive text runs.
struct PageContext {
    page_height: f32,
    content: Content,
    state: RenderState,
}

#[derive(Default, Clone, PartialEq)]
struct RenderState {
    font_name: &'static str,
    font_size: f32,
    fill_color: Option<Color>,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        PageContext {
            page_height,
            content: Content {
                operations: Vec::new(),
            },
            state: RenderState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn draw_element(&mut self, el: &PositionedElement) {
        match &el.content {
            DrawCmd::Text(text) => self.draw_text(text, el),
            DrawCmd::Rule(color) => self.draw_rule(el, *color),
            DrawCmd::Image(_) => {
                log::warn!(
                    "profile picture is carried but not drawn by the PDF writer; leaving its slot blank"
                );
            }
        }
    }

    fn set_font(&mut self, weight: FontWeight, size: f32) {
        let font_name = match weight {
            FontWeight::Regular => "F1",
            FontWeight::Bold => "F2",
        };
        if self.state.font_name != font_name || self.state.font_size != size {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![font_name.into(), size.into()],
            ));
            self.state.font_name = font_name;
            self.state.font_size = size;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            self.content.operations.push(Operation::new(
                "rg",
                vec![
                    (color.r as f32 / 255.0).into(),
                    (color.g as f32 / 255.0).into(),
                    (color.b as f32 / 255.0).into(),
                ],
            ));
            self.state.fill_color = Some(color);
        }
    }

    fn draw_text(&mut self, text: &str, el: &PositionedElement) {
        if text.trim().is_empty() {
            return;
        }
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(el.style.font_weight, el.style.font_size);
        self.set_fill_color(el.style.color);
        let baseline_y = el.y + el.style.font_size * 0.8;
        let pdf_y = self.page_height - baseline_y;
        self.content
            .operations
            .push(Operation::new("Td", vec![el.x.into(), pdf_y.into()]));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
    }

    fn draw_rule(&mut self, el: &PositionedElement, color: Color) {
        let line_y = self.page_height - (el.y + el.height / 2.0);
        self.content
            .operations
            .push(Operation::new("w", vec![el.height.into()]));
        self.content.operations.push(Operation::new(
            "RG",
            vec![
                (color.r as f32 / 255.0).into(),
                (color.g as f32 / 255.0).into(),
                (color.b as f32 / 255.0).into(),
            ],
        ));
        self.content
            .operations
            .push(Operation::new("m", vec![el.x.into(), line_y.into()]));
        self.content.operations.push(Operation::new(
            "l",
            vec![(el.x + el.width).into(), line_y.into()],
        ));
        self.content.operations.push(Operation::new("S", vec![]));
    }
}
