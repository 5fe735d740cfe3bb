//! The page flow engine.
//!
//! Consumes the renderer's block stream and positions every element on a
//! sequence of fixed-size A4 pages. Atomic blocks that would straddle the
//! page boundary are pushed to a fresh page when they fit one; a block
//! taller than a whole page flows element-by-element across pages instead.
//!
//! In two-column mode the header flows full width, then the column buckets
//! flow inside their own region with independent cursors. A column that
//! runs out of space continues at the top of its region on the next page;
//! no cross-page balancing is attempted.

use crate::document::{BodyContent, Block, DocumentContent, Element, picture_size};
use crate::error::ExportError;
use crate::stylesheet::{self, Color, ComputedStyle, StyleId, TextAlign};
use itertools::Itertools;

/// Tolerance for floating point inaccuracies in break decisions.
pub const BREAK_EPSILON: f32 = 0.01;

/// Horizontal gap between the two body columns.
const COLUMN_GAP: f32 = 20.0;
/// Gap between the cells of a skills grid row.
const GRID_GAP: f32 = 8.0;
/// Narrowest cell the skills grid will split into. Regions that cannot fit
/// two cells this wide fall back to one skill per row, so a long level
/// label never squeezes its name out.
const MIN_GRID_CELL: f32 = 120.0;
/// Minimum space between an item title and its right-aligned date.
const DATE_GAP: f32 = 8.0;

/// Physical page geometry, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageMetrics {
    /// A4 portrait (210mm x 297mm) with the document's 30pt padding.
    pub fn a4() -> Self {
        PageMetrics {
            width: 595.0,
            height: 842.0,
            margin: 30.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }
}

/// A drawing command for the PDF writer. Text is pre-wrapped: one command
/// per line, with alignment already resolved into the x position.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Text(String),
    Rule(Color),
    /// Reserved slot for the profile picture; carries the opaque encoded
    /// data untouched.
    Image(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub content: DrawCmd,
    pub style: ComputedStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub elements: Vec<PositionedElement>,
}

impl Page {
    fn new(number: usize) -> Self {
        Page {
            number,
            elements: Vec::new(),
        }
    }
}

/// Cursor-based flow of blocks into pages.
pub struct Paginator {
    metrics: PageMetrics,
    pages: Vec<Page>,
    page_index: usize,
    cursor_y: f32,
    region_x: f32,
    region_width: f32,
}

impl Paginator {
    pub fn new(metrics: PageMetrics) -> Result<Self, ExportError> {
        if metrics.content_width() <= 0.0 || metrics.content_height() <= 0.0 {
            return Err(ExportError::Capture(format!(
                "page {}x{}pt with {}pt margins leaves no content area",
                metrics.width, metrics.height, metrics.margin
            )));
        }
        Ok(Paginator {
            metrics,
            pages: vec![Page::new(1)],
            page_index: 0,
            cursor_y: metrics.margin,
            region_x: metrics.margin,
            region_width: metrics.content_width(),
        })
    }

    /// Flows the whole document and returns the finished pages.
    pub fn paginate(mut self, content: &DocumentContent) -> Result<Vec<Page>, ExportError> {
        for block in &content.header {
            self.flow_block(block);
        }

        match &content.body {
            BodyContent::Single(blocks) => {
                for block in blocks {
                    self.flow_block(block);
                }
            }
            BodyContent::TwoColumn { left, right } => {
                let start_page = self.page_index;
                let start_y = self.cursor_y;
                let full_width = self.metrics.content_width();
                let left_width = (full_width - COLUMN_GAP) * 2.0 / 3.0;
                let right_width = full_width - COLUMN_GAP - left_width;

                self.set_region(self.metrics.margin, left_width);
                for block in left {
                    self.flow_block(block);
                }
                let left_end = (self.page_index, self.cursor_y);

                self.page_index = start_page;
                self.cursor_y = start_y;
                self.set_region(self.metrics.margin + left_width + COLUMN_GAP, right_width);
                for block in right {
                    self.flow_block(block);
                }
                let right_end = (self.page_index, self.cursor_y);

                self.set_region(self.metrics.margin, full_width);
                let (page, y) = if right_end.0 > left_end.0
                    || (right_end.0 == left_end.0 && right_end.1 > left_end.1)
                {
                    right_end
                } else {
                    left_end
                };
                self.page_index = page;
                self.cursor_y = y;
            }
        }

        log::debug!(
            "paginated document into {} page(s) of {}x{}pt",
            self.pages.len(),
            self.metrics.width,
            self.metrics.height
        );
        Ok(self.pages)
    }

    fn set_region(&mut self, x: f32, width: f32) {
        self.region_x = x;
        self.region_width = width;
    }

    fn flow_block(&mut self, block: &Block) {
        if block.atomic {
            let total = self.measure_block(block);
            if self.needs_page_break(total) && total <= self.metrics.content_height() + BREAK_EPSILON
            {
                self.new_page();
            }
        }
        for element in &block.elements {
            self.flow_element(element);
        }
        self.cursor_y += block.gap_below;
    }

    fn measure_block(&self, block: &Block) -> f32 {
        block
            .elements
            .iter()
            .map(|e| self.measure_element(e))
            .sum()
    }

    fn measure_element(&self, element: &Element) -> f32 {
        match element {
            Element::Text { content, style } => {
                let style = stylesheet::style(*style);
                let lines = wrap_text(content, &style, self.region_width);
                style.margin.top + lines.len() as f32 * style.line_height + style.margin.bottom
            }
            Element::ItemHeader {
                title,
                subtitle,
                date,
            } => self.measure_item_header(title, subtitle.as_deref(), date.as_deref()),
            Element::SkillsGrid { entries } => {
                let style = stylesheet::style(StyleId::SkillName);
                let rows = entries.len().div_ceil(skills_grid_columns(self.region_width));
                rows as f32 * style.line_height
            }
            Element::Rule {
                thickness,
                gap_below,
                ..
            } => thickness + gap_below,
            Element::Spacer { height } => *height,
            Element::Image { .. } => picture_size(),
        }
    }

    fn measure_item_header(&self, title: &str, subtitle: Option<&str>, date: Option<&str>) -> f32 {
        let title_style = stylesheet::style(StyleId::ItemTitle);
        let date_style = stylesheet::style(StyleId::ItemDate);
        let date_width = date.map_or(0.0, |d| text_width(d, &date_style));
        let title_width = if date_width > 0.0 {
            (self.region_width - date_width - DATE_GAP).max(1.0)
        } else {
            self.region_width
        };
        let mut height =
            wrap_text(title, &title_style, title_width).len() as f32 * title_style.line_height;
        if let Some(subtitle) = subtitle {
            let style = stylesheet::style(StyleId::ItemSubtitle);
            height += wrap_text(subtitle, &style, self.region_width).len() as f32
                * style.line_height;
        }
        height
    }

    fn flow_element(&mut self, element: &Element) {
        match element {
            Element::Text { content, style } => self.flow_text(content, *style),
            Element::ItemHeader {
                title,
                subtitle,
                date,
            } => self.flow_item_header(title, subtitle.as_deref(), date.as_deref()),
            Element::SkillsGrid { entries } => self.flow_skills_grid(entries),
            Element::Rule {
                thickness,
                color,
                gap_below,
            } => self.flow_rule(*thickness, *color, *gap_below),
            Element::Spacer { height } => self.cursor_y += height,
            Element::Image { data } => self.flow_image(data),
        }
    }

    fn flow_text(&mut self, content: &str, style_id: StyleId) {
        let style = stylesheet::style(style_id);
        self.cursor_y += style.margin.top;
        for line in wrap_text(content, &style, self.region_width) {
            if self.needs_page_break(style.line_height) {
                self.new_page();
            }
            self.push_line(&line, &style, self.region_x, self.region_width);
            self.cursor_y += style.line_height;
        }
        self.cursor_y += style.margin.bottom;
    }

    fn flow_item_header(&mut self, title: &str, subtitle: Option<&str>, date: Option<&str>) {
        let total = self.measure_item_header(title, subtitle, date);
        if self.needs_page_break(total) && total <= self.metrics.content_height() + BREAK_EPSILON {
            self.new_page();
        }

        let title_style = stylesheet::style(StyleId::ItemTitle);
        let date_style = stylesheet::style(StyleId::ItemDate);
        let date_width = date.map_or(0.0, |d| text_width(d, &date_style));
        let title_width = if date_width > 0.0 {
            (self.region_width - date_width - DATE_GAP).max(1.0)
        } else {
            self.region_width
        };

        for (i, line) in wrap_text(title, &title_style, title_width)
            .into_iter()
            .enumerate()
        {
            if self.needs_page_break(title_style.line_height) {
                self.new_page();
            }
            if i == 0 {
                if let Some(date) = date {
                    let x = self.region_x + self.region_width - date_width;
                    self.push_element(PositionedElement {
                        x,
                        y: self.cursor_y,
                        width: date_width,
                        height: date_style.line_height,
                        content: DrawCmd::Text(date.to_string()),
                        style: date_style,
                    });
                }
            }
            self.push_line(&line, &title_style, self.region_x, title_width);
            self.cursor_y += title_style.line_height;
        }

        if let Some(subtitle) = subtitle {
            let style = stylesheet::style(StyleId::ItemSubtitle);
            for line in wrap_text(subtitle, &style, self.region_width) {
                if self.needs_page_break(style.line_height) {
                    self.new_page();
                }
                self.push_line(&line, &style, self.region_x, self.region_width);
                self.cursor_y += style.line_height;
            }
        }
    }

    fn flow_skills_grid(&mut self, entries: &[(String, crate::model::SkillLevel)]) {
        let name_style = stylesheet::style(StyleId::SkillName);
        let level_style = stylesheet::style(StyleId::SkillLevel);
        let columns = skills_grid_columns(self.region_width);
        let cell_width =
            (self.region_width - GRID_GAP * (columns as f32 - 1.0)) / columns as f32;

        for row in &entries.iter().chunks(columns) {
            if self.needs_page_break(name_style.line_height) {
                self.new_page();
            }
            for (i, (name, level)) in row.enumerate() {
                let cell_x = self.region_x + i as f32 * (cell_width + GRID_GAP);
                let level = level.to_string();
                let level_width = text_width(&level, &level_style);
                // Grid rows are single-line; a name that would run into its
                // right-aligned level is cut at the cell boundary.
                let name_width = (cell_width - level_width - GRID_GAP).max(1.0);
                let name_line = wrap_text(name, &name_style, name_width)
                    .into_iter()
                    .next()
                    .unwrap_or_default();
                self.push_line(&name_line, &name_style, cell_x, name_width);
                self.push_element(PositionedElement {
                    x: cell_x + cell_width - level_width,
                    y: self.cursor_y,
                    width: level_width,
                    height: level_style.line_height,
                    content: DrawCmd::Text(level),
                    style: level_style,
                });
            }
            self.cursor_y += name_style.line_height;
        }
    }

    fn flow_rule(&mut self, thickness: f32, color: Color, gap_below: f32) {
        if self.needs_page_break(thickness) {
            self.new_page();
        }
        self.push_element(PositionedElement {
            x: self.region_x,
            y: self.cursor_y,
            width: self.region_width,
            height: thickness,
            content: DrawCmd::Rule(color),
            style: ComputedStyle::default(),
        });
        self.cursor_y += thickness + gap_below;
    }

    fn flow_image(&mut self, data: &str) {
        let size = picture_size();
        if self.needs_page_break(size) {
            self.new_page();
        }
        self.push_element(PositionedElement {
            x: self.region_x + (self.region_width - size) / 2.0,
            y: self.cursor_y,
            width: size,
            height: size,
            content: DrawCmd::Image(data.to_string()),
            style: ComputedStyle::default(),
        });
        self.cursor_y += size;
    }

    /// One positioned line of text, with alignment resolved against the
    /// given region.
    fn push_line(&mut self, line: &str, style: &ComputedStyle, region_x: f32, region_width: f32) {
        let line_width = text_width(line, style);
        let x = match style.text_align {
            TextAlign::Left => region_x,
            TextAlign::Right => region_x + region_width - line_width,
            TextAlign::Center => region_x + (region_width - line_width) / 2.0,
        };
        self.push_element(PositionedElement {
            x,
            y: self.cursor_y,
            width: line_width.min(region_width),
            height: style.line_height,
            content: DrawCmd::Text(line.to_string()),
            style: *style,
        });
    }

    fn push_element(&mut self, element: PositionedElement) {
        self.pages[self.page_index].elements.push(element);
    }

    fn needs_page_break(&self, required_height: f32) -> bool {
        let available = (self.metrics.content_bottom() - self.cursor_y).max(0.0);
        required_height > available + BREAK_EPSILON
    }

    fn new_page(&mut self) {
        self.page_index += 1;
        if self.page_index == self.pages.len() {
            self.pages.push(Page::new(self.page_index + 1));
        }
        self.cursor_y = self.metrics.margin;
    }
}

fn skills_grid_columns(region_width: f32) -> usize {
    if (region_width - GRID_GAP) / 2.0 >= MIN_GRID_CELL {
        2
    } else {
        1
    }
}

/// Greedy word wrap using the same character-width approximation as
/// [`text_width`]. Blank input lines are preserved.
pub fn wrap_text(text: &str, style: &ComputedStyle, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 {
        return text.lines().map(str::to_string).collect();
    }
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width(&candidate, style) > max_width && !current.is_empty() {
                lines.push(current);
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Rough width approximation for the base-14 Helvetica family.
pub fn text_width(text: &str, style: &ComputedStyle) -> f32 {
    text.chars().count() as f32 * style.font_size * 0.6
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BodyContent, DocumentContent, Element};
    use crate::stylesheet::INK;

    fn rule_block(height: f32) -> Block {
        Block {
            elements: vec![Element::Rule {
                thickness: height,
                color: INK,
                gap_below: 0.0,
            }],
            atomic: true,
            gap_below: 0.0,
        }
    }

    fn doc(blocks: Vec<Block>) -> DocumentContent {
        DocumentContent {
            header: Vec::new(),
            body: BodyContent::Single(blocks),
        }
    }

    fn paginate(content: &DocumentContent) -> Vec<Page> {
        Paginator::new(PageMetrics::a4())
            .unwrap()
            .paginate(content)
            .unwrap()
    }

    #[test]
    fn half_page_blocks_totalling_two_and_a_half_pages_give_three_pages() {
        let half = PageMetrics::a4().content_height() / 2.0;
        let pages = paginate(&doc((0..5).map(|_| rule_block(half)).collect()));
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].elements.len(), 2);
        assert_eq!(pages[1].elements.len(), 2);
        assert_eq!(pages[2].elements.len(), 1);
    }

    #[test]
    fn elements_never_cross_the_page_boundary() {
        let metrics = PageMetrics::a4();
        let half = metrics.content_height() / 2.0;
        let pages = paginate(&doc((0..5).map(|_| rule_block(half)).collect()));
        for page in &pages {
            for el in &page.elements {
                assert!(el.y >= metrics.margin - BREAK_EPSILON);
                assert!(el.y + el.height <= metrics.height - metrics.margin + BREAK_EPSILON);
            }
        }
    }

    #[test]
    fn consecutive_elements_leave_no_gap_or_overlap() {
        let metrics = PageMetrics::a4();
        let half = metrics.content_height() / 2.0;
        let pages = paginate(&doc((0..5).map(|_| rule_block(half)).collect()));
        for page in &pages {
            for pair in page.elements.windows(2) {
                let delta = pair[1].y - (pair[0].y + pair[0].height);
                assert!(delta.abs() <= BREAK_EPSILON, "gap/overlap of {delta}pt");
            }
        }
    }

    #[test]
    fn atomic_block_moves_whole_to_next_page() {
        let metrics = PageMetrics::a4();
        let tall = metrics.content_height() * 0.7;
        // Second block does not fit the remaining 30%; it must start page 2.
        let pages = paginate(&doc(vec![rule_block(tall), rule_block(tall)]));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].elements.len(), 1);
        assert_eq!(pages[1].elements.len(), 1);
        assert!((pages[1].elements[0].y - metrics.margin).abs() < BREAK_EPSILON);
    }

    #[test]
    fn oversized_block_overflows_without_losing_elements() {
        let metrics = PageMetrics::a4();
        let line = metrics.content_height() / 4.0;
        // A single atomic block of 6 quarter-page rules cannot fit any page;
        // it must flow across two pages with all elements intact.
        let block = Block {
            elements: (0..6)
                .map(|_| Element::Rule {
                    thickness: line,
                    color: INK,
                    gap_below: 0.0,
                })
                .collect(),
            atomic: true,
            gap_below: 0.0,
        };
        let pages = paginate(&doc(vec![block]));
        assert_eq!(pages.len(), 2);
        let total: usize = pages.iter().map(|p| p.elements.len()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn degenerate_page_geometry_is_a_capture_failure() {
        let metrics = PageMetrics {
            width: 40.0,
            height: 40.0,
            margin: 30.0,
        };
        let err = Paginator::new(metrics).map(|_| ()).unwrap_err();
        assert!(matches!(err, ExportError::Capture(_)));
    }

    #[test]
    fn wrap_respects_max_width() {
        let style = stylesheet::style(StyleId::Summary);
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, &style, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, &style) <= 120.0 + BREAK_EPSILON);
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn narrow_region_skills_grid_falls_back_to_one_column() {
        use crate::model::SkillLevel;
        // The right column of a two-column body is too narrow for two grid
        // cells once a long level label is placed, so each skill gets its
        // own row and the name keeps its full width.
        let content = DocumentContent {
            header: Vec::new(),
            body: BodyContent::TwoColumn {
                left: Vec::new(),
                right: vec![Block {
                    elements: vec![Element::SkillsGrid {
                        entries: vec![
                            ("Microservices".into(), SkillLevel::Intermediate),
                            ("Kubernetes".into(), SkillLevel::Advanced),
                        ],
                    }],
                    atomic: true,
                    gap_below: 0.0,
                }],
            },
        };
        let pages = paginate(&content);
        assert_eq!(pages.len(), 1);

        let rows: std::collections::BTreeSet<i64> = pages[0]
            .elements
            .iter()
            .map(|e| e.y.round() as i64)
            .collect();
        assert_eq!(rows.len(), 2);

        let name = pages[0]
            .elements
            .iter()
            .find(|e| matches!(&e.content, DrawCmd::Text(t) if t == "Microservices"))
            .expect("skill name element");
        let style = stylesheet::style(StyleId::SkillName);
        assert!((name.width - text_width("Microservices", &style)).abs() < BREAK_EPSILON);
    }

    #[test]
    fn two_column_body_flows_in_separate_regions() {
        let metrics = PageMetrics::a4();
        let content = DocumentContent {
            header: Vec::new(),
            body: BodyContent::TwoColumn {
                left: vec![rule_block(50.0)],
                right: vec![rule_block(50.0)],
            },
        };
        let pages = Paginator::new(metrics).unwrap().paginate(&content).unwrap();
        assert_eq!(pages.len(), 1);
        let els = &pages[0].elements;
        assert_eq!(els.len(), 2);
        // Left region is two thirds of the content width, right one third.
        assert!(els[0].width > els[1].width);
        assert!(els[1].x > els[0].x + els[0].width);
        assert_eq!(els[0].y, els[1].y);
    }
}
