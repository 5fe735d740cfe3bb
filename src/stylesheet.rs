//! Fixed styles for the rendered CV.
//!
//! The document design is not user-configurable, so instead of a string
//! keyed style map there is one exhaustive [`StyleId`] per visual role,
//! resolved to a [`ComputedStyle`] value. Sizes are in PDF points.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Body text color used throughout the document.
pub const INK: Color = Color { r: 51, g: 51, b: 51 };

/// Muted color for dates, subtitles, and skill levels.
pub const MUTED: Color = Color { r: 102, g: 102, b: 102 };

/// Light rule color under section titles.
pub const HAIRLINE: Color = Color { r: 204, g: 204, b: 204 };

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn bottom(value: f32) -> Self {
        Margins {
            bottom: value,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

/// Every visual role in the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleId {
    /// The full name at the top of the header.
    FullName,
    /// The joined contact line under the name.
    Contact,
    /// Section headings such as "Professional Experience".
    SectionTitle,
    /// Item title (position, degree, custom item title).
    ItemTitle,
    /// Item subtitle (company, institution).
    ItemSubtitle,
    /// Right-aligned date range on the item title line.
    ItemDate,
    /// Item description paragraph.
    ItemDescription,
    /// Summary paragraph.
    Summary,
    /// Skill names in the grid.
    SkillName,
    /// Skill levels in the grid.
    SkillLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub line_height: f32,
    pub text_align: TextAlign,
    pub color: Color,
    pub margin: Margins,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        ComputedStyle {
            font_size: 11.0,
            font_weight: FontWeight::Regular,
            line_height: 11.0 * 1.4,
            text_align: TextAlign::Left,
            color: INK,
            margin: Margins::default(),
        }
    }
}

impl ComputedStyle {
    fn sized(font_size: f32) -> Self {
        ComputedStyle {
            font_size,
            line_height: font_size * 1.4,
            ..Default::default()
        }
    }

    fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    fn centered(mut self) -> Self {
        self.text_align = TextAlign::Center;
        self
    }

    fn muted(mut self) -> Self {
        self.color = MUTED;
        self
    }

    fn with_margin(mut self, margin: Margins) -> Self {
        self.margin = margin;
        self
    }
}

/// Resolves a style role to its concrete values.
pub fn style(id: StyleId) -> ComputedStyle {
    match id {
        StyleId::FullName => ComputedStyle::sized(28.0)
            .bold()
            .centered()
            .with_margin(Margins::bottom(4.0)),
        StyleId::Contact => ComputedStyle::sized(9.0).centered(),
        StyleId::SectionTitle => ComputedStyle::sized(14.0)
            .bold()
            .with_margin(Margins::bottom(3.0)),
        StyleId::ItemTitle => ComputedStyle::sized(11.0).bold(),
        StyleId::ItemSubtitle => ComputedStyle::sized(10.0).muted(),
        StyleId::ItemDate => ComputedStyle::sized(9.0).muted(),
        StyleId::ItemDescription => {
            ComputedStyle::sized(10.0).with_margin(Margins {
                top: 4.0,
                ..Default::default()
            })
        }
        StyleId::Summary => ComputedStyle::sized(11.0),
        StyleId::SkillName => ComputedStyle::sized(11.0),
        StyleId::SkillLevel => ComputedStyle::sized(9.0).muted(),
    }
}
