//! The section renderer: a pure mapping from the document model to a
//! stream of visual blocks.
//!
//! Both the live preview and the export pipeline consume this output, so
//! the functions here are deterministic and hold no state. One [`Block`] is
//! the atomic unit of pagination: a block marked `atomic` is moved to a
//! fresh page rather than split, unless it alone exceeds a full page.

use crate::layout::{Columns, SectionKey};
use crate::model::{CvData, CustomSection, EducationItem, ExperienceItem, SkillLevel};
use crate::stylesheet::{Color, HAIRLINE, INK, StyleId};

/// A renderable element inside a block. Positions and line breaks are
/// decided later by the paginator.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A run of text, wrapped to the region width at layout time.
    Text { content: String, style: StyleId },
    /// Two-part item header: title and optional subtitle stacked on the
    /// left, optional date right-aligned on the title line.
    ItemHeader {
        title: String,
        subtitle: Option<String>,
        date: Option<String>,
    },
    /// Two-column grid of skill name / level pairs.
    SkillsGrid { entries: Vec<(String, SkillLevel)> },
    /// Horizontal rule across the region width.
    Rule {
        thickness: f32,
        color: Color,
        gap_below: f32,
    },
    /// Vertical whitespace between grouped items.
    Spacer { height: f32 },
    /// The profile picture, passed through as the opaque encoded string the
    /// file picker produced.
    Image { data: String },
}

/// Vertical gap between a section heading and its first item.
const TITLE_GAP: f32 = 8.0;
/// Vertical gap between items of the same section.
const ITEM_GAP: f32 = 10.0;
/// Vertical gap after a completed section.
const SECTION_GAP: f32 = 15.0;
/// Reserved square for the profile picture in the header.
const PICTURE_SIZE: f32 = 64.0;

/// One atomic unit for pagination purposes.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub elements: Vec<Element>,
    pub atomic: bool,
    pub gap_below: f32,
}

impl Block {
    fn atomic(elements: Vec<Element>, gap_below: f32) -> Self {
        Block {
            elements,
            atomic: true,
            gap_below,
        }
    }
}

/// The rendered document: an always-full-width header followed by the body
/// in the layout's column mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentContent {
    pub header: Vec<Block>,
    pub body: BodyContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyContent {
    Single(Vec<Block>),
    TwoColumn { left: Vec<Block>, right: Vec<Block> },
}

/// Renders the full document from a model snapshot.
pub fn build_document(cv: &CvData) -> DocumentContent {
    let mut header = vec![header_block(cv)];
    header.extend(summary_block(cv));

    let render_all = |keys: &[SectionKey]| -> Vec<Block> {
        keys.iter()
            .flat_map(|&key| render_section(key, cv))
            .collect()
    };

    let body = match cv.layout.columns {
        Columns::One => BodyContent::Single(render_all(&cv.layout.section_order)),
        Columns::Two => BodyContent::TwoColumn {
            left: render_all(&cv.layout.left_column_sections),
            right: render_all(&cv.layout.right_column_sections),
        },
    };

    DocumentContent { header, body }
}

/// Renders the blocks for one section type. Empty collections render
/// nothing, including the section heading.
pub fn render_section(key: SectionKey, cv: &CvData) -> Vec<Block> {
    let sections = &cv.sections;
    match key {
        SectionKey::Experience => {
            if sections.experience.is_empty() {
                return Vec::new();
            }
            let mut blocks = vec![section_title("Professional Experience")];
            let last = sections.experience.len() - 1;
            for (i, item) in sections.experience.iter().enumerate() {
                blocks.push(experience_item(item, gap_after(i, last)));
            }
            blocks
        }
        SectionKey::Education => {
            if sections.education.is_empty() {
                return Vec::new();
            }
            let mut blocks = vec![section_title("Education")];
            let last = sections.education.len() - 1;
            for (i, item) in sections.education.iter().enumerate() {
                blocks.push(education_item(item, gap_after(i, last)));
            }
            blocks
        }
        SectionKey::Skills => {
            if sections.skills.is_empty() {
                return Vec::new();
            }
            let entries = sections
                .skills
                .iter()
                .map(|s| (s.name.clone(), s.level))
                .collect();
            vec![
                section_title("Skills"),
                Block::atomic(vec![Element::SkillsGrid { entries }], SECTION_GAP),
            ]
        }
        SectionKey::CustomSections => sections
            .custom_sections
            .iter()
            .map(custom_section_block)
            .collect(),
    }
}

fn gap_after(index: usize, last: usize) -> f32 {
    if index == last { SECTION_GAP } else { ITEM_GAP }
}

fn header_block(cv: &CvData) -> Block {
    let info = &cv.personal_info;
    let mut elements = Vec::new();

    if let Some(picture) = &info.profile_picture {
        if !picture.is_empty() {
            elements.push(Element::Image {
                data: picture.clone(),
            });
            elements.push(Element::Spacer { height: 6.0 });
        }
    }

    let name = if info.full_name.is_empty() {
        "Your Name"
    } else {
        &info.full_name
    };
    elements.push(Element::Text {
        content: name.to_string(),
        style: StyleId::FullName,
    });

    let contact: Vec<&str> = [&info.email, &info.phone, &info.address]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect();
    if !contact.is_empty() {
        elements.push(Element::Text {
            content: contact.join(" | "),
            style: StyleId::Contact,
        });
    }

    elements.push(Element::Spacer { height: 10.0 });
    elements.push(Element::Rule {
        thickness: 2.0,
        color: INK,
        gap_below: 0.0,
    });

    Block::atomic(elements, 20.0)
}

fn summary_block(cv: &CvData) -> Option<Block> {
    let summary = &cv.personal_info.summary;
    if summary.is_empty() {
        return None;
    }
    let mut block = section_title("Professional Summary");
    block.elements.push(Element::Text {
        content: summary.clone(),
        style: StyleId::Summary,
    });
    block.gap_below = SECTION_GAP;
    Some(block)
}

fn section_title(title: &str) -> Block {
    Block::atomic(
        vec![
            Element::Text {
                content: title.to_string(),
                style: StyleId::SectionTitle,
            },
            Element::Rule {
                thickness: 1.0,
                color: HAIRLINE,
                gap_below: TITLE_GAP,
            },
        ],
        0.0,
    )
}

fn date_range(start: &str, end: &str, current: bool) -> String {
    let end = if current { "Present" } else { end };
    format!("{start} - {end}")
}

fn experience_item(item: &ExperienceItem, gap_below: f32) -> Block {
    let mut elements = vec![Element::ItemHeader {
        title: item.position.clone(),
        subtitle: Some(item.company.clone()),
        date: Some(date_range(&item.start_date, &item.end_date, item.current)),
    }];
    if !item.description.is_empty() {
        elements.push(Element::Text {
            content: item.description.clone(),
            style: StyleId::ItemDescription,
        });
    }
    Block::atomic(elements, gap_below)
}

fn education_item(item: &EducationItem, gap_below: f32) -> Block {
    let mut elements = vec![Element::ItemHeader {
        title: item.degree.clone(),
        subtitle: Some(item.institution.clone()),
        date: Some(date_range(&item.start_date, &item.end_date, item.current)),
    }];
    if !item.description.is_empty() {
        elements.push(Element::Text {
            content: item.description.clone(),
            style: StyleId::ItemDescription,
        });
    }
    Block::atomic(elements, gap_below)
}

/// A custom section renders as one atomic group: heading, rule, and all of
/// its items together.
fn custom_section_block(section: &CustomSection) -> Block {
    let mut elements = vec![
        Element::Text {
            content: section.title.clone(),
            style: StyleId::SectionTitle,
        },
        Element::Rule {
            thickness: 1.0,
            color: HAIRLINE,
            gap_below: TITLE_GAP,
        },
    ];
    let last = section.items.len().saturating_sub(1);
    for (i, item) in section.items.iter().enumerate() {
        elements.push(Element::ItemHeader {
            title: item.title.clone(),
            subtitle: item.subtitle.clone().filter(|s| !s.is_empty()),
            date: item.date.clone().filter(|s| !s.is_empty()),
        });
        if !item.description.is_empty() {
            elements.push(Element::Text {
                content: item.description.clone(),
                style: StyleId::ItemDescription,
            });
        }
        if i != last {
            elements.push(Element::Spacer { height: ITEM_GAP });
        }
    }
    Block::atomic(elements, SECTION_GAP)
}

/// Picks the profile picture data back out of a rendered header, if any.
pub fn header_picture(content: &DocumentContent) -> Option<&str> {
    content.header.iter().flat_map(|b| &b.elements).find_map(|e| match e {
        Element::Image { data } => Some(data.as_str()),
        _ => None,
    })
}

/// Reserved edge length for the profile picture slot.
pub fn picture_size() -> f32 {
    PICTURE_SIZE
}
