//! Section ordering and column assignment.
//!
//! A CV is rendered as a header followed by four kinds of sections. The
//! layout descriptor keeps the single-column rendering order as the source
//! of truth and, in two-column mode, an additional left/right bucketing of
//! the same keys.

use serde::{Deserialize, Serialize};

/// The fixed set of section types a CV can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Experience,
    Education,
    Skills,
    CustomSections,
}

impl SectionKey {
    /// Canonical order, used to seed a fresh layout.
    pub const ALL: [SectionKey; 4] = [
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::CustomSections,
    ];
}

/// Column count of the rendered body. Serialized as the numbers 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Columns {
    One,
    Two,
}

impl From<Columns> for u8 {
    fn from(c: Columns) -> u8 {
        match c {
            Columns::One => 1,
            Columns::Two => 2,
        }
    }
}

impl TryFrom<u8> for Columns {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Columns::One),
            2 => Ok(Columns::Two),
            other => Err(format!("invalid column count: {other}")),
        }
    }
}

/// Target column for [`CvLayout::move_section_to_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

/// Ordering and column assignment of the CV body sections.
///
/// `section_order` is always a permutation of [`SectionKey::ALL`]. The
/// column buckets are disjoint subsets of it and are only consulted while
/// `columns == Columns::Two`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvLayout {
    pub columns: Columns,
    pub section_order: Vec<SectionKey>,
    pub left_column_sections: Vec<SectionKey>,
    pub right_column_sections: Vec<SectionKey>,
}

impl Default for CvLayout {
    fn default() -> Self {
        CvLayout {
            columns: Columns::One,
            section_order: SectionKey::ALL.to_vec(),
            left_column_sections: Vec::new(),
            right_column_sections: Vec::new(),
        }
    }
}

impl CvLayout {
    /// Moves `active` to the position `over` currently occupies, shifting
    /// the entries in between. No-op when the keys are equal or either is
    /// missing from the order.
    pub fn reorder_sections(&mut self, active: SectionKey, over: SectionKey) {
        if active == over {
            return;
        }
        let (Some(from), Some(to)) = (
            self.section_order.iter().position(|&k| k == active),
            self.section_order.iter().position(|&k| k == over),
        ) else {
            return;
        };
        let key = self.section_order.remove(from);
        self.section_order.insert(to, key);
    }

    /// Flips between single- and two-column mode.
    ///
    /// Entering two-column mode seeds the buckets deterministically from the
    /// current order (first two keys left, remainder right) so no section is
    /// dropped. Leaving it keeps `section_order` untouched; the stale
    /// buckets are retained but unused, and the next 1->2 toggle reseeds
    /// them from the order.
    pub fn toggle_columns(&mut self) {
        match self.columns {
            Columns::One => {
                self.columns = Columns::Two;
                let split = self.section_order.len().min(2);
                self.left_column_sections = self.section_order[..split].to_vec();
                self.right_column_sections = self.section_order[split..].to_vec();
            }
            Columns::Two => {
                self.columns = Columns::One;
            }
        }
    }

    /// Moves `key` to the end of the given column bucket, removing it from
    /// whichever bucket currently holds it. A key is never present in both
    /// buckets at once.
    pub fn move_section_to_column(&mut self, key: SectionKey, column: Column) {
        self.left_column_sections.retain(|&k| k != key);
        self.right_column_sections.retain(|&k| k != key);
        match column {
            Column::Left => self.left_column_sections.push(key),
            Column::Right => self.right_column_sections.push(key),
        }
    }
}
