//! The CV document model.
//!
//! Pure data: personal details, the four ordered section collections, and
//! the layout descriptor. All fields default to blank, and every mutation
//! goes through the patch types at the bottom of this module, which perform
//! a shallow merge into the corresponding sub-object.

use crate::layout::CvLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    /// Opaque encoded image data (a data URL handed over by the file
    /// picker). Stored and passed through as-is, never re-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub id: String,
    pub position: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub current: bool,
}

impl Default for ExperienceItem {
    fn default() -> Self {
        ExperienceItem {
            id: new_id(),
            position: String::new(),
            company: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            current: false,
        }
    }
}

impl ExperienceItem {
    /// Marks the position as ongoing. The stored end date is cleared so a
    /// stale value can never resurface in the rendered date range.
    pub fn set_current(&mut self, current: bool) {
        self.current = current;
        if current {
            self.end_date.clear();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub current: bool,
}

impl Default for EducationItem {
    fn default() -> Self {
        EducationItem {
            id: new_id(),
            degree: String::new(),
            institution: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            current: false,
        }
    }
}

impl EducationItem {
    pub fn set_current(&mut self, current: bool) {
        self.current = current;
        if current {
            self.end_date.clear();
        }
    }
}

/// Self-assessed proficiency for a skill entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Default for SkillLevel {
    fn default() -> Self {
        SkillLevel::Beginner
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillItem {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

impl Default for SkillItem {
    fn default() -> Self {
        SkillItem {
            id: new_id(),
            name: String::new(),
            level: SkillLevel::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub items: Vec<CustomSectionItem>,
}

impl Default for CustomSection {
    fn default() -> Self {
        CustomSection {
            id: new_id(),
            title: String::new(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSectionItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Default for CustomSectionItem {
    fn default() -> Self {
        CustomSectionItem {
            id: new_id(),
            title: String::new(),
            subtitle: None,
            description: String::new(),
            date: None,
        }
    }
}

/// The four ordered section collections. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvSections {
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<SkillItem>,
    pub custom_sections: Vec<CustomSection>,
}

/// Root of the document model. Owned by the editing session, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvData {
    pub personal_info: PersonalInfo,
    pub sections: CvSections,
    pub layout: CvLayout,
}

// --- Partial updates ---
//
// Each patch mirrors its target with every field optional. `apply`
// replaces only the fields that are present; keys a patch does not know
// about are dropped by serde during deserialization rather than rejected.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub summary: Option<String>,
    pub profile_picture: Option<String>,
}

impl PersonalInfoUpdate {
    pub fn apply(self, target: &mut PersonalInfo) {
        if let Some(v) = self.full_name {
            target.full_name = v;
        }
        if let Some(v) = self.email {
            target.email = v;
        }
        if let Some(v) = self.phone {
            target.phone = v;
        }
        if let Some(v) = self.address {
            target.address = v;
        }
        if let Some(v) = self.summary {
            target.summary = v;
        }
        if let Some(v) = self.profile_picture {
            // The picker clears a picture by sending an empty string.
            target.profile_picture = if v.is_empty() { None } else { Some(v) };
        }
    }
}

/// Wholesale replacement of one or more section collections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionsUpdate {
    pub experience: Option<Vec<ExperienceItem>>,
    pub education: Option<Vec<EducationItem>>,
    pub skills: Option<Vec<SkillItem>>,
    pub custom_sections: Option<Vec<CustomSection>>,
}

impl SectionsUpdate {
    pub fn apply(self, target: &mut CvSections) {
        if let Some(v) = self.experience {
            target.experience = v;
        }
        if let Some(v) = self.education {
            target.education = v;
        }
        if let Some(v) = self.skills {
            target.skills = v;
        }
        if let Some(v) = self.custom_sections {
            target.custom_sections = v;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutUpdate {
    pub columns: Option<crate::layout::Columns>,
    pub section_order: Option<Vec<crate::layout::SectionKey>>,
    pub left_column_sections: Option<Vec<crate::layout::SectionKey>>,
    pub right_column_sections: Option<Vec<crate::layout::SectionKey>>,
}

impl LayoutUpdate {
    pub fn apply(self, target: &mut CvLayout) {
        if let Some(v) = self.columns {
            target.columns = v;
        }
        if let Some(v) = self.section_order {
            target.section_order = v;
        }
        if let Some(v) = self.left_column_sections {
            target.left_column_sections = v;
        }
        if let Some(v) = self.right_column_sections {
            target.right_column_sections = v;
        }
    }
}
