#![allow(dead_code)]

use vitae::model::{
    CustomSection, CustomSectionItem, CvData, EducationItem, ExperienceItem, SkillItem, SkillLevel,
};

/// A small but fully populated CV touching every section kind.
pub fn sample_cv() -> CvData {
    let mut cv = CvData::default();
    cv.personal_info.full_name = "Ada Lovelace".into();
    cv.personal_info.email = "ada@analytical.engine".into();
    cv.personal_info.phone = "+44 20 1815 1010".into();
    cv.personal_info.address = "London".into();
    cv.personal_info.summary = "Mathematician and writer.".into();
    cv.sections.experience.push(experience(
        "Collaborator",
        "Analytical Engine Project",
        "1842",
        "",
        true,
    ));
    cv.sections.education.push(education(
        "Mathematics",
        "Augustus De Morgan",
        "1840",
        "1842",
    ));
    cv.sections.skills.push(skill("Analysis", SkillLevel::Expert));
    cv.sections
        .skills
        .push(skill("Translation", SkillLevel::Advanced));
    cv.sections.custom_sections.push(custom_section(
        "Publications",
        &["Notes on the Analytical Engine"],
    ));
    cv
}

pub fn experience(
    position: &str,
    company: &str,
    start: &str,
    end: &str,
    current: bool,
) -> ExperienceItem {
    ExperienceItem {
        position: position.into(),
        company: company.into(),
        start_date: start.into(),
        end_date: end.into(),
        current,
        description: format!("Worked as {position} at {company}."),
        ..Default::default()
    }
}

pub fn education(degree: &str, institution: &str, start: &str, end: &str) -> EducationItem {
    EducationItem {
        degree: degree.into(),
        institution: institution.into(),
        start_date: start.into(),
        end_date: end.into(),
        ..Default::default()
    }
}

pub fn skill(name: &str, level: SkillLevel) -> SkillItem {
    SkillItem {
        name: name.into(),
        level,
        ..Default::default()
    }
}

pub fn custom_section(title: &str, item_titles: &[&str]) -> CustomSection {
    CustomSection {
        title: title.into(),
        items: item_titles
            .iter()
            .map(|t| CustomSectionItem {
                title: (*t).into(),
                description: format!("{t}."),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// A CV with enough experience entries to overflow one A4 page.
pub fn overflowing_cv(entries: usize) -> CvData {
    let mut cv = sample_cv();
    cv.sections.experience.clear();
    for i in 0..entries {
        let mut item = experience(
            &format!("Engineer {i}"),
            "Acme",
            "2020",
            "2023",
            false,
        );
        item.description = "Designed and shipped several subsystems.\n\
                            Owned the release process end to end.\n\
                            Mentored two junior engineers."
            .into();
        cv.sections.experience.push(item);
    }
    cv
}
