mod common;

use common::fixtures::{overflowing_cv, sample_cv};
use common::pdf_assertions::media_boxes;
use common::{TestResult, generate_named_pdf, generate_pdf};
use vitae::{CvData, export_pdf_to_dir, pdf_filename};

#[test]
fn filename_comes_from_the_full_name() {
    let cv = sample_cv();
    assert_eq!(pdf_filename(&cv.personal_info), "Ada Lovelace.pdf");
}

#[test]
fn filename_falls_back_to_cv_when_the_name_is_blank() {
    let cv = CvData::default();
    assert_eq!(pdf_filename(&cv.personal_info), "CV.pdf");
}

#[test]
fn exported_document_parses_and_carries_the_content() -> TestResult {
    common::init_logging();
    let (filename, pdf) = generate_named_pdf(&sample_cv())?;
    assert_eq!(filename, "Ada Lovelace.pdf");
    assert!(pdf.bytes.starts_with(b"%PDF-1.7"));
    assert_eq!(pdf.page_count(), 1);

    let text = pdf.text();
    assert!(text.contains("Ada Lovelace"));
    assert!(text.contains("Professional Experience"));
    assert!(text.contains("Analytical Engine Project"));
    assert!(text.contains("Publications"));
    Ok(())
}

#[test]
fn accented_names_survive_export() -> TestResult {
    let mut cv = sample_cv();
    cv.personal_info.full_name = "Zoë Müller".into();
    let (filename, pdf) = generate_named_pdf(&cv)?;
    assert_eq!(filename, "Zoë Müller.pdf");
    assert!(pdf.text().contains("Zoë Müller"));
    Ok(())
}

#[test]
fn ongoing_positions_render_as_present() -> TestResult {
    let pdf = generate_pdf(&sample_cv())?;
    let text = pdf.text();
    assert!(text.contains("1842 - Present"));
    Ok(())
}

#[test]
fn cleared_end_dates_never_resurface() -> TestResult {
    let mut cv = sample_cv();
    let item = &mut cv.sections.experience[0];
    item.end_date = "1850".into();
    item.set_current(true);
    let text = generate_pdf(&cv)?.text();
    assert!(text.contains("1842 - Present"));
    assert!(!text.contains("1850"));
    Ok(())
}

#[test]
fn empty_experience_suppresses_the_whole_section() -> TestResult {
    let mut cv = sample_cv();
    cv.sections.experience.clear();
    let text = generate_pdf(&cv)?.text();
    assert!(!text.contains("Professional Experience"));
    assert!(text.contains("Education"));
    Ok(())
}

#[test]
fn blank_name_renders_the_placeholder() -> TestResult {
    let pdf = generate_pdf(&CvData::default())?;
    assert!(pdf.text().contains("Your Name"));
    Ok(())
}

#[test]
fn every_page_is_a4_portrait() -> TestResult {
    let pdf = generate_pdf(&overflowing_cv(24))?;
    assert!(pdf.page_count() >= 2);
    let boxes = media_boxes(&pdf.doc);
    assert_eq!(boxes.len(), pdf.page_count());
    for rect in boxes {
        assert_eq!(rect, [0.0, 0.0, 595.0, 842.0]);
    }
    Ok(())
}

#[test]
fn skill_levels_appear_next_to_their_names() -> TestResult {
    let text = generate_pdf(&sample_cv())?.text();
    assert!(text.contains("Analysis"));
    assert!(text.contains("Expert"));
    assert!(text.contains("Translation"));
    assert!(text.contains("Advanced"));
    Ok(())
}

#[test]
fn export_to_dir_writes_the_derived_filename() -> TestResult {
    let dir = std::env::temp_dir().join(format!("vitae-export-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let written = export_pdf_to_dir(&sample_cv(), &dir)?;
    assert_eq!(written, dir.join("Ada Lovelace.pdf"));
    let bytes = std::fs::read(&written)?;
    assert!(bytes.starts_with(b"%PDF-1.7"));
    std::fs::remove_dir_all(&dir).ok();
    Ok(())
}

#[test]
fn two_column_export_still_parses() -> TestResult {
    let mut cv = sample_cv();
    cv.layout.toggle_columns();
    let pdf = generate_pdf(&cv)?;
    assert!(pdf.page_count() >= 1);
    assert!(pdf.text().contains("Skills"));
    Ok(())
}
