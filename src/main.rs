use clap::Parser;
use std::env;
use std::fs;
use std::path::PathBuf;
use vitae::model::{CustomSection, CustomSectionItem, EducationItem, ExperienceItem, SkillItem};
use vitae::{CvData, ExportError, SkillLevel, export_pdf_to_dir};

#[derive(Parser, Debug)]
#[command(version, about = "Generate a CV as a paginated A4 PDF", long_about = None)]
struct Args {
    /// CV data as JSON; a built-in sample is used when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output directory for the generated PDF
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn main() -> Result<(), ExportError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "vitae=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let cv: CvData = match &args.data {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let cv = serde_json::from_str(&raw)?;
            println!("✓ Loaded {}", path.display());
            cv
        }
        None => {
            println!("✓ Using built-in sample data");
            sample_cv()
        }
    };

    let written = export_pdf_to_dir(&cv, &args.out)?;

    println!("\nSuccess! Generated {}", written.display());
    Ok(())
}

fn sample_cv() -> CvData {
    let mut cv = CvData::default();
    cv.personal_info.full_name = "Ada Lovelace".into();
    cv.personal_info.email = "ada@analytical.engine".into();
    cv.personal_info.phone = "+44 20 1815 1010".into();
    cv.personal_info.address = "London, United Kingdom".into();
    cv.personal_info.summary =
        "Mathematician and writer, known for work on the Analytical Engine. \
         Published the first algorithm intended for execution by a machine."
            .into();

    cv.sections.experience.push(ExperienceItem {
        position: "Collaborator".into(),
        company: "Analytical Engine Project".into(),
        start_date: "1842".into(),
        current: true,
        description: "Translated and annotated Menabrea's memoir.\n\
                      Devised a method for computing Bernoulli numbers."
            .into(),
        ..Default::default()
    });

    cv.sections.education.push(EducationItem {
        degree: "Private tuition in mathematics".into(),
        institution: "Augustus De Morgan".into(),
        start_date: "1840".into(),
        end_date: "1842".into(),
        ..Default::default()
    });

    cv.sections.skills.extend([
        SkillItem {
            name: "Analysis".into(),
            level: SkillLevel::Expert,
            ..Default::default()
        },
        SkillItem {
            name: "Translation".into(),
            level: SkillLevel::Advanced,
            ..Default::default()
        },
    ]);

    cv.sections.custom_sections.push(CustomSection {
        title: "Publications".into(),
        items: vec![CustomSectionItem {
            title: "Notes on the Analytical Engine".into(),
            date: Some("1843".into()),
            description: "Appended to the translation of Menabrea's memoir.".into(),
            ..Default::default()
        }],
        ..Default::default()
    });

    cv
}
