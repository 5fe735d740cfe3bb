//! CV document engine: a typed document model, a section layout engine,
//! and a paginated A4 PDF export pipeline.
//!
//! The crate is organised as a pipeline. [`model`] holds the editable
//! document; [`store`] swaps immutable snapshots of it; [`document`]
//! renders a snapshot into styled blocks; [`paginate`] flows the blocks
//! onto A4 pages with widow control for atomic items; [`pdf`] serialises
//! the pages with `lopdf`; [`export`] ties the stages together and derives
//! the output filename. [`session`] adds the interactive pieces: a
//! debounced preview rebuild and a re-entrancy-guarded async export
//! trigger.

pub mod debounce;
pub mod document;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod paginate;
pub mod pdf;
pub mod session;
pub mod store;
pub mod stylesheet;

pub use error::ExportError;
pub use export::{ExportedPdf, export_pdf, export_pdf_to_dir, paginate_preview, pdf_filename};
pub use layout::{Column, Columns, CvLayout, SectionKey};
pub use model::{
    CvData, CvSections, CustomSection, CustomSectionItem, EducationItem, ExperienceItem,
    PersonalInfo, SkillItem, SkillLevel,
};
pub use paginate::{Page, PageMetrics};
pub use session::EditorSession;
pub use store::DocumentStore;
