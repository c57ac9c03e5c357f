mod assets;
mod template;
mod writer;

pub use assets::prepare_report_dir;
pub use template::{PLACEHOLDER, ReportTemplate};
pub use writer::ReportWriter;
