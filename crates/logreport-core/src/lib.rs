pub mod analysis;
pub mod error;
pub mod log;
pub mod pipeline;
pub mod report;
pub mod settings;

pub use error::{Error, Result};
pub use pipeline::RunOutcome;
pub use settings::Settings;
