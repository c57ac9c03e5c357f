pub mod report;
pub mod top;
