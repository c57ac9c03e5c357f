mod discovery;
mod parser;
mod reader;

pub use discovery::{LogDiscovery, LogFileRef};
pub use parser::{LogLineParser, NoMatch, ParsedEntry};
pub use reader::{LogLines, LogReader};
