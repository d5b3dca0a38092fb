//! `.env` file discovery and parsing.

mod environment;
mod fs;
mod lines;
mod parser;
mod typed;

pub use environment::{ParsedEnvironment, ROOT_PATH_KEY};
pub use fs::{FileSystem, OsFileSystem};
pub use lines::parse_lines;
pub use parser::{EnvFileParser, EnvFileParserFactory, ENV_FILE_NAME};
pub use typed::NESTING_SEPARATOR;
