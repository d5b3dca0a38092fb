//! Parse the `.env` file of a root directory into an ordered key/value
//! mapping that always carries the resolved `ROOT_PATH`.

pub mod env;
mod error;

pub use env::{
    parse_lines, EnvFileParser, EnvFileParserFactory, FileSystem, OsFileSystem,
    ParsedEnvironment, ENV_FILE_NAME, ROOT_PATH_KEY,
};
pub use error::{Cause, Error, ParseFailure};
