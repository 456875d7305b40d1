// Domain logic for the module listing - the brain of the operation
pub mod config;
pub mod emoji;
pub mod error;
pub mod models;
pub mod pagination;

pub use config::Config;
pub use emoji::emojify;
pub use error::Error;
pub use models::{ModuleSummary, ModulesList};
pub use pagination::{parse_page, total_pages};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
