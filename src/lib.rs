pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod search;
pub mod types;
pub mod version;

pub use error::{ParseError, Result, StoreSearchError};
pub use search::SearchSession;
pub use types::*;
