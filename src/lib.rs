pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod source;
pub mod summarize;
pub mod url;

pub use error::{Error, FetchError};
