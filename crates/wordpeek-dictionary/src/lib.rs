mod client;
mod error;
mod format;
mod types;

pub use client::DictionaryClient;
pub use error::LookupError;
pub use format::format_entries;
pub use types::{Definition, Entry, Meaning, Phonetic};
