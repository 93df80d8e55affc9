//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

use std::path::Path;

use crate::{Error, Result, ports::QTableRepository};

pub mod json_repository;
pub mod msgpack_repository;

pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

/// Pick a repository from the file extension of `path`.
///
/// `.msgpack` and `.mp` select MessagePack, `.json` selects JSON.
///
/// # Errors
///
/// `UnsupportedFormat` for any other (or missing) extension.
pub fn repository_for_path(path: &Path) -> Result<Box<dyn QTableRepository>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("msgpack" | "mp") => Ok(Box::new(MsgPackRepository::new())),
        Some("json") => Ok(Box::new(JsonRepository::new())),
        _ => Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
