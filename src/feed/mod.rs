//! Podcast feed synthesis.
//!
//! Turns the enriched catalog into an RSS 2.0 document:
//!
//! - **Model** (`model.rs`) - In-memory feed tree
//! - **Mapper** (`mapper.rs`) - Episode row to feed item
//! - **Assembler** (`assembler.rs`) - Channel metadata plus catalog items
//! - **Writer** (`writer.rs`) - XML serialization and file replacement

pub mod assembler;
pub mod mapper;
pub mod model;
pub mod writer;

use std::path::PathBuf;

pub use assembler::FeedAssembler;
pub use model::FeedDocument;
pub use writer::{to_xml, write_feed};

/// Errors raised while building or writing the feed
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Episode is missing its GUID, length or duration
    #[error("Episode {0} has not been enriched")]
    Unenriched(i64),

    #[error("Episode {episode_id} has invalid publish timestamp {pub_date}")]
    InvalidTimestamp { episode_id: i64, pub_date: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the output file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
