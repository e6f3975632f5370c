//! Error types shared by the content, routing and listing layers

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the blog
#[derive(Debug, Error)]
pub enum Error {
    /// The content source could not be read or parsed. Every underlying
    /// failure is kept verbatim, one per line.
    #[error("Failed to create posts:\n{}", .errors.join("\n"))]
    InventoryQuery { errors: Vec<String> },

    #[error("Content item {path:?} has no slug")]
    MissingSlug { path: PathBuf },

    #[error("Content item {path:?} has slug `{slug}`, which leaves the output directory")]
    InvalidSlug { slug: String, path: PathBuf },

    #[error("Duplicate slug `{slug}` in {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Post `{slug}` has an unparsable date `{value}`")]
    DateParse { slug: String, value: String },

    #[error("No content item with slug `{0}`")]
    UnknownSlug(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
