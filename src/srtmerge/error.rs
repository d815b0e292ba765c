use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Source text not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Backup of {} failed: {source}", .path.display())]
    BackupFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backup target already exists: {}", .0.display())]
    BackupCollision(PathBuf),

    #[error(
        "Writing {} failed, previous output is at {}: {source}",
        .path.display(),
        .backup.display()
    )]
    OutputAfterBackup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Template references paragraph {{{index}}} but only {available} paragraph(s) were parsed"
    )]
    PlaceholderIndex { index: usize, available: usize },

    #[error("Template syntax error at byte {offset}: {message}")]
    TemplateSyntax { offset: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MergeError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        MergeError::TemplateSyntax {
            offset,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
