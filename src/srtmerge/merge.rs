//! The merge run: parse, render, back up, write.
//!
//! Rendering happens in memory before anything on disk changes. A missing template or a
//! placeholder past the last paragraph therefore leaves a previous output exactly where it
//! was; only a run that is about to write moves the old file to its backup name.

use crate::backup::backup_if_exists;
use crate::config::MergeConfig;
use crate::error::{MergeError, Result};
use crate::paragraph::read_paragraphs;
use crate::template::{read_template, write_output};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MergeReport {
    pub paragraphs: usize,
    pub placeholders: usize,
    pub output: PathBuf,
    pub backup: Option<PathBuf>,
    /// Rendered text, kept only for dry runs.
    pub rendered: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl MergeReport {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Render only; leave the filesystem alone.
    pub dry_run: bool,
}

/// Runs the whole merge. `now` stamps the backup name.
pub fn run(config: &MergeConfig, options: RunOptions, now: DateTime<Local>) -> Result<MergeReport> {
    let parsed = read_paragraphs(&config.source, config.parse_options())?;
    let template = read_template(&config.template)?;
    let rendered = template.render(&parsed.paragraphs)?;

    let mut report = MergeReport {
        paragraphs: parsed.paragraphs.len(),
        placeholders: template.placeholder_count(),
        output: config.output.clone(),
        ..MergeReport::default()
    };

    if parsed.dropped.is_some() {
        let lines = parsed.dropped_lines();
        warn!(lines, "text after the last blank line was not used");
        report.add_message(CmdMessage::warning(format!(
            "Ignored {} line(s) at the end of {} (no blank line after them)",
            lines,
            config.source.display()
        )));
    }

    let unused = template.unused_paragraphs(parsed.paragraphs.len());
    if unused > 0 {
        report.add_message(CmdMessage::info(format!(
            "{} paragraph(s) not referenced by the template",
            unused
        )));
    }

    if options.dry_run {
        report.rendered = Some(rendered);
        return Ok(report);
    }

    report.backup = backup_if_exists(&config.output, now)?;
    if let Some(backup) = &report.backup {
        report.add_message(CmdMessage::info(format!(
            "Previous output moved to {}",
            backup.display()
        )));
    }

    write_output(&config.output, &rendered)
        .map_err(|e| name_backup(e, &config.output, report.backup.as_deref()))?;
    info!(
        output = %config.output.display(),
        paragraphs = report.paragraphs,
        placeholders = report.placeholders,
        "merge complete"
    );
    report.add_message(CmdMessage::success(format!(
        "Wrote {} subtitle(s) to {}",
        report.placeholders,
        config.output.display()
    )));
    Ok(report)
}

/// A write that fails after the rename leaves only the backup, so say where it is.
fn name_backup(err: MergeError, output: &Path, backup: Option<&Path>) -> MergeError {
    match (err, backup) {
        (MergeError::Io(source), Some(backup)) => MergeError::OutputAfterBackup {
            path: output.to_path_buf(),
            backup: backup.to_path_buf(),
            source,
        },
        (err, _) => err,
    }
}
