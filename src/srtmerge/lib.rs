//! # srtmerge
//!
//! Fills an SRT timing template with subtitle text kept in a plain text file.
//!
//! The text file holds one subtitle per paragraph, paragraphs separated by blank lines.
//! The template holds everything else (sequence numbers and `HH:MM:SS,mmm --> HH:MM:SS,mmm`
//! timing lines) plus a `{0}`, `{1}`, ... placeholder where each subtitle's text goes.
//! Running the merge writes the filled template to the output file, first renaming any
//! output left by a previous run to a timestamped backup.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses flags, loads config, prints messages              │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Merge run (merge.rs)                                       │
//! │  - Sequences parse → render → backup → write                │
//! │  - Returns a MergeReport with user-facing messages          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stages (paragraph.rs, template.rs, backup.rs)              │
//! │  - Pure parsing and rendering, thin file wrappers           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing below the CLI prints or exits. Errors surface as [`error::MergeError`] and
//! logging goes through `tracing`.
//!
//! ## Module Overview
//!
//! - [`paragraph`]: splitting source text into paragraphs
//! - [`template`]: placeholder parsing and substitution
//! - [`backup`]: timestamped rename of the previous output
//! - [`merge`]: the end-to-end run
//! - [`config`]: file locations and options
//! - [`error`]: error types

pub mod backup;
pub mod config;
pub mod error;
pub mod merge;
pub mod paragraph;
pub mod template;
