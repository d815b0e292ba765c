use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "srtmerge", version)]
#[command(
    about = "Merge a text file of paragraphs into an SRT template",
    long_about = "Reads subtitles.txt (one subtitle per paragraph) and subtitles-template.srt \
                  ({0}, {1}, ... placeholders), backs up any existing subtitles.srt and writes \
                  the merged result to it."
)]
pub struct Cli {
    /// Text file with one subtitle per paragraph
    #[arg(short, long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// SRT template with {0}, {1}, ... placeholders
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Subtitle file to write
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Use a last paragraph even if no blank line follows it
    #[arg(long)]
    pub flush_trailing: bool,

    /// Print the merged subtitles instead of writing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Config file (defaults to ./srtmerge.json when present)
    #[arg(short = 'C', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}
