//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Entlink: interactive entity-linking annotation
#[derive(Parser)]
#[command(name = "entlink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory with source text files (<docid>.txt)
    #[arg(long, value_name = "DIR")]
    pub sources: PathBuf,

    /// Directory with entity record files (<docid>.ann)
    #[arg(long, value_name = "DIR")]
    pub entities: PathBuf,

    /// Annotation store file (created on the first decision)
    #[arg(long, value_name = "FILE", default_value = "annotations.tab")]
    pub annotations: PathBuf,

    /// Width of the context window around each mention
    #[arg(long, value_name = "N", default_value_t = entlink::DEFAULT_CONTEXT_SIZE)]
    pub context_size: usize,

    /// Skip the link existence check (accept any link without a network call)
    #[arg(long)]
    pub offline: bool,

    /// Echo loop state and recent records after each command
    #[arg(short, long)]
    pub verbose: bool,
}
