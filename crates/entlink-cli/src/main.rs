//! Entlink CLI - interactive entity-linking annotation.

mod annotator;
mod cli;

use clap::Parser;

use entlink::{AcceptAllValidator, AnnotatorConfig, Corpus, HttpValidator, LinkAnnotations, LinkValidator};

use annotator::Annotator;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> entlink::Result<()> {
    let corpus = Corpus::load(&cli.sources, &cli.entities)?;
    let annotations = LinkAnnotations::load(&cli.annotations)?;
    let config = AnnotatorConfig::new().with_context_size(cli.context_size);

    let validator: Box<dyn LinkValidator> = if cli.offline {
        Box::new(AcceptAllValidator)
    } else {
        Box::new(HttpValidator::new()?)
    };

    Annotator::new(corpus, annotations, config, validator, cli.verbose).run()
}
