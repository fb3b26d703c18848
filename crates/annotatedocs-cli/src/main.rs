//! annotatedocs - Main Entry Point
//!
//! Reads a generated documentation page, renders its annotation payloads
//! and writes the decorated page back out.

mod args;

use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use annotatedocs_core::{AnnotateConfig, Toolbox, annotate_page};
use annotatedocs_dom::Document;
use annotatedocs_html::HtmlParser;
use tracing_subscriber::EnvFilter;

use args::{Args, Command, USAGE};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match Args::parse(std::env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Run(args) => run(&args),
    }
}

fn run(args: &Args) -> Result<()> {
    let mut page = read_page(&args.input)?;

    let mut config = AnnotateConfig::default();
    if let Some(root) = &args.root {
        config = config.with_root_selector(root.as_str());
    }

    let flags = annotate_page(&mut page, &config)
        .with_context(|| format!("failed to annotate {}", args.input))?;

    let mut toolbox = Toolbox::new();
    toolbox.set_show_hints(!args.hide_hints);
    toolbox.set_show_warnings(!args.hide_warnings);
    if args.expand_toolbox {
        toolbox.toggle_expanded();
    }
    toolbox.apply(&mut page, &config)?;

    let title = page.title();
    let html = annotatedocs_html::serialize(&page);
    match &args.output {
        Some(path) => {
            std::fs::write(path, html).with_context(|| format!("failed to write {path}"))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes()).context("failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    tracing::info!(
        "Done: {:?} hints={} warnings={} document_annotations={}",
        title,
        flags.has_hints(),
        flags.has_warnings(),
        flags.has_document_annotations()
    );
    Ok(())
}

fn read_page(input: &str) -> Result<Document> {
    let parser = HtmlParser::new();
    if input == "-" {
        let mut stdin = io::stdin().lock();
        return Ok(parser.parse_reader(&mut stdin, "stdin")?);
    }
    let mut file = File::open(input).with_context(|| format!("failed to open {input}"))?;
    Ok(parser.parse_reader(&mut file, input)?)
}
