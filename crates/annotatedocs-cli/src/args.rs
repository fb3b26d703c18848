//! Command line arguments

use anyhow::{Result, bail};

pub const USAGE: &str = "\
Usage: annotatedocs <input.html|-> [options]

Options:
  -o, --output <file>   Write the annotated page here (default: stdout)
  --root <selector>     Region to annotate: tag, .class, #id, [attr] or [attr=value]
                        (default: [role=main], falling back to <body>)
  --hide-hints          Render with hint annotations hidden
  --hide-warnings       Render with warning annotations hidden
  --expand-toolbox      Render with the annotation toolbox expanded
  -h, --help            Show this help

Logging goes to stderr and is controlled by RUST_LOG (default: info).";

/// Parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(Args),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
    /// Input path, `-` for stdin
    pub input: String,
    pub output: Option<String>,
    pub root: Option<String>,
    pub hide_hints: bool,
    pub hide_warnings: bool,
    pub expand_toolbox: bool,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Command>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut input = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-o" | "--output" => parsed.output = Some(value(&arg, args.next())?),
                "--root" => parsed.root = Some(value(&arg, args.next())?),
                "--hide-hints" => parsed.hide_hints = true,
                "--hide-warnings" => parsed.hide_warnings = true,
                "--expand-toolbox" => parsed.expand_toolbox = true,
                flag if flag.starts_with('-') && flag != "-" => bail!("unknown option: {flag}"),
                _ if input.is_some() => bail!("unexpected argument: {arg}"),
                _ => input = Some(arg),
            }
        }

        match input {
            Some(input) => {
                parsed.input = input;
                Ok(Command::Run(parsed))
            }
            None => bail!("missing input file\n\n{USAGE}"),
        }
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String> {
    match next {
        Some(v) => Ok(v),
        None => bail!("{flag} requires a value"),
    }
}
