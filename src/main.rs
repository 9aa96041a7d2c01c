//! formula-hl - highlight a formula from the command line
//!
//! Renders one formula the way a live editor would show it, and can
//! show where a caret offset lands after the re-render.

use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use formula_hl::render::DEFAULT_ID_PREFIX;
use formula_hl::terminal::Painter;
use formula_hl::{Config, HighlightError, Highlighter, Result};

/// Environment variable holding the log filter
const LOG_ENV: &str = "FORMULA_HL_LOG";

/// What to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Output {
    #[default]
    Terminal,
    Html,
    Tokens,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Options {
    output: Output,
    caret: Option<usize>,
    config: Option<PathBuf>,
    formula: Option<String>,
    help: bool,
    version: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            // Everything after this is the formula, even if it starts with '-'
            "--" => {
                for rest in iter.by_ref() {
                    set_formula(&mut options, rest)?;
                }
            }
            "--help" | "-h" => options.help = true,
            "--version" | "-V" => options.version = true,
            "--html" => options.output = Output::Html,
            "--tokens" => options.output = Output::Tokens,
            "--caret" => {
                let value = iter
                    .next()
                    .ok_or_else(|| HighlightError::Message("--caret needs an offset".into()))?;
                let offset = value
                    .parse::<usize>()
                    .map_err(|_| HighlightError::Message(format!("invalid caret offset: {}", value)))?;
                options.caret = Some(offset);
            }
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| HighlightError::Message("--config needs a path".into()))?;
                options.config = Some(PathBuf::from(path));
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(HighlightError::Message(format!("unknown option: {}", s)));
            }
            _ => set_formula(&mut options, arg)?,
        }
    }

    Ok(options)
}

fn set_formula(options: &mut Options, arg: &str) -> Result<()> {
    if options.formula.is_some() {
        return Err(HighlightError::Message("only one formula may be given".into()));
    }
    options.formula = Some(arg.to_string());
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.help {
        print_usage();
        return Ok(());
    }
    if options.version {
        print_version();
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let highlighter = Highlighter::with_table(Arc::new(config.rule_table()?));

    let formula = match options.formula {
        Some(formula) => formula,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let rendered = highlighter.render(&formula);
    let caret = options.caret.and_then(|offset| rendered.restore(offset));

    match options.output {
        Output::Tokens => {
            for token in highlighter.tokenize(&formula) {
                println!("{:>4}  {:<22}{:?}", token.start, token.category.name(), token.text);
            }
            if let Some(anchor) = caret {
                println!("caret: chunk {} offset {}", anchor.chunk, anchor.offset);
            }
        }
        Output::Html => {
            println!("{}", rendered.to_html(&config.chunk_id_prefix));
            if let Some(anchor) = caret {
                println!("caret: chunk {} offset {}", anchor.chunk, anchor.offset);
            }
        }
        Output::Terminal => {
            let mut painter = Painter::new(io::stdout(), config.color);
            painter.paint(&rendered)?;
            if let Some(anchor) = caret {
                painter.paint_caret(&rendered, anchor)?;
            }
            painter.flush()?;
        }
    }

    Ok(())
}

fn print_usage() {
    println!("formula-hl {} - formula syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: formula-hl [OPTIONS] [--] [FORMULA]");
    println!();
    println!("Reads the formula from the first line of stdin when none is given.");
    println!("Use -- before a formula that starts with '-'.");
    println!();
    println!("Options:");
    println!("  --html          Print span markup (ids prefixed \"{}\" by default)", DEFAULT_ID_PREFIX);
    println!("  --tokens        Print the token stream");
    println!("  --caret N       Show where visible offset N lands (chunk and offset");
    println!("                  with --html and --tokens, a marker otherwise)");
    println!("  --config PATH   Read settings from PATH");
    println!("  -h, --help      Show this help message");
    println!("  -V, --version   Show version information");
    println!();
    println!("Set {}=debug (or trace) for diagnostics on stderr.", LOG_ENV);
}

fn print_version() {
    println!("formula-hl {}", env!("CARGO_PKG_VERSION"));
}
