// tiny: scan, parse and inspect TINY programs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::Level;

use tiny_front::parser::{Parser, Scanner};
use tiny_front::ui::App;

/// Parse a TINY program and inspect its syntax tree.
///
/// Without an output flag the program opens an interactive tree viewer.
#[derive(clap::Parser, Debug)]
#[command(name = "tiny", version)]
struct Args {
    /// TINY source file
    file: PathBuf,

    /// Print the token listing (text and kind per line) and exit
    #[arg(long, conflicts_with_all = ["tree", "json"])]
    tokens: bool,

    /// Print the syntax tree as an indented outline and exit
    #[arg(long, conflicts_with = "json")]
    tree: bool,

    /// Print the syntax tree as JSON and exit
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if args.tokens {
        return print_tokens(&args.file);
    }

    tracing::info!("Parsing {}", args.file.display());
    let tree = match Parser::open(&args.file).and_then(|parser| parser.parse_program()) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };
    tracing::info!(nodes = tree.len(), "Parsed successfully");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    if args.tree {
        print!("{}", tree);
        return Ok(());
    }

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let tokens = Scanner::from_source(&source).tokenize()?;
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(tree, source, tokens, file_name);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer failed")
}

/// Print `text<TAB>KIND` for every token before end of input. Tokens scanned
/// before a lexical error are still printed.
fn print_tokens(path: &Path) -> anyhow::Result<()> {
    let mut scanner =
        Scanner::open(path).with_context(|| format!("cannot open {}", path.display()))?;

    loop {
        let token = scanner.peek()?;
        scanner.advance()?;
        if token.is_eof() {
            break;
        }
        println!("{}\t{}", token.text, token.kind);
    }

    Ok(())
}
