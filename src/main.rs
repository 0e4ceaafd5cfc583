// Sprout: a simulated console for beginner C++ programs

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use sprout::config::{Config, EngineConfig, PrintOrder, TokenizerOptions};
use sprout::interpreter::constants::DEFAULT_MAX_STEPS;
use sprout::parser::ast::Program;
use sprout::ui::App;
use sprout::{ExecutionState, Status, Tokenizer};

const LOG_FILE: &str = "sprout.log";

#[derive(Parser)]
#[command(name = "sprout")]
#[command(about = "Run beginner C++ programs in a simulated console")]
#[command(version)]
struct Cli {
    /// C++ source file to run
    file: PathBuf,

    /// Print the console to stdout instead of opening the TUI
    #[arg(long)]
    plain: bool,

    /// Answer for the next read; repeat for several (plain mode)
    #[arg(short, long = "input", value_name = "VALUE")]
    inputs: Vec<String>,

    /// Tokens one run may execute between two reads
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_STEPS, conflicts_with = "unbounded")]
    max_steps: usize,

    /// Disable the step guard
    #[arg(long)]
    unbounded: bool,

    /// Print literals before variables, like the old web playground
    #[arg(long)]
    legacy_print_order: bool,

    /// Text printed for a variable that was never assigned
    #[arg(long, value_name = "TEXT")]
    undefined_marker: Option<String>,

    /// Write debug logs to sprout.log
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let mut engine = EngineConfig {
            max_steps: (!self.unbounded).then_some(self.max_steps),
            ..EngineConfig::default()
        };
        if let Some(marker) = &self.undefined_marker {
            engine.undefined_marker = marker.clone();
        }

        let print_order = if self.legacy_print_order {
            PrintOrder::LiteralsFirst
        } else {
            PrintOrder::SourceOrder
        };

        Config {
            tokenizer: TokenizerOptions { print_order },
            engine,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Log to a file so the TUI is never corrupted.
    // Enabled by --verbose or RUST_LOG.
    if cli.verbose || std::env::var("RUST_LOG").is_ok() {
        let log_file = fs::File::create(LOG_FILE)?;
        let filter = if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::EnvFilter::from_default_env()
        } else {
            tracing_subscriber::EnvFilter::new("debug")
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(log_file)
            .with_ansi(false)
            .init();
    }

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("sprout: cannot read {}: {}", cli.file.display(), e);
            std::process::exit(1);
        }
    };

    let config = cli.config();
    let program = match Tokenizer::new(config.tokenizer.clone()).tokenize(&source) {
        Ok(program) => program,
        Err(e) => {
            eprint!("{}", e.render(&source));
            std::process::exit(1);
        }
    };

    if cli.plain {
        let code = run_plain(&program, &config, cli.inputs)?;
        std::process::exit(code);
    }

    run_tui(program, config, source)
}

/// Run to completion on stdout. Answers come from `--input` first, then
/// stdin lines. Returns the process exit code.
fn run_plain(program: &Program, config: &Config, inputs: Vec<String>) -> io::Result<i32> {
    for skipped in &program.skipped {
        eprintln!(
            "warning: line {}: `{}` is not simulated ({})",
            skipped.location.line, skipped.text, skipped.reason
        );
    }

    let stdin = io::stdin();
    let mut answers = inputs
        .into_iter()
        .chain(stdin.lock().lines().map_while(Result::ok));

    let mut state = ExecutionState::start(program, config.engine.clone());
    let mut status = state.resume();
    let mut printed = 0;

    loop {
        printed = flush_new_output(&state, printed)?;

        match status {
            Status::Finished => return Ok(0),
            Status::Halted => return Ok(2),
            Status::AwaitingInput => {
                let Some(answer) = answers.next() else {
                    eprintln!("sprout: input ended while the program was waiting for a value");
                    return Ok(2);
                };
                status = state
                    .supply_input(&answer)
                    .map_err(io::Error::other)?;
            }
        }
    }
}

fn flush_new_output(state: &ExecutionState, printed: usize) -> io::Result<usize> {
    let text = state.output();
    let mut stdout = io::stdout().lock();
    stdout.write_all(text[printed..].as_bytes())?;
    stdout.flush()?;
    Ok(text.len())
}

fn run_tui(program: Program, config: Config, source: String) -> Result<(), Box<dyn std::error::Error>> {
    // Restore the terminal if anything panics while the TUI is up
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(program, config, source);
    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
