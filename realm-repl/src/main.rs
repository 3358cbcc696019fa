mod cli;
mod helper;
mod render;

use cli::Args;
use cli::Parser;
use colored::Colorize;
use helper::ReplHelper;
use rand::rngs::StdRng;
use rand::SeedableRng;
use realm_lib::roll::BatchResults;
use realm_lib::roll::Thresholds;
use realm_lib::solver::Solver;
use render::Renderer;
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::CompletionType;
use rustyline::Config;
use rustyline::EditMode;
use rustyline::Editor;
use std::process::ExitCode;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing::Level;
use tracing_unwrap::OptionExt;

/// Everything a roll needs besides the formula
struct Roller {
    renderer: Renderer,
    thresholds: Thresholds,
    generator: StdRng,
}

impl Roller {
    fn new(args: &Args) -> Self {
        let generator = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            renderer: Renderer::new(args.format),
            thresholds: Thresholds::new(args.min, args.max),
            generator,
        }
    }

    fn solve(&mut self, formula: &str) -> realm_lib::error::Result<BatchResults> {
        let solver = Solver::new(formula)?.with_thresholds(self.thresholds);
        let results = solver.solve_with(&mut self.generator)?;
        debug!(formula, batches = results.len(), "rolled");
        Ok(results)
    }

    /// Roll and print, true when the formula was valid
    fn roll(&mut self, formula: &str) -> bool {
        match self.solve(formula) {
            Ok(results) => {
                self.renderer.print(formula, &results);
                true
            }
            Err(error) => {
                eprintln!("{}", format!("error: {error}").bold().red());
                false
            }
        }
    }
}

fn repl(args: &Args, roller: &mut Roller) -> rustyline::Result<()> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();
    let helper = ReplHelper {
        hinter: HistoryHinter {},
        colored: "".to_owned(),
    };
    let mut rline = Editor::with_config(config)?;
    rline.set_helper(Some(helper));
    if rline.load_history(&args.history).is_err() {
        warn!("no previous history");
    }
    let mut count = 1u64;
    loop {
        let prompt = format!("realm: {}> ", count);
        rline.helper_mut().expect_or_log("no helper").colored = prompt.bold().green().to_string();
        match rline.readline(&prompt) {
            Ok(line) => {
                rline.add_history_entry(line.as_str())?;
                let formula = line.trim();
                if !formula.is_empty() {
                    roller.roll(formula);
                }
            }
            Err(ReadlineError::Interrupted) => {
                info!("signal: CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                info!("signal: CTRL-D");
                break;
            }
            Err(error) => {
                error!("`{:?}`", error);
                break;
            }
        }
        count += 1;
    }
    rline.append_history(&args.history)
}

fn main() -> ExitCode {
    let dotenv = dotenv::dotenv();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true)
        .with_max_level(if args.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    if let Err(error) = dotenv {
        debug!("no `.env` file loaded: {}", error);
    }

    let mut roller = Roller::new(&args);
    if !args.formula.is_empty() {
        let formula = args.formula.join(" ");
        return if roller.roll(&formula) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }
    match repl(&args, &mut roller) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("`{:?}`", error);
            ExitCode::FAILURE
        }
    }
}
