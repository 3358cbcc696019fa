use clap::crate_authors;
use clap::crate_description;
use clap::crate_version;
pub use clap::Parser;
use clap::ValueEnum;
use std::path::PathBuf;

const REALM_AUTHOR: &str = crate_authors!();
const REALM_VERSION: &str = crate_version!();
const REALM_ABOUT: &str = crate_description!();
const REALM_FLAG_D_SHORT: char = 'd';
const REALM_FLAG_D_HELP: &str = "Enable Debug logging";
const REALM_SEED_HELP: &str = "Seed the dice for reproducible rolls";
const REALM_FORMAT_HELP: &str = "How roll results are displayed";
const REALM_MIN_HELP: &str = "Lowest grand total that counts as a success";
const REALM_MAX_HELP: &str = "Highest grand total that counts as a success";
const REALM_HISTORY_HELP: &str = "File the REPL history is kept in";
const REALM_FORMULA_HELP: &str = "Roll this formula once and exit instead of starting the REPL";

/// Output of a roll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per batch
    Compact,
    /// One block per batch with a line per segment
    #[default]
    Verbose,
    /// Raw results as RON
    Ron,
}

#[derive(Parser, Debug)]
#[command(author = REALM_AUTHOR, version = REALM_VERSION, about = REALM_ABOUT)]
pub struct Args {
    #[arg(short = REALM_FLAG_D_SHORT, long, help = REALM_FLAG_D_HELP, action)]
    pub debug: bool,

    #[arg(long, env = "REALM_ROLL_SEED", help = REALM_SEED_HELP)]
    pub seed: Option<u64>,

    #[arg(
        short,
        long,
        value_enum,
        env = "REALM_ROLL_FORMAT",
        default_value_t = Format::Verbose,
        help = REALM_FORMAT_HELP
    )]
    pub format: Format,

    #[arg(long, allow_negative_numbers = true, help = REALM_MIN_HELP)]
    pub min: Option<i64>,

    #[arg(long, allow_negative_numbers = true, help = REALM_MAX_HELP)]
    pub max: Option<i64>,

    #[arg(long, env = "REALM_REPL_HISTORY", default_value = "history", help = REALM_HISTORY_HELP)]
    pub history: PathBuf,

    #[arg(allow_hyphen_values = true, help = REALM_FORMULA_HELP)]
    pub formula: Vec<String>,
}
