use crate::cli::Format;
use colored::Colorize;
use itertools::Itertools;
use realm_lib::dice::Critic;
use realm_lib::roll::BatchResults;
use realm_lib::roll::RollResults;
use realm_lib::RollSegment;
use std::collections::BTreeSet;
use termimad::crossterm::style::Color;
use termimad::MadSkin;

const TWEMOJI_MIN: &str = "🥶";
const TWEMOJI_MAX: &str = "🤩";

/// Turn roll results into terminal output
pub(crate) struct Renderer {
    format: Format,
    skin: MadSkin,
}

impl Renderer {
    pub(crate) fn new(format: Format) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_fg(Color::Magenta);
        Self { format, skin }
    }

    pub(crate) fn render(&self, formula: &str, results: &BatchResults) -> Result<String, ron::Error> {
        match self.format {
            Format::Compact => Ok(results.iter().map(|r| compact(formula, r)).join("\n")),
            Format::Verbose => Ok(results
                .iter()
                .enumerate()
                .map(|(index, r)| verbose(formula, r, index, results.len()))
                .join("\n")),
            Format::Ron => ron::ser::to_string_pretty(results, ron::ser::PrettyConfig::default()),
        }
    }

    pub(crate) fn print(&self, formula: &str, results: &BatchResults) {
        match self.render(formula, results) {
            Ok(text) => match self.format {
                Format::Ron => println!("{text}"),
                Format::Compact | Format::Verbose => self.skin.print_text(&text),
            },
            Err(error) => eprintln!("{}", format!("ron: error: `{error}`").bold().red()),
        }
    }
}

fn critics(results: &RollResults) -> String {
    let critics: BTreeSet<_> = results
        .iter()
        .flat_map(|r| r.critics())
        .map(|critic| match critic {
            Critic::Max => TWEMOJI_MAX,
            Critic::Min => TWEMOJI_MIN,
            Critic::Not => "",
        })
        .collect();
    if critics.is_empty() {
        String::new()
    } else {
        format!(" {}", critics.iter().join(""))
    }
}

/// Single line summary of a batch
pub(crate) fn compact(formula: &str, results: &RollResults) -> String {
    format!(
        "`{}` | {} | {}{}",
        formula,
        results.traces().join(" * "),
        results,
        critics(results)
    )
}

/// Block with one line per segment of a batch
pub(crate) fn verbose(formula: &str, results: &RollResults, index: usize, of: usize) -> String {
    let mut text = if of > 1 {
        format!("**Roll** `{}` ({}/{})\n", formula, index + 1, of)
    } else {
        format!("**Roll** `{}`\n", formula)
    };
    for result in results.iter() {
        let line = match result.get_segment() {
            RollSegment::Dice(dice) => {
                format!("* `{}` {}\n", dice.raw, result.get_trace().unwrap_or_default())
            }
            RollSegment::Constant(constant) => format!("* `{}`\n", constant.raw),
        };
        text.push_str(&line);
    }
    text.push_str(&format!(
        "**Total** {}\n",
        realm_lib::roll::trace::render_totals(&results.totals(), results.get_grand_total())
    ));
    if let Some(verdict) = results.get_verdict() {
        text.push_str(&format!("**Verdict** *{verdict}*\n"));
    }
    text
}
