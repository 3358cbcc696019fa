use crate::constant::ConstantModifier;
use crate::dice::DiceRoll;
use crate::dice::Modifier;
use crate::error::ParseError;
use crate::segment::Batch;
use crate::segment::RollSegment;
use itertools::Itertools;
use pest::error::ErrorVariant;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::debug;

pub(crate) mod limits {
    /// Arbitrary limit on `xN` to avoid flooding the caller
    pub(crate) const MAX_BATCHES: u64 = 100;
}

/// Pest parser
#[derive(Parser)]
#[grammar = "realm.pest"]
pub struct Parser;

type ParseResult<T> = std::result::Result<T, ParseError>;

impl Parser {
    fn extract_number(pair: &Pair<Rule>) -> ParseResult<u64> {
        pair.as_str().parse::<u64>().map_err(|_| {
            ParseError::new("number too large", pair.as_str(), pair.as_span().start())
        })
    }

    fn extract_modifier_value(modifier: Pair<Rule>) -> ParseResult<Option<u64>> {
        modifier
            .into_inner()
            .next()
            .map(|value| Self::extract_number(&value))
            .transpose()
    }

    fn expect_pair<'i>(pair: Option<Pair<'i, Rule>>, what: &str) -> ParseResult<Pair<'i, Rule>> {
        pair.ok_or_else(|| ParseError::new(format!("missing {what}"), "", 0))
    }

    fn parse_dice(pair: Pair<Rule>, raw: String, negative: bool) -> ParseResult<DiceRoll> {
        let mut dice = DiceRoll {
            raw,
            negative,
            count: 1,
            faces: 0,
            modifier: None,
        };
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::count => dice.count = Self::extract_number(&inner)?,
                Rule::faces => dice.faces = Self::extract_number(&inner)?,
                Rule::explode => {
                    let limit = Self::extract_modifier_value(inner)?.unwrap_or(0);
                    dice.modifier = Some(Modifier::Explode { limit });
                }
                Rule::keep_hi => {
                    let keep = Self::extract_modifier_value(inner)?.unwrap_or(1);
                    dice.modifier = Some(Modifier::KeepHigh(keep));
                }
                Rule::keep_lo => {
                    let keep = Self::extract_modifier_value(inner)?.unwrap_or(1);
                    dice.modifier = Some(Modifier::KeepLow(keep));
                }
                _ => unreachable!("{:#?}", inner),
            }
        }
        Ok(dice)
    }

    fn parse_batch(pair: Pair<Rule>) -> ParseResult<u64> {
        let start = pair.as_span().start();
        let fragment = pair.as_str().to_owned();
        let number = Self::expect_pair(pair.into_inner().next(), "batch count")?;
        match Self::extract_number(&number)? {
            0 => Err(ParseError::new(
                "cannot repeat a roll zero times",
                fragment,
                start,
            )),
            n if n > limits::MAX_BATCHES => Err(ParseError::new(
                format!("exceeded max allowed batch count `{}`", limits::MAX_BATCHES),
                fragment,
                start,
            )),
            n => Ok(n),
        }
    }

    fn parse_term(pair: Pair<Rule>, repeat: &mut Option<u64>) -> ParseResult<DiceRoll> {
        let mut inner = pair.into_inner();
        let dice = Self::expect_pair(inner.next(), "dice term")?;
        let raw = dice.as_str().to_owned();
        let dice = Self::parse_dice(dice, raw, false)?;
        if let Some(batch) = inner.next() {
            *repeat = Some(Self::parse_batch(batch)?);
        }
        Ok(dice)
    }

    fn parse_mod_term(pair: Pair<Rule>, repeat: &mut Option<u64>) -> ParseResult<RollSegment> {
        let mut inner = pair.into_inner();
        let sign = Self::expect_pair(inner.next(), "sign")?;
        let negative = sign.as_rule() == Rule::sub;
        let body = Self::expect_pair(inner.next(), "term")?;
        let raw = format!("{}{}", sign.as_str(), body.as_str());
        let segment = match body.as_rule() {
            Rule::dice => Self::parse_dice(body, raw, negative)?.into(),
            Rule::constant => ConstantModifier {
                raw,
                negative,
                value: Self::extract_number(&body)?,
            }
            .into(),
            _ => unreachable!("{:#?}", body),
        };
        if let Some(batch) = inner.next() {
            *repeat = Some(Self::parse_batch(batch)?);
        }
        Ok(segment)
    }

    fn describe(rule: &Rule) -> &'static str {
        match rule {
            Rule::count => "dice term",
            Rule::faces => "number of faces",
            Rule::number => "number",
            Rule::constant => "constant",
            Rule::explode => "`!`",
            Rule::keep_hi => "`kh`",
            Rule::keep_lo => "`kl`",
            Rule::dice | Rule::term => "dice term",
            Rule::add => "`+`",
            Rule::sub => "`-`",
            Rule::batch => "`x` suffix",
            Rule::EOI => "end of formula",
            _ => "term",
        }
    }

    fn convert_error(error: pest::error::Error<Rule>, input: &str) -> ParseError {
        let position = match error.location {
            InputLocation::Pos(position) => position,
            InputLocation::Span((start, _)) => start,
        };
        let fragment = input.get(position..).unwrap_or_default();
        let mut message = if fragment.is_empty() {
            "unexpected end of formula".to_owned()
        } else {
            "unexpected input".to_owned()
        };
        match &error.variant {
            ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected = positives.iter().map(Self::describe).unique().format(" or ");
                message = format!("{message}, expected {expected}");
            }
            ErrorVariant::CustomError { message: custom } => message = custom.clone(),
            ErrorVariant::ParsingError { .. } => (),
        }
        ParseError::new(message, fragment, position)
    }
}

/// Strip every whitespace character from a formula
fn strip(formula: &str) -> String {
    formula.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse a formula into its batches, one per `xN` repetition
///
/// Positions and fragments in a [`ParseError`] refer to the formula with all
/// whitespace removed.
pub fn parse(formula: &str) -> ParseResult<Vec<Batch>> {
    let input = strip(formula);
    let mut pairs = <Parser as pest::Parser<Rule>>::parse(Rule::formula, &input)
        .map_err(|error| Parser::convert_error(error, &input))?;
    let formula = Parser::expect_pair(pairs.next(), "formula")?;
    let mut inner = formula.into_inner();
    let mut repeat = None;
    let first = Parser::parse_term(Parser::expect_pair(inner.next(), "dice term")?, &mut repeat)?;
    let rest = inner
        .filter(|pair| pair.as_rule() == Rule::mod_term)
        .map(|pair| Parser::parse_mod_term(pair, &mut repeat))
        .collect::<ParseResult<Vec<_>>>()?;
    let repeat = repeat.unwrap_or(1);
    debug!(
        formula = %input,
        batches = repeat,
        segments = rest.len() + 1,
        "parsed formula"
    );
    Ok((0..repeat)
        .map(|_| Batch::new(first.clone(), rest.iter().cloned()))
        .collect())
}
