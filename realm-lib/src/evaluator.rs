use crate::dice;
use crate::dice::DiceRoll;
use crate::dice::Modifier;
use crate::error::EvaluationError;
use crate::roll;
use crate::roll::SegmentResult;
use crate::segment::RollSegment;
use tracing::trace;

mod limits {
    /// Arbitrary limits to avoid oom
    pub(crate) const MAX_DICE_AMOUNT: u64 = 5000;
    pub(crate) const MAX_DICE_SIDES: u64 = 5000;
}

type Result<T> = std::result::Result<T, EvaluationError>;

/// Represent an evaluator
pub(crate) struct Evaluator;

impl Evaluator {
    fn throw<S: roll::Source>(faces: u64, source: &mut S) -> Result<dice::Outcome> {
        let value = source.throw(faces);
        if value == 0 || value > faces {
            return Err(format!("random source returned `{value}` for a {faces} sided dice").into());
        }
        trace!(faces, value, "dice thrown");
        Ok(dice::Outcome::new(value, faces))
    }

    fn push(rolls: &mut Vec<dice::Outcome>, outcome: dice::Outcome) -> Result<()> {
        if rolls.len() as u64 >= limits::MAX_DICE_AMOUNT {
            return Err(format!(
                "too many dice rolled, exceeded `{}`",
                limits::MAX_DICE_AMOUNT
            )
            .into());
        }
        rolls.push(outcome);
        Ok(())
    }

    fn eval_explode<S: roll::Source>(
        dice: &DiceRoll,
        limit: u64,
        rolls: &mut Vec<dice::Outcome>,
        source: &mut S,
    ) -> Result<u64> {
        if limit == 0 && dice.faces == 1 {
            return Err("can't explode a one sided dice without a limit".into());
        }
        let mut total = 0;
        for _ in 0..dice.count {
            let mut outcome = Self::throw(dice.faces, source)?;
            let mut exploded = 0;
            while outcome.value == dice.faces && (limit == 0 || exploded < limit) {
                exploded += 1;
                total += outcome.value;
                Self::push(rolls, outcome)?;
                outcome = Self::throw(dice.faces, source)?;
            }
            if exploded > 0 {
                trace!(exploded, "dice exploded");
            }
            total += outcome.value;
            Self::push(rolls, outcome)?;
        }
        Ok(total)
    }

    fn check_keep(count: u64, keep: u64) -> Result<()> {
        if keep == 0 || keep >= count {
            Err(format!("keep count out of range, can't keep `{keep}` of `{count}` dices").into())
        } else {
            Ok(())
        }
    }

    /// Total of the kept dices, the dropped ones stay in `rolls`
    fn eval_keep(count: u64, keep: u64, highest: bool, rolls: &[dice::Outcome], total: u64) -> u64 {
        let mut sorted = rolls.to_vec();
        sorted.sort_unstable();
        let drop = (count - keep) as usize;
        let dropped: u64 = if highest {
            sorted.iter().take(drop).map(|r| r.value).sum()
        } else {
            sorted.iter().rev().take(drop).map(|r| r.value).sum()
        };
        total - dropped
    }

    fn eval_dice<S: roll::Source>(dice: &DiceRoll, source: &mut S) -> Result<SegmentResult> {
        if dice.faces < 1 {
            return Err("a dice needs at least one side".into());
        }
        if dice.count < 1 {
            return Err("can't roll less than one dice".into());
        }
        if dice.count > limits::MAX_DICE_AMOUNT {
            return Err(format!(
                "exceeded max allowed amount of dices `{}`",
                limits::MAX_DICE_AMOUNT
            )
            .into());
        }
        if dice.faces > limits::MAX_DICE_SIDES {
            return Err(format!(
                "exceeded max allowed number of dice sides `{}`",
                limits::MAX_DICE_SIDES
            )
            .into());
        }
        let (rolls, total) = match dice.modifier {
            Some(Modifier::Explode { limit }) => {
                let mut rolls = Vec::with_capacity(dice.count as usize);
                let total = Self::eval_explode(dice, limit, &mut rolls, source)?;
                (rolls, total)
            }
            Some(Modifier::KeepHigh(keep)) | Some(Modifier::KeepLow(keep)) => {
                Self::check_keep(dice.count, keep)?;
                let rolls = Self::roll(dice.count, dice.faces, source)?;
                let total: u64 = rolls.iter().map(|r| r.value).sum();
                let highest = matches!(dice.modifier, Some(Modifier::KeepHigh(_)));
                let total = Self::eval_keep(dice.count, keep, highest, &rolls, total);
                (rolls, total)
            }
            None => {
                let rolls = Self::roll(dice.count, dice.faces, source)?;
                let total: u64 = rolls.iter().map(|r| r.value).sum();
                (rolls, total)
            }
        };
        let trace = roll::trace::render(&rolls, total, dice.negative);
        let total = i64::try_from(total).map_err(|_| "dice total overflow")?;
        let total = if dice.negative { -total } else { total };
        Ok(SegmentResult::with_rolls(
            RollSegment::Dice(dice.clone()),
            rolls,
            trace,
            total,
        ))
    }

    pub(crate) fn roll<S: roll::Source>(
        amount: u64,
        faces: u64,
        source: &mut S,
    ) -> Result<Vec<dice::Outcome>> {
        (0..amount).map(|_| Self::throw(faces, source)).collect()
    }
}

/// Evaluate one segment against the provided source
pub fn evaluate<S: roll::Source>(segment: &RollSegment, source: &mut S) -> Result<SegmentResult> {
    match segment {
        RollSegment::Constant(constant) => {
            let total = constant.get_value().ok_or("constant too large")?;
            Ok(SegmentResult::with_constant(segment.clone(), total))
        }
        RollSegment::Dice(dice) => Evaluator::eval_dice(dice, source),
    }
}
