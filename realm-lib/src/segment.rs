use crate::constant::ConstantModifier;
use crate::dice::DiceRoll;
use serde::Deserialize;
use serde::Serialize;
use std::ops::Deref;

/// One additive or subtractive term of a formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RollSegment {
    Dice(DiceRoll),
    Constant(ConstantModifier),
}

impl RollSegment {
    pub fn raw(&self) -> &str {
        match self {
            RollSegment::Dice(dice) => &dice.raw,
            RollSegment::Constant(constant) => &constant.raw,
        }
    }

    pub fn as_dice(&self) -> Option<&DiceRoll> {
        match self {
            RollSegment::Dice(dice) => Some(dice),
            RollSegment::Constant(_) => None,
        }
    }
}

impl From<DiceRoll> for RollSegment {
    fn from(value: DiceRoll) -> Self {
        RollSegment::Dice(value)
    }
}

impl From<ConstantModifier> for RollSegment {
    fn from(value: ConstantModifier) -> Self {
        RollSegment::Constant(value)
    }
}

impl std::fmt::Display for RollSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// One complete evaluation of a formula, always opening with a dice term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RollSegment>", into = "Vec<RollSegment>")]
pub struct Batch {
    segments: Vec<RollSegment>,
}

impl Batch {
    /// Build a batch from its leading dice term and the following terms
    pub fn new(first: DiceRoll, rest: impl IntoIterator<Item = RollSegment>) -> Self {
        let mut segments = vec![RollSegment::Dice(first)];
        segments.extend(rest);
        Self { segments }
    }

    pub fn get_segments(&self) -> &[RollSegment] {
        &self.segments
    }
}

impl TryFrom<Vec<RollSegment>> for Batch {
    type Error = &'static str;

    fn try_from(segments: Vec<RollSegment>) -> Result<Self, Self::Error> {
        match segments.first() {
            Some(RollSegment::Dice(_)) => Ok(Self { segments }),
            _ => Err("a batch must open with a dice term"),
        }
    }
}

impl From<Batch> for Vec<RollSegment> {
    fn from(value: Batch) -> Self {
        value.segments
    }
}

impl Deref for Batch {
    type Target = [RollSegment];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl std::fmt::Display for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.segments
            .iter()
            .try_for_each(|segment| write!(f, "{segment}"))
    }
}
