use crate::dice;
use crate::dice::Critic;
use crate::segment::RollSegment;
use serde::Deserialize;
use serde::Serialize;

/// Result of evaluating one segment of a formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentResult {
    segment: RollSegment,
    /// Every draw in order, exploded continuations and dropped dice included
    rolls: Option<Vec<dice::Outcome>>,
    trace: Option<String>,
    /// Signed total, with keep and sign applied
    total: i64,
}

impl SegmentResult {
    /// New for a constant, with no roll and no trace
    pub(crate) fn with_constant(segment: RollSegment, total: i64) -> Self {
        Self {
            segment,
            rolls: None,
            trace: None,
            total,
        }
    }

    pub(crate) fn with_rolls(
        segment: RollSegment,
        rolls: Vec<dice::Outcome>,
        trace: String,
        total: i64,
    ) -> Self {
        Self {
            segment,
            rolls: Some(rolls),
            trace: Some(trace),
            total,
        }
    }

    pub fn get_segment(&self) -> &RollSegment {
        &self.segment
    }

    pub fn get_rolls(&self) -> Option<&[dice::Outcome]> {
        self.rolls.as_deref()
    }

    pub fn get_trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    pub fn get_total(&self) -> i64 {
        self.total
    }

    /// Critic markers found among the draws, `Critic::Not` excluded
    pub fn critics(&self) -> impl Iterator<Item = Critic> + '_ {
        self.rolls
            .iter()
            .flatten()
            .map(|outcome| outcome.critic)
            .filter(|critic| *critic != Critic::Not)
    }
}

impl std::fmt::Display for SegmentResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.trace {
            Some(trace) => write!(f, "{} {}", self.segment, trace),
            None => write!(f, "{}", self.segment),
        }
    }
}
