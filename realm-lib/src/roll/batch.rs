use crate::error::EvaluationError;
use crate::roll::segment::SegmentResult;
use crate::roll::trace;
use serde::Deserialize;
use serde::Serialize;
use std::ops::Deref;

/// Optional bounds a grand total must fall within to succeed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Thresholds {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Classify a total, absent when no bound is set
    pub fn verdict(&self, total: i64) -> Option<Verdict> {
        if self.is_empty() {
            return None;
        }
        let above_min = self.min.map_or(true, |min| total >= min);
        let below_max = self.max.map_or(true, |max| total <= max);
        Some(if above_min && below_max {
            Verdict::Success
        } else {
            Verdict::Failure
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Success,
    Failure,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Success => write!(f, "success"),
            Verdict::Failure => write!(f, "failure"),
        }
    }
}

/// Segment results of one batch with their grand total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResults {
    results: Vec<SegmentResult>,
    thresholds: Thresholds,
    grand_total: i64,
    verdict: Option<Verdict>,
}

impl RollResults {
    pub(crate) fn new(
        results: Vec<SegmentResult>,
        thresholds: Thresholds,
    ) -> Result<Self, EvaluationError> {
        let grand_total = results
            .iter()
            .try_fold(0i64, |acc, result| acc.checked_add(result.get_total()))
            .ok_or("grand total overflow")?;
        Ok(Self {
            results,
            thresholds,
            grand_total,
            verdict: thresholds.verdict(grand_total),
        })
    }

    pub fn get_grand_total(&self) -> i64 {
        self.grand_total
    }

    pub fn get_verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Signed total of each segment, in formula order
    pub fn totals(&self) -> Vec<i64> {
        self.results.iter().map(|r| r.get_total()).collect()
    }

    /// Traces of the dice segments only
    pub fn traces(&self) -> impl Iterator<Item = &str> {
        self.results.iter().filter_map(|r| r.get_trace())
    }
}

impl Deref for RollResults {
    type Target = [SegmentResult];

    fn deref(&self) -> &Self::Target {
        &self.results
    }
}

impl std::fmt::Display for RollResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            trace::render_totals(&self.totals(), self.grand_total)
        )?;
        if let Some(verdict) = self.verdict {
            write!(f, " *{verdict}*")?;
        }
        Ok(())
    }
}

/// One result per repeated batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResults {
    batches: Vec<RollResults>,
}

impl BatchResults {
    pub(crate) fn new(batches: Vec<RollResults>) -> Self {
        Self { batches }
    }

    /// Grand total of each batch
    pub fn totals(&self) -> Vec<i64> {
        self.batches.iter().map(|b| b.get_grand_total()).collect()
    }

    /// Number of batches that met their thresholds
    pub fn successes(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| b.get_verdict() == Some(Verdict::Success))
            .count()
    }
}

impl Deref for BatchResults {
    type Target = [RollResults];

    fn deref(&self) -> &Self::Target {
        &self.batches
    }
}

impl std::fmt::Display for BatchResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.batches
            .iter()
            .try_for_each(|batch| writeln!(f, "{batch}"))
    }
}
