pub mod modifier;

pub use modifier::Modifier;

use serde::Deserialize;
use serde::Serialize;

/// Mark if a dice result is a critic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Critic {
    Max,
    Min,
    Not,
}

/// Keep one dice result with critic marker
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Outcome {
    pub value: u64,
    pub critic: Critic,
}

impl Outcome {
    pub fn new(value: u64, faces: u64) -> Self {
        Outcome {
            value,
            critic: match value {
                v if v == faces => Critic::Max,
                1 => Critic::Min,
                _ => Critic::Not,
            },
        }
    }
}

impl PartialEq for Outcome {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Outcome {}

impl PartialOrd for Outcome {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Outcome {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

/// A group of identical dice, `4d6!3` or `-2d20kh`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Fragment of the formula this roll was parsed from, sign included
    pub raw: String,
    pub negative: bool,
    pub count: u64,
    pub faces: u64,
    pub modifier: Option<Modifier>,
}

impl DiceRoll {
    pub fn new(count: u64, faces: u64) -> Self {
        let raw = format!("{count}d{faces}");
        Self {
            raw,
            negative: false,
            count,
            faces,
            modifier: None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.raw.push_str(&modifier.to_string());
        self.modifier = Some(modifier);
        self
    }

    /// Same roll, subtracted from the total
    pub fn subtracted(mut self) -> Self {
        if !self.negative {
            self.negative = true;
            self.raw.insert(0, '-');
        }
        self
    }
}
