use serde::Deserialize;
use serde::Serialize;

/// Optional dice modifier, a dice term carries at most one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Reroll and add on the maximum face, `limit` extra rolls per die, 0 is unlimited
    Explode { limit: u64 },
    KeepHigh(u64),
    KeepLow(u64),
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Modifier::Explode { limit: 0 } => write!(f, "!"),
            Modifier::Explode { limit } => write!(f, "!{limit}"),
            Modifier::KeepHigh(n) => write!(f, "kh{n}"),
            Modifier::KeepLow(n) => write!(f, "kl{n}"),
        }
    }
}
