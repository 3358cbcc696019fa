use serde::Deserialize;
use serde::Serialize;

/// Flat amount added to or subtracted from a roll, `+2` or `-1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantModifier {
    pub raw: String,
    pub negative: bool,
    pub value: u64,
}

impl ConstantModifier {
    pub fn new(value: u64, negative: bool) -> Self {
        Self {
            raw: format!("{}{value}", if negative { '-' } else { '+' }),
            negative,
            value,
        }
    }

    /// Signed value of the constant
    pub fn get_value(&self) -> Option<i64> {
        let value = i64::try_from(self.value).ok()?;
        Some(if self.negative { -value } else { value })
    }
}

impl std::fmt::Display for ConstantModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
