use crate::dice;
use itertools::Itertools;

/// Render the rolled sequence with its display total, `[3, 6, 2] = **-11**`
///
/// `total` is the unsigned magnitude, the sign only comes from `negative`.
pub fn render(rolls: &[dice::Outcome], total: u64, negative: bool) -> String {
    format!(
        "[{}] = **{}{}**",
        rolls.iter().map(|r| r.value).format(", "),
        if negative { "-" } else { "" },
        total
    )
}

/// Render a list of signed totals, `[8, -2, 1] = **7**`
pub fn render_totals(totals: &[i64], grand_total: i64) -> String {
    format!("[{}] = **{}**", totals.iter().format(", "), grand_total)
}
