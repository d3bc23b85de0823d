//! Scoring module - compounding line-clear reward.
//!
//! Each row cleared in a single sweep is worth `multiplier * 10`, and the
//! multiplier doubles after every row. The multiplier depends only on how
//! many rows have been cleared so far in the sweep, not on adjacency, so a
//! sweep of n rows always scores 10, 20, 40, ... regardless of layout.

/// Score awarded for clearing `rows` rows in one sweep.
pub fn sweep_score(rows: usize) -> u32 {
    let mut score = 0;
    let mut multiplier = 1;
    for _ in 0..rows {
        score += multiplier * 10;
        multiplier *= 2;
    }
    score
}
