//! Scoring module - points, level and tick cadence
//!
//! - every spawned piece: +1
//! - every cleared row: +10
//! - rows cleared in the same tick: +5 from two rows, another +10 from three,
//!   another +25 from four (a four-row clear is worth 80)
//! - level is `lines / 10`, uncapped

use crate::types::{BASE_TICK_MS, LINES_PER_LEVEL, LINE_POINTS, MULTI_LINE_BONUSES};

/// Bonus for clearing `rows` rows in one tick (on top of the per-row points).
pub fn multi_line_bonus(rows: u32) -> u32 {
    MULTI_LINE_BONUSES
        .iter()
        .filter(|&&(min_rows, _)| rows >= min_rows)
        .map(|&(_, bonus)| bonus)
        .sum()
}

/// Total points for clearing `rows` rows in one tick.
pub fn line_clear_score(rows: u32) -> u32 {
    rows.saturating_mul(LINE_POINTS)
        .saturating_add(multi_line_bonus(rows))
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Milliseconds between gravity ticks at `level`.
///
/// Keeps shrinking with every level; the floor is 1ms.
pub fn tick_interval_ms(level: u32) -> u32 {
    (BASE_TICK_MS / level.saturating_add(1)).max(1)
}

/// Like [`tick_interval_ms`], but levels above `max_level` tick at
/// `max_level` speed.
pub fn capped_tick_interval_ms(level: u32, max_level: Option<u32>) -> u32 {
    let effective = match max_level {
        Some(cap) => level.min(cap),
        None => level,
    };
    tick_interval_ms(effective)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_scores() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 10);
        assert_eq!(line_clear_score(2), 25);
        assert_eq!(line_clear_score(3), 45);
        assert_eq!(line_clear_score(4), 80);
    }

    #[test]
    fn test_bonuses_are_cumulative() {
        assert_eq!(multi_line_bonus(1), 0);
        assert_eq!(multi_line_bonus(2), 5);
        assert_eq!(multi_line_bonus(3), 15);
        assert_eq!(multi_line_bonus(4), 40);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(95), 9);
        assert_eq!(calculate_level(250), 25);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval_ms(0), 1000);
        assert_eq!(tick_interval_ms(1), 500);
        assert_eq!(tick_interval_ms(9), 100);
        assert_eq!(tick_interval_ms(19), 50);
        assert_eq!(tick_interval_ms(5000), 1);
        assert_eq!(tick_interval_ms(u32::MAX), 1);
    }

    #[test]
    fn test_capped_tick_interval() {
        assert_eq!(capped_tick_interval_ms(20, Some(9)), 100);
        assert_eq!(capped_tick_interval_ms(3, Some(9)), 250);
        assert_eq!(capped_tick_interval_ms(20, None), 47);
    }
}
