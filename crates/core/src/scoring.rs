//! Scoring module - points and gravity pacing
//!
//! Line clears pay a flat amount per row plus a combo bonus when a single
//! lock clears more than one row. Level-ups shorten the gravity interval
//! down to a fixed floor.

use crate::types::{COMBO_BONUS, LINE_CLEAR_SCORE};

/// Points for clearing `lines` rows with one lock.
///
/// Each row pays [`LINE_CLEAR_SCORE`]; every row past the first adds [`COMBO_BONUS`].
pub fn line_clear_score(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_CLEAR_SCORE
        .saturating_mul(lines)
        .saturating_add(COMBO_BONUS.saturating_mul(lines - 1))
}

/// Gravity interval after one level-up.
pub fn next_gravity_interval_ms(current_ms: u32, step_ms: u32, floor_ms: u32) -> u32 {
    current_ms.saturating_sub(step_ms).max(floor_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BASE_GRAVITY_MS, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS};

    #[test]
    fn test_line_clear_scores() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 200);
        assert_eq!(line_clear_score(2), 600);
        assert_eq!(line_clear_score(3), 1000);
        assert_eq!(line_clear_score(4), 1400);
    }

    #[test]
    fn test_gravity_interval_steps_to_floor() {
        let mut interval = BASE_GRAVITY_MS;
        let mut steps = 0;
        while interval > GRAVITY_FLOOR_MS {
            interval = next_gravity_interval_ms(interval, GRAVITY_STEP_MS, GRAVITY_FLOOR_MS);
            steps += 1;
        }
        assert_eq!(steps, 6);
        assert_eq!(
            next_gravity_interval_ms(interval, GRAVITY_STEP_MS, GRAVITY_FLOOR_MS),
            GRAVITY_FLOOR_MS
        );
        assert_eq!(next_gravity_interval_ms(250, 100, 200), 200);
    }
}
