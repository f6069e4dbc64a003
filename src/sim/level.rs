//! Brick walls and level progression

use super::entities::Brick;
use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Rows in the wall for a level: 3 at level 1, 4 at level 2, 5 at level 3
pub fn rows_for_level(level: u32) -> usize {
    BRICK_BASE_ROWS + level.saturating_sub(1) as usize
}

/// Build the brick wall for a level. Row colors cycle through the palette.
pub fn build_wall(level: u32, next_id: &mut u32) -> Vec<Brick> {
    let rows = rows_for_level(level);
    let mut bricks = Vec::with_capacity(rows * BRICK_COLUMNS);

    for row in 0..rows {
        let color = BRICK_COLORS[row % BRICK_COLORS.len()];
        let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_Y;
        for col in 0..BRICK_COLUMNS {
            let x = col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_PADDING;
            bricks.push(Brick {
                id: *next_id,
                rect: Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
                color,
            });
            *next_id += 1;
        }
    }

    bricks
}

/// Advance to the next level (or win) once the wall is cleared.
/// Returns true if the wall was cleared this tick.
pub fn check_level_progress(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.bricks.is_empty() {
        return false;
    }

    if state.level < MAX_LEVEL {
        state.level += 1;
        state.rebuild_wall();
        state.power_ups.clear();
        state.lasers.clear();
        state.reset_ball_and_paddle();
        state.show_message(format!("Level {}", state.level));
        log::info!("Level {} started ({} bricks)", state.level, state.bricks.len());
        events.push(GameEvent::LevelStarted(state.level));
    } else {
        state.phase = GamePhase::YouWin;
        state.firework_timer = 0;
        log::info!("All levels cleared, final score {}", state.score);
        events.push(GameEvent::Won);
    }
    true
}
