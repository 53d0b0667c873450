//! Game tuning knobs.  Every field has a default matching the classic
//! 200×600 lane running at 80 ticks per second.

use std::time::Duration;

/// Width and height of one board tile, in lane units.
pub const TILE_SIZE: i32 = 50;

/// Lane height in lane units.  Arrows below this are off-screen.
pub const LANE_HEIGHT: i32 = 600;

/// Vertical position of the target row.
pub const TARGET_ROW: i32 = TILE_SIZE;

/// Distance an arrow travels upward per tick.
pub const MOVE_STEP: i32 = 2;

pub const TICKS_PER_SECOND: u32 = 80;

/// Upper bound on catch-up ticks per outer loop iteration.
pub const MAX_FRAME_SKIPS: u32 = 5;

/// Consecutive zero-sleep iterations before the loop yields its quantum.
pub const NO_DELAYS_PER_YIELD: u32 = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub ticks_per_second: u32,
    pub max_frame_skips: u32,
    pub no_delays_per_yield: u32,
    pub move_step: i32,
    pub tile_size: i32,
    pub target_row: i32,
    pub lane_height: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            max_frame_skips: MAX_FRAME_SKIPS,
            no_delays_per_yield: NO_DELAYS_PER_YIELD,
            move_step: MOVE_STEP,
            tile_size: TILE_SIZE,
            target_row: TARGET_ROW,
            lane_height: LANE_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Wall-clock duration of one tick.  A zero rate is treated as one
    /// tick per second.
    pub fn target_period(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    /// Lane width: four columns of one tile each.
    pub fn lane_width(&self) -> i32 {
        self.tile_size * 4
    }
}
