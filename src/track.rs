//! The live arrow set.
//!
//! The track is the only owner of moving arrows.  It is mutated from one
//! timeline only (the loop's tick step and input handling on the same
//! thread); everyone else sees it through `live_arrows()`.

use crate::config::MOVE_STEP;
use crate::entities::{Arrow, ArrowId, LiveArrow};

#[derive(Clone, Debug)]
pub struct Track {
    arrows: Vec<LiveArrow>,
    step: i32,
    next_id: u32,
}

impl Default for Track {
    fn default() -> Self {
        Self::with_step(MOVE_STEP)
    }
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track whose arrows rise `step` units per tick.
    pub fn with_step(step: i32) -> Self {
        Self {
            arrows: Vec::new(),
            step,
            next_id: 0,
        }
    }

    /// Replace the live set with `initial`, keeping its order.  Ids keep
    /// counting up across spawns so a stale id never names a new arrow.
    pub fn spawn(&mut self, initial: impl IntoIterator<Item = Arrow>) {
        self.arrows.clear();
        for arrow in initial {
            let id = ArrowId(self.next_id);
            self.next_id += 1;
            self.arrows.push(LiveArrow { id, arrow });
        }
    }

    /// Advance one tick: move every arrow, then drop those at or past the
    /// top.  Returns the number of arrows that despawned (silent misses).
    pub fn tick(&mut self) -> usize {
        for live in &mut self.arrows {
            live.arrow.position.y -= self.step;
        }
        let before = self.arrows.len();
        self.arrows.retain(|live| live.arrow.position.y > 0);
        before - self.arrows.len()
    }

    pub fn live_arrows(&self) -> &[LiveArrow] {
        &self.arrows
    }

    /// Remove one arrow.  Absent ids are a no-op and return `None`.
    pub fn remove(&mut self, id: ArrowId) -> Option<Arrow> {
        let index = self.arrows.iter().position(|live| live.id == id)?;
        Some(self.arrows.remove(index).arrow)
    }

    pub fn len(&self) -> usize {
        self.arrows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty()
    }

    pub fn step(&self) -> i32 {
        self.step
    }
}
