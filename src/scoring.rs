//! Proximity scoring.
//!
//! A key press is scored against the live arrows of its own lane only.
//! The closest in-band arrow wins and is consumed; everything else is left
//! alone.  A press with nothing in band is a miss, not an error.

use crate::entities::{ArrowId, Direction, Targets};
use crate::track::Track;

// ── Bands ─────────────────────────────────────────────────────────────────────

/// Largest distance from the target that still scores.
pub const SCORING_RANGE: u32 = 50;

/// Points for an arrow `diff` units away from its target.
pub fn points_for(diff: u32) -> u32 {
    match diff {
        0..=5 => 100,
        6..=15 => 75,
        16..=30 => 50,
        31..=SCORING_RANGE => 25,
        _ => 0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
    Perfect,
    Great,
    Good,
    Almost,
    Miss,
}

impl Grade {
    pub fn from_points(points: u32) -> Grade {
        match points {
            100 => Grade::Perfect,
            75 => Grade::Great,
            50 => Grade::Good,
            25 => Grade::Almost,
            _ => Grade::Miss,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Perfect => "PERFECT",
            Grade::Great => "GREAT",
            Grade::Good => "GOOD",
            Grade::Almost => "ALMOST",
            Grade::Miss => "MISS",
        }
    }
}

// ── Hit check ─────────────────────────────────────────────────────────────────

/// Outcome of one directional press.  Ephemeral; the caller decides what
/// to do with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreResult {
    pub direction: Direction,
    pub points: u32,
    pub matched: bool,
}

impl ScoreResult {
    pub fn miss(direction: Direction) -> Self {
        Self {
            direction,
            points: 0,
            matched: false,
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_points(self.points)
    }
}

/// Score a `direction` press.  On a match the chosen arrow is removed from
/// `track`; at most one arrow is consumed per call.
pub fn check_hit(direction: Direction, track: &mut Track, targets: &Targets) -> ScoreResult {
    let Some((id, diff)) = best_candidate(direction, track, targets) else {
        return ScoreResult::miss(direction);
    };

    // Candidate exists only if in band, so points are never zero here.
    let points = points_for(diff);
    track.remove(id);
    ScoreResult {
        direction,
        points,
        matched: true,
    }
}

/// Closest in-band arrow of `direction`.  Ties go to the earliest arrow in
/// track order.
fn best_candidate(
    direction: Direction,
    track: &Track,
    targets: &Targets,
) -> Option<(ArrowId, u32)> {
    let target_y = targets.get(direction).position.y;
    track
        .live_arrows()
        .iter()
        .filter(|live| live.arrow.direction == direction)
        .map(|live| (live.id, live.arrow.position.y.abs_diff(target_y)))
        .filter(|&(_, diff)| points_for(diff) > 0)
        .min_by_key(|&(_, diff)| diff)
}

// ── Running total ─────────────────────────────────────────────────────────────

/// Session totals layered on top of individual results.  Not persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub total: u32,
    pub hits: u32,
    /// Presses that matched nothing.
    pub whiffs: u32,
    /// Arrows that scrolled past the top unhit.
    pub missed: u32,
    pub combo: u32,
    pub best_combo: u32,
    pub last: Option<ScoreResult>,
}

impl Scoreboard {
    pub fn record(&mut self, result: ScoreResult) {
        if result.matched {
            self.total += result.points;
            self.hits += 1;
            self.combo += 1;
            self.best_combo = self.best_combo.max(self.combo);
        } else {
            self.whiffs += 1;
        }
        self.last = Some(result);
    }

    /// Arrows that despawned past the top break the combo.
    pub fn record_missed(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.missed += count as u32;
        self.combo = 0;
    }
}
