//! All game entity types: pure data, no logic beyond lookups.

// ── Position ──────────────────────────────────────────────────────────────────

/// Lane-space coordinate.  `y` grows downward; the target row sits near 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
}

impl Direction {
    /// All four lanes, left to right on the board.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::Right,
    ];

    /// Board column, 1-based.  Charts use the same code for the direction.
    pub fn column(self) -> i32 {
        match self {
            Direction::Left => 1,
            Direction::Down => 2,
            Direction::Up => 3,
            Direction::Right => 4,
        }
    }

    pub fn from_column(column: i32) -> Option<Direction> {
        match column {
            1 => Some(Direction::Left),
            2 => Some(Direction::Down),
            3 => Some(Direction::Up),
            4 => Some(Direction::Right),
            _ => None,
        }
    }

    /// 0-based lane index, usable for array lookups.
    pub fn index(self) -> usize {
        (self.column() - 1) as usize
    }

    pub fn glyph(self) -> char {
        match self {
            Direction::Left => '←',
            Direction::Down => '↓',
            Direction::Up => '↑',
            Direction::Right => '→',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Down => "Down",
            Direction::Up => "Up",
            Direction::Right => "Right",
        }
    }
}

// ── Arrows ────────────────────────────────────────────────────────────────────

/// A moving arrow, as produced by a chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrow {
    pub position: Position,
    pub direction: Direction,
}

impl Arrow {
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Arrow placed in its direction's column at height `y`.
    pub fn in_lane(direction: Direction, y: i32, tile_size: i32) -> Self {
        Self::new(Position::new(column_x(direction, tile_size), y), direction)
    }
}

/// Identity handed out by the track when an arrow goes live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArrowId(pub u32);

/// An arrow currently owned by the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveArrow {
    pub id: ArrowId,
    pub arrow: Arrow,
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// A stationary receptor at the top of a lane.  Never moves, never despawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetArrow {
    pub position: Position,
    pub direction: Direction,
}

/// Exactly one target per direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Targets {
    arrows: [TargetArrow; 4],
}

impl Targets {
    /// Lay out the four targets on `row`, one tile per column.
    pub fn new(tile_size: i32, row: i32) -> Self {
        let arrows = Direction::ALL.map(|direction| TargetArrow {
            position: Position::new(column_x(direction, tile_size), row),
            direction,
        });
        Self { arrows }
    }

    pub fn get(&self, direction: Direction) -> &TargetArrow {
        &self.arrows[direction.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetArrow> {
        self.arrows.iter()
    }
}

/// Left edge of a direction's column in lane units.
pub fn column_x(direction: Direction, tile_size: i32) -> i32 {
    direction.column() * tile_size - tile_size
}
