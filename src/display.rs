//! Rendering layer. All terminal I/O lives here.
//!
//! `TerminalDisplay` receives a read-only `FrameView` once per tick and
//! translates it into terminal commands.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use circlebear_revolution::entities::Direction;
use circlebear_revolution::scoring::{Grade, Scoreboard};
use circlebear_revolution::session::{FrameView, RenderSink};
use circlebear_revolution::GameError;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_COMBO: Color = Color::White;
const C_TARGET: Color = Color::DarkGrey;
const C_PANEL: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;

fn lane_color(direction: Direction) -> Color {
    match direction {
        Direction::Left => Color::Magenta,
        Direction::Down => Color::Cyan,
        Direction::Up => Color::Green,
        Direction::Right => Color::Red,
    }
}

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Perfect => Color::Cyan,
        Grade::Great => Color::Green,
        Grade::Good => Color::Yellow,
        Grade::Almost => Color::Magenta,
        Grade::Miss => Color::DarkGrey,
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Terminal columns per lane.
const LANE_COLS: u16 = 5;
/// First playfield row (row 0 is the HUD, row 1 the top border).
const FIELD_TOP: u16 = 2;
/// Playfield width including both side walls.
const FIELD_WIDTH: u16 = LANE_COLS * 4 + 2;
const PANEL_X: u16 = FIELD_WIDTH + 2;

pub struct TerminalDisplay<W: Write> {
    out: W,
    width: u16,
    height: u16,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self { out, width, height }
    }

    /// Number of rows between the top and bottom borders.
    fn field_rows(&self) -> u16 {
        self.height.saturating_sub(4).max(1)
    }

    /// Terminal row for a lane-space `y`, or `None` when it is off-screen.
    fn row_for(&self, y: i32, lane_height: i32) -> Option<u16> {
        if y < 0 || y >= lane_height || lane_height <= 0 {
            return None;
        }
        let rows = i64::from(self.field_rows());
        let row = i64::from(y) * rows / i64::from(lane_height);
        Some(FIELD_TOP + row as u16)
    }

    /// Terminal column for a lane-space `x`, centred in its lane.
    fn col_for(x: i32, lane_width: i32) -> u16 {
        let inner = i64::from(LANE_COLS * 4);
        let scaled = i64::from(x.max(0)) * inner / i64::from(lane_width.max(1));
        let col = scaled.min(inner - 1) as u16;
        1 + col - col % LANE_COLS + LANE_COLS / 2
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

impl<W: Write> RenderSink for TerminalDisplay<W> {
    /// Render one complete frame.
    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), GameError> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border()?;
        self.draw_hud(frame.scoreboard)?;

        for target in frame.targets.iter() {
            if let Some(row) = self.row_for(target.position.y, frame.lane_height) {
                let col = Self::col_for(target.position.x, frame.lane_width);
                self.draw_glyph(target.direction, col, row, C_TARGET)?;
            }
        }
        for live in frame.arrows {
            let arrow = &live.arrow;
            if let Some(row) = self.row_for(arrow.position.y, frame.lane_height) {
                let col = Self::col_for(arrow.position.x, frame.lane_width);
                self.draw_glyph(arrow.direction, col, row, lane_color(arrow.direction))?;
            }
        }

        self.draw_panel(&frame)?;
        self.draw_controls_hint()?;

        if frame.paused {
            self.draw_banner(&[
                ("PAUSED", Color::Yellow),
                ("P - Resume  Q - Quit", Color::White),
            ])?;
        } else if frame.cleared {
            let score_line = format!("Final Score: {}", frame.scoreboard.total);
            self.draw_banner(&[
                ("CHART CLEAR", Color::Green),
                (&score_line, Color::Yellow),
                ("Q - Quit", Color::White),
            ])?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

// ── Pieces ────────────────────────────────────────────────────────────────────

impl<W: Write> TerminalDisplay<W> {
    fn draw_border(&mut self) -> std::io::Result<()> {
        let inner = (FIELD_WIDTH - 2) as usize;
        let bottom = self.height.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

        for row in FIELD_TOP..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(FIELD_WIDTH - 1, row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_hud(&mut self, board: &Scoreboard) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!("Score: {:>7}", board.total)))?;

        let combo = format!("Combo: {}", board.combo);
        let cx = FIELD_WIDTH.saturating_sub(combo.len() as u16 + 1);
        self.out.queue(cursor::MoveTo(cx.max(16), 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_COMBO))?;
        self.out.queue(Print(combo))?;
        Ok(())
    }

    fn draw_glyph(
        &mut self,
        direction: Direction,
        col: u16,
        row: u16,
        color: Color,
    ) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(direction.glyph()))?;
        Ok(())
    }

    fn draw_panel(&mut self, frame: &FrameView<'_>) -> std::io::Result<()> {
        if self.width <= PANEL_X {
            return Ok(());
        }
        let board = frame.scoreboard;

        // Last judgement, coloured by grade
        self.out.queue(cursor::MoveTo(PANEL_X, FIELD_TOP))?;
        if let Some(last) = board.last {
            let grade = last.grade();
            self.out.queue(style::SetForegroundColor(lane_color(last.direction)))?;
            self.out.queue(Print(format!("{} ", last.direction.glyph())))?;
            self.out.queue(style::SetForegroundColor(grade_color(grade)))?;
            self.out.queue(Print(format!("{:<8} +{}", grade.label(), last.points)))?;
        }

        let lines = [
            format!("Hits:    {}", board.hits),
            format!("Missed:  {}", board.missed),
            format!("Whiffs:  {}", board.whiffs),
            format!("Best:    {}", board.best_combo),
            format!("Left:    {}/{}", frame.arrows.len(), frame.chart_len),
        ];
        self.out.queue(style::SetForegroundColor(C_PANEL))?;
        for (i, line) in lines.iter().enumerate() {
            self.out.queue(cursor::MoveTo(PANEL_X, FIELD_TOP + 2 + i as u16))?;
            self.out.queue(Print(line))?;
        }
        Ok(())
    }

    // ── Controls hint (last row) ──────────────────────────────────────────────

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print("← ↓ ↑ → / A S W D : Hit   P : Pause   Q : Quit"))?;
        Ok(())
    }

    // ── Overlay ───────────────────────────────────────────────────────────────

    fn draw_banner(&mut self, lines: &[(&str, Color)]) -> std::io::Result<()> {
        let cx = self.width.max(FIELD_WIDTH) / 2;
        let start_row = (self.height / 2).saturating_sub(lines.len() as u16 / 2);

        for (i, (msg, color)) in lines.iter().enumerate() {
            let row = start_row + i as u16;
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*msg))?;
        }
        Ok(())
    }
}
