//! One game, on one timeline.
//!
//! `Session` bundles the track, the targets and the running score.
//! `Driver` adapts a session to the scheduler: it drains queued terminal
//! events, ticks the track and hands a read-only frame to the renderer,
//! all from the loop's thread.

use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::Event;
use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::entities::{Arrow, Direction, LiveArrow, Targets};
use crate::error::GameError;
use crate::input::{self, Dispatch};
use crate::scheduler::{LoopHandle, Simulation, TickKind};
use crate::scoring::{check_hit, ScoreResult, Scoreboard};
use crate::track::Track;

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Session {
    track: Track,
    targets: Targets,
    scoreboard: Scoreboard,
    chart_len: usize,
    ticks: u64,
    lane_width: i32,
    lane_height: i32,
}

impl Session {
    pub fn new(chart: Vec<Arrow>, config: &GameConfig) -> Self {
        let mut track = Track::with_step(config.move_step);
        let chart_len = chart.len();
        track.spawn(chart);
        Self {
            track,
            targets: Targets::new(config.tile_size, config.target_row),
            scoreboard: Scoreboard::default(),
            chart_len,
            ticks: 0,
            lane_width: config.lane_width(),
            lane_height: config.lane_height,
        }
    }

    /// One simulation step.
    pub fn tick(&mut self) {
        self.ticks += 1;
        let despawned = self.track.tick();
        self.scoreboard.record_missed(despawned);
        if despawned > 0 && self.track.is_empty() {
            info!("chart cleared after {} ticks", self.ticks);
        }
    }

    /// Score a directional press and record it on the scoreboard.
    pub fn press(&mut self, direction: Direction) -> ScoreResult {
        let result = check_hit(direction, &mut self.track, &self.targets);
        if result.matched {
            debug!("{}: {} ({})", direction.name(), result.points, result.grade().label());
            if self.track.is_empty() {
                info!("chart cleared after {} ticks", self.ticks);
            }
        }
        self.scoreboard.record(result);
        result
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Every arrow of the chart has been hit or has scrolled away.
    pub fn is_cleared(&self) -> bool {
        self.track.is_empty()
    }

    pub fn frame(&self, paused: bool) -> FrameView<'_> {
        FrameView {
            arrows: self.track.live_arrows(),
            targets: &self.targets,
            scoreboard: &self.scoreboard,
            chart_len: self.chart_len,
            lane_width: self.lane_width,
            lane_height: self.lane_height,
            paused,
            cleared: self.is_cleared(),
        }
    }
}

// ── Render seam ───────────────────────────────────────────────────────────────

/// Read-only view of one frame.  Borrowing the session keeps it from being
/// mutated while a frame is being drawn.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub arrows: &'a [LiveArrow],
    pub targets: &'a Targets,
    pub scoreboard: &'a Scoreboard,
    pub chart_len: usize,
    pub lane_width: i32,
    pub lane_height: i32,
    pub paused: bool,
    pub cleared: bool,
}

pub trait RenderSink {
    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), GameError>;

    fn resize(&mut self, _width: u16, _height: u16) {}
}

/// Renderer for runs without a screen.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl RenderSink for Headless {
    fn draw(&mut self, _frame: FrameView<'_>) -> Result<(), GameError> {
        Ok(())
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

pub struct Driver<R> {
    session: Session,
    events: Receiver<Event>,
    renderer: R,
    handle: LoopHandle,
}

impl<R: RenderSink> Driver<R> {
    pub fn new(session: Session, events: Receiver<Event>, renderer: R, handle: LoopHandle) -> Self {
        Self {
            session,
            events,
            renderer,
            handle,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Apply one queued event.  Returns `false` once the player has quit.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => match input::dispatch(&key, &mut self.session) {
                Dispatch::Scored(_) | Dispatch::Ignored => {}
                Dispatch::TogglePause => {
                    self.handle.toggle_pause();
                    info!("paused: {}", self.handle.is_paused());
                }
                Dispatch::Quit => {
                    self.handle.stop();
                    return false;
                }
            },
            Event::FocusLost => self.handle.pause(),
            Event::FocusGained => self.handle.resume(),
            Event::Resize(width, height) => self.renderer.resize(width, height),
            _ => {}
        }
        true
    }
}

impl<R: RenderSink> Simulation for Driver<R> {
    fn process_input(&mut self) -> Result<(), GameError> {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if !self.handle_event(event) {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("input channel closed, stopping");
                    self.handle.stop();
                    break;
                }
            }
        }
        Ok(())
    }

    fn update(&mut self, _kind: TickKind) {
        self.session.tick();
    }

    fn render(&mut self) -> Result<(), GameError> {
        let frame = self.session.frame(self.handle.is_paused());
        self.renderer.draw(frame)
    }
}
