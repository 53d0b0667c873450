mod common;

use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use circlebear_revolution::entities::*;
use circlebear_revolution::scheduler::{LoopHandle, Scheduler, Simulation};
use circlebear_revolution::scoring::ScoreResult;
use circlebear_revolution::session::*;
use circlebear_revolution::{GameConfig, GameError};

use common::FakeClock;

fn chart(arrows: &[(Direction, i32)]) -> Vec<Arrow> {
    arrows.iter().map(|&(d, y)| Arrow::in_lane(d, y, 50)).collect()
}

fn make_session(arrows: &[(Direction, i32)]) -> Session {
    Session::new(chart(arrows), &GameConfig::default())
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn directions(session: &Session) -> Vec<Direction> {
    session.track().live_arrows().iter().map(|l| l.arrow.direction).collect()
}

/// Render sink that keeps a copy of what it was shown and can stop the
/// loop after a fixed number of frames.
struct RecordingSink {
    frames: Vec<Vec<Arrow>>,
    paused: Vec<bool>,
    stop_after: usize,
    handle: LoopHandle,
}

impl RecordingSink {
    fn new(handle: LoopHandle, stop_after: usize) -> Self {
        Self {
            frames: Vec::new(),
            paused: Vec::new(),
            stop_after,
            handle,
        }
    }
}

impl RenderSink for RecordingSink {
    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), GameError> {
        self.frames.push(frame.arrows.iter().map(|l| l.arrow).collect());
        self.paused.push(frame.paused);
        if self.frames.len() >= self.stop_after {
            self.handle.stop();
        }
        Ok(())
    }
}

// ── End-to-end scenarios ──────────────────────────────────────────────────────

#[test]
fn right_arrow_ticked_onto_target_scores_perfect() {
    let mut session = make_session(&[(Direction::Left, 500), (Direction::Right, 110)]);

    // 110 → 50 at two units per tick
    for _ in 0..30 {
        session.tick();
    }
    let right_y = session.track().live_arrows()[1].arrow.position.y;
    assert_eq!(right_y, 50);

    let result = session.press(Direction::Right);

    assert_eq!(
        result,
        ScoreResult {
            direction: Direction::Right,
            points: 100,
            matched: true,
        }
    );
    assert_eq!(directions(&session), vec![Direction::Left]);
    assert_eq!(session.scoreboard().total, 100);
}

#[test]
fn far_up_arrow_is_a_miss_and_stays() {
    let mut session = make_session(&[(Direction::Up, 300)]);

    let result = session.press(Direction::Up);

    assert_eq!(
        result,
        ScoreResult {
            direction: Direction::Up,
            points: 0,
            matched: false,
        }
    );
    assert_eq!(directions(&session), vec![Direction::Up]);
}

#[test]
fn unhit_arrow_scrolls_away_silently() {
    let mut session = make_session(&[(Direction::Down, 10)]);
    for _ in 0..5 {
        session.tick();
    }
    assert!(session.is_cleared());
    assert_eq!(session.scoreboard().total, 0);
    assert_eq!(session.scoreboard().missed, 1);
    assert_eq!(session.ticks(), 5);
}

#[test]
fn frame_view_reflects_session() {
    let session = make_session(&[(Direction::Left, 200), (Direction::Up, 300)]);
    let frame = session.frame(true);
    assert_eq!(frame.arrows.len(), 2);
    assert_eq!(frame.chart_len, 2);
    assert_eq!(frame.lane_width, 200);
    assert_eq!(frame.lane_height, 600);
    assert!(frame.paused);
    assert!(!frame.cleared);
    assert_eq!(frame.targets.get(Direction::Up).position.y, 50);
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[test]
fn driver_applies_queued_presses_in_order() {
    let (tx, rx) = mpsc::channel();
    let handle = LoopHandle::default();
    let session = make_session(&[
        (Direction::Left, 50),
        (Direction::Down, 60),
        (Direction::Up, 400),
    ]);
    let mut driver = Driver::new(session, rx, Headless, handle);

    tx.send(key(KeyCode::Left)).unwrap();
    tx.send(key(KeyCode::Char('x'))).unwrap();
    tx.send(key(KeyCode::Down)).unwrap();
    tx.send(key(KeyCode::Up)).unwrap();
    driver.process_input().unwrap();

    let board = driver.session().scoreboard();
    assert_eq!(board.hits, 2);
    assert_eq!(board.whiffs, 1);
    assert_eq!(board.total, 175);
    assert_eq!(directions(driver.session()), vec![Direction::Up]);
}

#[test]
fn driver_stops_at_quit_and_leaves_later_events_queued() {
    let (tx, rx) = mpsc::channel();
    let handle = LoopHandle::default();
    let session = make_session(&[(Direction::Left, 50)]);
    let mut driver = Driver::new(session, rx, Headless, handle.clone());

    tx.send(key(KeyCode::Esc)).unwrap();
    tx.send(key(KeyCode::Left)).unwrap();
    driver.process_input().unwrap();

    assert!(!handle.is_running());
    assert_eq!(driver.session().track().len(), 1);
}

#[test]
fn driver_pauses_on_focus_loss() {
    let (tx, rx) = mpsc::channel();
    let handle = LoopHandle::default();
    let mut driver = Driver::new(make_session(&[]), rx, Headless, handle.clone());

    tx.send(Event::FocusLost).unwrap();
    driver.process_input().unwrap();
    assert!(handle.is_paused());

    tx.send(Event::FocusGained).unwrap();
    driver.process_input().unwrap();
    assert!(!handle.is_paused());

    tx.send(key(KeyCode::Char('p'))).unwrap();
    driver.process_input().unwrap();
    assert!(handle.is_paused());
}

#[test]
fn closed_input_channel_ends_the_loop() {
    let (tx, rx) = mpsc::channel::<Event>();
    drop(tx);
    let scheduler = Scheduler::new(&GameConfig::default());
    let session = make_session(&[(Direction::Left, 300)]);
    let mut driver = Driver::new(session, rx, Headless, scheduler.handle());

    let stats = scheduler.run(&mut FakeClock::new(), &mut driver).unwrap();

    assert_eq!(stats.iterations, 1);
    assert_eq!(stats.ticks, 0);
    assert_eq!(driver.session().ticks(), 0);
}

#[test]
fn scheduled_run_never_renders_despawned_arrows() {
    let (_tx, rx) = mpsc::channel::<Event>();
    let scheduler = Scheduler::new(&GameConfig::default());
    let sink = RecordingSink::new(scheduler.handle(), 12);
    let session = make_session(&[
        (Direction::Left, 3),
        (Direction::Down, 8),
        (Direction::Up, 15),
        (Direction::Right, 400),
    ]);
    let mut driver = Driver::new(session, rx, sink, scheduler.handle());

    let stats = scheduler.run(&mut FakeClock::new(), &mut driver).unwrap();

    assert_eq!(stats.frames, 12);
    assert_eq!(driver.session().ticks(), 12);
    for frame in &driver.renderer().frames {
        assert!(frame.iter().all(|a| a.position.y > 0));
    }
    // After 12 ticks only the far Right arrow is left, 24 units higher
    assert_eq!(
        driver.renderer().frames.last().unwrap(),
        &vec![Arrow::in_lane(Direction::Right, 376, 50)]
    );
    assert_eq!(driver.session().scoreboard().missed, 3);
}

#[test]
fn paused_run_freezes_arrows_but_keeps_rendering() {
    let (_tx, rx) = mpsc::channel::<Event>();
    let scheduler = Scheduler::new(&GameConfig::default());
    scheduler.handle().pause();
    let sink = RecordingSink::new(scheduler.handle(), 4);
    let session = make_session(&[(Direction::Up, 200)]);
    let mut driver = Driver::new(session, rx, sink, scheduler.handle());

    scheduler.run(&mut FakeClock::new(), &mut driver).unwrap();

    assert_eq!(driver.renderer().paused, vec![true; 4]);
    assert_eq!(driver.session().ticks(), 0);
    assert_eq!(driver.session().track().live_arrows()[0].arrow.position.y, 200);
}

#[test]
fn presses_while_paused_are_still_scored() {
    let (tx, rx) = mpsc::channel();
    let handle = LoopHandle::default();
    handle.pause();
    let session = make_session(&[(Direction::Up, 50), (Direction::Left, 400)]);
    let mut driver = Driver::new(session, rx, Headless, handle.clone());

    tx.send(key(KeyCode::Up)).unwrap();
    tx.send(key(KeyCode::Left)).unwrap();
    driver.process_input().unwrap();

    // One result per press: a hit on the frozen Up arrow, a whiff on Left
    assert!(handle.is_paused());
    let board = driver.session().scoreboard();
    assert_eq!(board.hits, 1);
    assert_eq!(board.whiffs, 1);
    assert_eq!(board.total, 100);
    assert_eq!(board.last, Some(ScoreResult::miss(Direction::Left)));
    assert_eq!(directions(driver.session()), vec![Direction::Left]);
}

#[test]
fn session_targets_sit_on_the_target_row() {
    let session = make_session(&[]);
    let xs: Vec<i32> = session.targets().iter().map(|t| t.position.x).collect();
    assert_eq!(xs, vec![0, 50, 100, 150]);
    assert!(session.targets().iter().all(|t| t.position.y == 50));
    assert_eq!(GameConfig::default().lane_width(), 200);
}
