//! Simulation session
//!
//! `Session` is the one object the host loop holds. It owns the game state,
//! the input signals, the fixed timestep clock and the crash timers, and
//! hands a read-only snapshot to a `Presenter` once per frame.

use crate::consts::{CRASH_FLASH_TICKS, CRASH_RESET_TICKS, VIEW_WIDTH};
use crate::error::Result;
use crate::level::{LevelSet, Obstacle};
use crate::scheduler::{FixedTimestep, TimerAction, TimerQueue};
use crate::sim::{
    GameEvent, GameState, InputSignals, Player, progress_percent, reset_player, tick,
};
use crate::tuning::Tuning;

/// Read-only view of the simulation for drawing
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub camera_x: f32,
    /// 0-100
    pub progress: f32,
    pub attempts: u32,
    /// Fraction of a step left in the accumulator
    pub alpha: f32,
}

impl<'a> FrameSnapshot<'a> {
    /// Obstacles that intersect the viewport (with a one-block margin)
    pub fn visible_obstacles(&self) -> impl Iterator<Item = &'a Obstacle> + 'a {
        let camera_x = self.camera_x;
        let obstacles = self.obstacles;
        obstacles.iter().filter(move |o| {
            let screen_x = o.pos.x - camera_x;
            screen_x > -o.size.x - 10.0 && screen_x < VIEW_WIDTH + 50.0
        })
    }
}

/// Rendering and HUD collaborator
pub trait Presenter {
    /// Called exactly once per frame delivery, after all steps of that frame
    fn render(&mut self, frame: &FrameSnapshot<'_>);

    /// Mode changes, attempt counts, crash flash, level completion
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Whether the host should keep delivering frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stopped,
}

pub struct Session {
    state: GameState,
    input: InputSignals,
    levels: LevelSet,
    clock: FixedTimestep,
    timers: TimerQueue,
}

impl Session {
    pub fn new(levels: LevelSet, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            input: InputSignals::default(),
            levels,
            clock: FixedTimestep::default(),
            timers: TimerQueue::new(),
        }
    }

    /// Load level `index` and start playing; `now` is the host clock in seconds
    pub fn start_level(&mut self, index: usize, now: f64) -> Result<()> {
        let level = self.levels.load(index, &self.state.tuning)?;
        self.timers.cancel_all();
        self.input = InputSignals::default();
        self.state.start_level(index, level);
        self.clock.reset(now);
        Ok(())
    }

    /// Input-down edge; ignored outside Playing
    pub fn press(&mut self) {
        if self.state.is_playing() {
            self.input.press();
        }
    }

    /// Input-up edge
    pub fn release(&mut self) {
        self.input.release();
    }

    /// Leave Playing on the host's request. Pending crash timers die with it;
    /// events not yet delivered by `frame` are handed back.
    pub fn exit_to_menu(&mut self) -> Vec<GameEvent> {
        self.state.exit_to_menu();
        self.timers.cancel_all();
        self.state.drain_events()
    }

    /// Run one fixed step: due timers first, then physics
    pub fn step(&mut self) {
        if !self.state.is_playing() {
            return;
        }

        for action in self.timers.advance() {
            match action {
                TimerAction::ClearCrashFlash => {
                    self.state.events.push(GameEvent::CrashFlash { active: false });
                }
                TimerAction::ResetPlayer => {
                    log::debug!("Resetting player for attempt {}", self.state.attempts);
                    reset_player(&mut self.state);
                }
            }
        }

        let seen = self.state.events.len();
        tick(&mut self.state, &mut self.input);

        if self.state.events[seen..].contains(&GameEvent::Crashed) {
            self.timers.schedule(CRASH_FLASH_TICKS, TimerAction::ClearCrashFlash);
            self.timers.schedule(CRASH_RESET_TICKS, TimerAction::ResetPlayer);
        }
        if !self.state.is_playing() {
            self.timers.cancel_all();
        }
    }

    /// Handle one frame delivered at `now` (seconds): run the steps the
    /// elapsed time pays for, forward events, render once.
    pub fn frame<P: Presenter + ?Sized>(&mut self, now: f64, presenter: &mut P) -> FrameOutcome {
        if !self.state.is_playing() {
            return FrameOutcome::Stopped;
        }

        let steps = self.clock.advance(now);
        for _ in 0..steps {
            self.step();
        }

        for event in self.state.drain_events() {
            presenter.notify(&event);
        }
        presenter.render(&self.snapshot());

        if self.state.is_playing() {
            FrameOutcome::Continue
        } else {
            FrameOutcome::Stopped
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            player: &self.state.player,
            obstacles: &self.state.obstacles,
            camera_x: self.state.camera_x,
            progress: progress_percent(&self.state),
            attempts: self.state.attempts,
            alpha: self.clock.alpha() as f32,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputSignals {
        &self.input
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::error::Error;
    use crate::level::{LevelDef, RawObstacle};
    use crate::sim::{GamePhase, PlayerMode};

    #[derive(Default)]
    struct Recorder {
        renders: usize,
        events: Vec<GameEvent>,
        progress: Vec<f32>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, frame: &FrameSnapshot<'_>) {
            self.renders += 1;
            self.progress.push(frame.progress);
        }

        fn notify(&mut self, event: &GameEvent) {
            self.events.push(*event);
        }
    }

    fn session_with(objects: &[RawObstacle]) -> Session {
        let levels = LevelSet {
            levels: vec![LevelDef {
                name: "test".to_string(),
                objects: objects.to_vec(),
            }],
        };
        Session::new(levels, Tuning::default())
    }

    #[test]
    fn test_start_level_out_of_range() {
        let mut session = session_with(&[]);
        let err = session.start_level(3, 0.0).unwrap_err();
        assert!(matches!(err, Error::LevelOutOfRange { index: 3, count: 1 }));
        assert_eq!(session.state().phase, GamePhase::Menu);
    }

    #[test]
    fn test_menu_does_not_render() {
        let mut session = session_with(&[]);
        let mut recorder = Recorder::default();
        assert_eq!(session.frame(1.0, &mut recorder), FrameOutcome::Stopped);
        assert_eq!(recorder.renders, 0);
    }

    #[test]
    fn test_press_ignored_in_menu() {
        let mut session = session_with(&[]);
        session.press();
        assert!(!session.input().hold);
    }

    #[test]
    fn test_one_render_per_frame() {
        let mut session = session_with(&[RawObstacle::new(200, 8, 1)]);
        session.start_level(0, 0.0).unwrap();
        let mut recorder = Recorder::default();

        assert_eq!(session.frame(2.5 / 60.0, &mut recorder), FrameOutcome::Continue);
        assert_eq!(recorder.renders, 1);
        assert_eq!(session.state().time_ticks, 2);
        assert!(recorder.events.contains(&GameEvent::LevelStarted { index: 0 }));

        // A frame too short for a step still renders
        session.frame(2.7 / 60.0, &mut recorder);
        assert_eq!(recorder.renders, 2);
        assert_eq!(session.state().time_ticks, 2);

        // A stalled frame is clamped
        session.frame(10.0, &mut recorder);
        assert_eq!(recorder.renders, 3);
        let ticks = session.state().time_ticks;
        assert!((7..=8).contains(&ticks), "got {ticks}");
    }

    #[test]
    fn test_crash_resets_after_delay() {
        // Spike at world x 240, reached on the third step
        let mut session = session_with(&[RawObstacle::new(6, 0, 2)]);
        session.start_level(0, 0.0).unwrap();

        for _ in 0..3 {
            session.step();
        }
        assert!(session.state().player.dead);
        assert_eq!(session.state().attempts, 2);
        assert_eq!(session.pending_timers(), 2);

        for _ in 0..(CRASH_RESET_TICKS - 1) {
            session.step();
        }
        assert!(session.state().player.dead);
        assert_eq!(session.pending_timers(), 1);

        session.step();
        let state = session.state();
        assert!(!state.player.dead);
        assert_eq!(state.player.mode, PlayerMode::Cube);
        assert_eq!(state.camera_x, SCROLL_SPEED);
        assert_eq!(state.attempts, 2);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_crash_flash_events() {
        let mut session = session_with(&[RawObstacle::new(6, 0, 2)]);
        session.start_level(0, 0.0).unwrap();
        let mut recorder = Recorder::default();

        // Crash on step 3, reset on step 39; a zero-length frame delivers
        // the events without stepping
        for _ in 0..(3 + CRASH_RESET_TICKS) {
            session.step();
        }
        session.frame(0.0, &mut recorder);

        let flashes: Vec<bool> = recorder
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::CrashFlash { active } => Some(*active),
                _ => None,
            })
            .collect();
        // Cleared by start, raised by crash, cleared by timer, cleared by reset
        assert_eq!(flashes, vec![false, true, false, false]);
        assert!(recorder.events.contains(&GameEvent::AttemptsChanged(2)));
        assert!(recorder.events.contains(&GameEvent::PlayerReset));
    }

    #[test]
    fn test_exit_during_crash_delay_cancels_reset() {
        let mut session = session_with(&[RawObstacle::new(6, 0, 2)]);
        session.start_level(0, 0.0).unwrap();
        for _ in 0..3 {
            session.step();
        }
        assert!(session.state().player.dead);

        session.exit_to_menu();
        assert_eq!(session.pending_timers(), 0);
        for _ in 0..50 {
            session.step();
        }
        assert!(session.state().player.dead);
    }

    #[test]
    fn test_exit_hands_back_pending_events() {
        let mut session = session_with(&[RawObstacle::new(6, 0, 2)]);
        session.start_level(0, 0.0).unwrap();
        for _ in 0..3 {
            session.step();
        }

        let events = session.exit_to_menu();
        assert!(events.contains(&GameEvent::Crashed));
        assert!(events.contains(&GameEvent::AttemptsChanged(2)));
        assert!(session.state().events.is_empty());

        let mut recorder = Recorder::default();
        assert_eq!(session.frame(1.0, &mut recorder), FrameOutcome::Stopped);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_level_complete_stops_loop() {
        // A single block far above the course: length 500, nothing to hit
        let mut session = session_with(&[RawObstacle::new(0, 8, 1)]);
        session.start_level(0, 0.0).unwrap();
        let mut recorder = Recorder::default();

        let mut now = 0.0;
        let mut outcome = FrameOutcome::Continue;
        for _ in 0..100 {
            now += 0.1;
            outcome = session.frame(now, &mut recorder);
            if outcome == FrameOutcome::Stopped {
                break;
            }
        }

        assert_eq!(outcome, FrameOutcome::Stopped);
        assert_eq!(session.state().phase, GamePhase::Menu);
        assert!(recorder.events.contains(&GameEvent::LevelComplete));
        assert_eq!(recorder.progress.last().copied(), Some(100.0));
        assert!(recorder.progress.windows(2).all(|w| w[0] <= w[1]));

        let renders = recorder.renders;
        let ticks = session.state().time_ticks;
        assert_eq!(session.frame(now + 0.1, &mut recorder), FrameOutcome::Stopped);
        assert_eq!(recorder.renders, renders);
        assert_eq!(session.state().time_ticks, ticks);
    }

    #[test]
    fn test_restart_after_complete() {
        let mut session = session_with(&[RawObstacle::new(0, 8, 1)]);
        session.start_level(0, 0.0).unwrap();
        session.exit_to_menu();
        session.start_level(0, 5.0).unwrap();
        assert!(session.state().is_playing());
        assert_eq!(session.state().attempts, 1);
        assert_eq!(session.state().camera_x, 0.0);
    }

    #[test]
    fn test_visible_obstacles() {
        let mut session = session_with(&[
            RawObstacle::new(0, 0, 1),
            RawObstacle::new(10, 0, 1),
            RawObstacle::new(30, 0, 1),
        ]);
        session.start_level(0, 0.0).unwrap();
        let snapshot = session.snapshot();
        let xs: Vec<f32> = snapshot.visible_obstacles().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![0.0, 400.0]);
    }
}
