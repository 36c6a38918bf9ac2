//! Pulse Dash entry point
//!
//! Headless native runner: plays a level against a scripted tap pattern at
//! 60 fps and logs what the HUD would show. Rendering lives with the host.
//!
//! Usage: `pulse-dash [level-index] [tuning-preset]`

use pulse_dash::sim::GameEvent;
use pulse_dash::{FrameOutcome, FrameSnapshot, LevelSet, Presenter, Session, Tuning};

/// Frames to simulate before giving up
const MAX_FRAMES: u32 = 60 * 120;
/// Tap every this many frames
const TAP_INTERVAL: u32 = 45;
/// Hold each tap this many frames
const TAP_LENGTH: u32 = 6;

/// Presenter that logs instead of drawing
#[derive(Default)]
struct LogPresenter {
    frames: u32,
    best_progress: f32,
}

impl Presenter for LogPresenter {
    fn render(&mut self, frame: &FrameSnapshot<'_>) {
        self.frames += 1;
        self.best_progress = self.best_progress.max(frame.progress);
        if self.frames % 60 == 0 {
            log::info!(
                "t={}s progress={:.0}% mode={} y={:.1} visible={}",
                self.frames / 60,
                frame.progress,
                frame.player.mode,
                frame.player.pos.y,
                frame.visible_obstacles().count()
            );
        }
    }

    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ModeChanged(mode) => log::info!("MODE: {}", mode),
            GameEvent::AttemptsChanged(n) => log::info!("Attempt {}", n),
            GameEvent::LevelComplete => log::info!("Level complete!"),
            other => log::debug!("{:?}", other),
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let index = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);
    let tuning = match args.next() {
        Some(name) => match Tuning::preset(&name) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => Tuning::default(),
    };

    let mut session = Session::new(LevelSet::builtin(), tuning);
    if let Err(e) = session.start_level(index, 0.0) {
        log::error!("Cannot start level {}: {}", index, e);
        std::process::exit(1);
    }
    log::info!("Pulse Dash (headless) playing level {}", index);

    let mut presenter = LogPresenter::default();
    let mut frame = 0;
    while frame < MAX_FRAMES {
        frame += 1;
        match frame % TAP_INTERVAL {
            0 => session.press(),
            n if n == TAP_LENGTH => session.release(),
            _ => {}
        }
        let now = frame as f64 / 60.0;
        if session.frame(now, &mut presenter) == FrameOutcome::Stopped {
            break;
        }
    }

    let state = session.state();
    println!(
        "level {} finished={} attempts={} best progress={:.0}% frames={}",
        index,
        !state.is_playing(),
        state.attempts,
        presenter.best_progress,
        presenter.frames
    );
}
