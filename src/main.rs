//! Panda Run entry point
//!
//! Native builds run a headless autoplay session: the simulation is driven
//! through the same fixed-step loop a windowed host would use, with the
//! render, HUD and menu seams reporting through the log.
//!
//! Usage: `panda-run [SETTINGS] [SEED]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use panda_run::consts::*;
    use panda_run::platform::{HudSink, MenuController, RenderSink, dispatch_events, present};
    use panda_run::sim::level::PITS;
    use panda_run::sim::{GameEvent, GamePhase, GameState, Hud, RenderView, TickInput, Viewport, tick};
    use panda_run::{ConfigError, Settings};

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };
    /// Host frames before giving up on a session
    const MAX_HOST_FRAMES: u32 = 60_000;
    /// How far ahead the autopilot looks for trouble
    const LOOKAHEAD: f32 = 60.0;

    #[derive(Parser, Debug)]
    #[command(name = "panda-run")]
    #[command(about = "Headless autoplay session of the Panda Run simulation")]
    pub struct Args {
        /// Settings JSON file; built-in defaults when omitted
        pub settings: Option<PathBuf>,
        /// RNG seed; derived from the clock when omitted
        pub seed: Option<u64>,
    }

    /// Renderer stand-in: counts what would be drawn
    #[derive(Default)]
    struct FrameCounter {
        frames: u64,
    }

    impl RenderSink for FrameCounter {
        fn render(&mut self, view: &RenderView<'_>) {
            self.frames += 1;
            log::trace!(
                "frame {}: camera x={:.1}, {} enemies alive, {} particles",
                self.frames,
                view.camera.x,
                view.enemies.iter().filter(|e| e.alive).count(),
                view.particles.len()
            );
        }
    }

    #[derive(Default)]
    struct LogHud {
        last: Option<Hud>,
    }

    impl HudSink for LogHud {
        fn update_hud(&mut self, hud: &Hud) {
            if self.last.as_ref() != Some(hud) {
                log::debug!(
                    "WORLD {}  SCORE {}  COINS {}  TIME {}  LIVES {}",
                    hud.world,
                    hud.score,
                    hud.coins,
                    hud.time,
                    hud.lives
                );
                self.last = Some(hud.clone());
            }
        }
    }

    #[derive(Default)]
    struct LogMenu {
        finished: bool,
    }

    impl MenuController for LogMenu {
        fn show_menu(&mut self) {
            log::info!("Menu shown");
        }

        fn show_game(&mut self) {
            log::info!("Game shown");
        }

        fn show_game_over(&mut self, won: bool, score: u64, coins: u32, kills: u32) {
            let title = if won { "Level Complete!" } else { "Game Over" };
            log::info!("{title} score={score} coins={coins} kills={kills}");
            self.finished = true;
        }

        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::LifeLost { lives_left } => log::info!("Ouch! {lives_left} lives left"),
                GameEvent::ExtraLife { lives } => log::info!("1-UP! {lives} lives"),
                other => log::trace!("{other:?}"),
            }
        }
    }

    /// Holds right and jumps over enemies and pits
    fn autopilot(state: &GameState) -> TickInput {
        let player = &state.player;
        let front = player.pos.x + player.width;
        let ahead = |x: f32| (0.0..LOOKAHEAD).contains(&(x - front));

        let enemy_ahead = state.enemies.iter().any(|e| e.alive && ahead(e.pos.x));
        let pit_ahead = PITS.iter().any(|&(x, _)| ahead(x));
        TickInput {
            left: false,
            right: true,
            jump: enemy_ahead || pit_ahead,
        }
    }

    /// Fixed-step driver mirroring a windowed host's frame callback
    struct Game {
        state: GameState,
        accumulator: f64,
        renderer: FrameCounter,
        hud: LogHud,
        menu: LogMenu,
    }

    impl Game {
        fn new(seed: u64, settings: &Settings) -> Self {
            Self {
                state: GameState::new(seed, VIEWPORT, settings),
                accumulator: 0.0,
                renderer: FrameCounter::default(),
                hud: LogHud::default(),
                menu: LogMenu::default(),
            }
        }

        /// One host frame of `dt_ms` wall time
        fn update(&mut self, dt_ms: f64) {
            // Cap long stalls
            let dt_ms = dt_ms.min(100.0);
            self.accumulator += dt_ms;

            let mut substeps = 0;
            while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
                let input = autopilot(&self.state);
                tick(&mut self.state, &input, FRAME_MS);
                self.accumulator -= FRAME_MS;
                substeps += 1;
            }

            dispatch_events(&mut self.state, &mut self.menu);
            present(&self.state, &mut self.renderer, &mut self.hud);
        }
    }

    pub fn run(args: Args) -> Result<(), ConfigError> {
        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        log::info!("Seed {seed}, {} quality", settings.quality.as_str());

        let mut game = Game::new(seed, &settings);
        game.state.start_game();

        // Alternating 16/17 ms host frames, roughly 60 Hz
        let mut host_frames = 0;
        while !game.menu.finished && host_frames < MAX_HOST_FRAMES {
            game.update(if host_frames % 3 == 0 { 16.0 } else { 17.0 });
            host_frames += 1;
        }

        if game.state.phase() == GamePhase::Playing {
            log::warn!("Stopped after {host_frames} host frames without finishing");
        }
        log::info!(
            "{} simulated frames over {} host frames",
            game.state.frame,
            game.renderer.frames
        );

        match serde_json::to_string_pretty(&game.state.hud()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode HUD: {e}"),
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    let args = headless::Args::parse();
    log::info!("Panda Run (native, headless) starting...");

    if let Err(e) = headless::run(args) {
        log::error!("{e}");
        eprintln!("panda-run: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the library directly
}
