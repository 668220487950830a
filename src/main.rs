//! Wave Rider entry point
//!
//! Runs one headless session in autoplay mode and reports the distance.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::rc::Rc;

    use clap::Parser;
    use wave_rider::consts::FPS;
    use wave_rider::sim::{
        ClipLibrary, GameContent, GameEvent, GamePhase, Level, TickInput, WaveGame, tick,
    };
    use wave_rider::{DebugFlags, DifficultyParameters, GameConfig, LaunchParameters, LoadError};

    #[derive(Parser, Debug)]
    #[command(name = "wave-rider")]
    #[command(about = "Play one headless Wave Rider session in autoplay mode")]
    pub struct Args {
        /// Tiled map JSON with the obstacle placements (seeded demo course if omitted)
        #[arg(long)]
        level: Option<PathBuf>,
        /// Launch parameters JSON
        #[arg(long)]
        params: Option<PathBuf>,
        /// Difficulty tier list JSON
        #[arg(long)]
        difficulty: Option<PathBuf>,
        /// Random seed for autoplay and the demo course
        #[arg(long)]
        seed: Option<u64>,
        /// Never report collisions
        #[arg(long)]
        no_collision: bool,
        /// Holding the touch keeps the wave rising
        #[arg(long)]
        hold_to_up: bool,
    }

    impl Args {
        fn debug_flags(&self) -> DebugFlags {
            DebugFlags {
                collision_disabled: self.no_collision,
                hold_to_up: self.hold_to_up,
            }
        }
    }

    fn load_session(args: &Args) -> Result<(GameConfig, Level), LoadError> {
        let mut params = match &args.params {
            Some(path) => LaunchParameters::load(path)?,
            None => LaunchParameters::default(),
        };
        if args.seed.is_some() {
            params.random_seed = args.seed;
        }
        let difficulty = match &args.difficulty {
            Some(path) => DifficultyParameters::load(path)?,
            None => DifficultyParameters::default(),
        };
        let mut config = GameConfig::resolve(&params, &difficulty, args.debug_flags());
        if config.random_seed.is_none() {
            config.random_seed = args.seed;
        }

        let level = match &args.level {
            Some(path) => Level::load(path)?,
            None => Level::demo(config.random_seed.unwrap_or(0)),
        };
        Ok((config, level))
    }

    pub fn run(args: Args) -> ExitCode {
        let (config, level) = match load_session(&args) {
            Ok(session) => session,
            Err(err) => {
                log::error!("{err}");
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        };

        let muted = config.mute_audio;
        let time_limit = config.time_limit;

        let mut game = WaveGame::new(config, &level, Rc::new(ClipLibrary::standard()));
        game.events().subscribe(move |event| match event {
            GameEvent::Sound(effect) if !muted => log::debug!("Play {}", effect.asset_name()),
            GameEvent::TimeCaution => log::info!("Time is running out"),
            GameEvent::Miss => log::info!("Crashed"),
            _ => {}
        });

        game.init();
        game.show_content();
        game.start_game();

        let input = TickInput {
            idle_mode: true,
            ..TickInput::default()
        };
        // Misses can defer the end by a few seconds at most
        let frame_guard = (time_limit + 10) * FPS;
        let mut misses = 0;
        let mut frames = 0;
        while game.phase() != GamePhase::Finished && frames < frame_guard {
            misses += tick(&mut game, &input)
                .iter()
                .filter(|e| **e == GameEvent::Miss)
                .count();
            frames += 1;
        }
        game.hide_content();

        if game.phase() != GamePhase::Finished {
            log::error!("Session did not finish within {frames} frames");
            return ExitCode::FAILURE;
        }
        log::info!("Session finished after {frames} frames with {misses} misses");
        println!("{}m", game.score());
        ExitCode::SUCCESS
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Wave Rider (headless) starting...");
    headless::run(clap::Parser::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library; there is no standalone web entry point
}
