//! Full sessions driven through the public API, the way a host scene would.
use std::cell::RefCell;
use std::rc::Rc;

use wave_rider::audio::SoundEffect;
use wave_rider::sim::{
    ClipLibrary, GameContent, GameEvent, GamePhase, Level, TickInput, WaveGame, tick,
};
use wave_rider::{DebugFlags, DifficultyParameters, GameConfig, LaunchParameters};

/// One shark sitting on the floor of the course
const SHARK_MAP: &str = r#"{
    "layers": [
        {"type": "objectgroup", "objects": [
            {"type": "enemy_03", "x": 700, "y": 340}
        ]}
    ]
}"#;

fn new_game(config: GameConfig, map: &str) -> WaveGame {
    let level = Level::from_tiled_json(map).unwrap();
    let mut game = WaveGame::new(config, &level, Rc::new(ClipLibrary::standard()));
    game.init();
    game
}

fn record(game: &mut WaveGame) -> Rc<RefCell<Vec<GameEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    game.events().subscribe(move |e| sink.borrow_mut().push(*e));
    log
}

fn run(game: &mut WaveGame, input: &TickInput) -> usize {
    let mut frames = 0;
    while game.phase() != GamePhase::Finished {
        tick(game, input);
        frames += 1;
        assert!(frames < 5000, "session never finished");
    }
    frames
}

// ── Collision flow ───────────────────────────────────────────────────────────

/// Riding the floor runs straight into the shark.
#[test]
fn floor_rider_hits_shark() {
    let mut game = new_game(GameConfig::default(), SHARK_MAP);
    let log = record(&mut game);
    game.show_content();
    game.start_game();

    let idle = TickInput::default();
    while !log.borrow().contains(&GameEvent::Miss) {
        tick(&mut game, &idle);
        assert!(game.score() < 2000, "never collided");
    }

    let events = log.borrow();
    let miss_at = events.iter().position(|e| *e == GameEvent::Miss).unwrap();
    assert_eq!(
        &events[miss_at - 2..=miss_at],
        &[
            GameEvent::Sound(SoundEffect::Shark),
            GameEvent::Sound(SoundEffect::Miss),
            GameEvent::Miss
        ]
    );
    // Shark hitbox reaches the player once the world has scrolled past 1090px
    assert!(game.obstacles().scrolled_pixels() > 1090);
    assert_eq!(game.phase(), GamePhase::MissResolving);
}

/// Collision checks can be switched off for development.
#[test]
fn collision_disabled_session_never_misses() {
    let config = GameConfig {
        time_limit: 10,
        debug: DebugFlags {
            collision_disabled: true,
            ..DebugFlags::default()
        },
        ..GameConfig::default()
    };
    let mut game = new_game(config, SHARK_MAP);
    let log = record(&mut game);
    game.show_content();
    game.start_game();
    let frames = run(&mut game, &TickInput::default());

    assert_eq!(frames, 300);
    assert!(!log.borrow().contains(&GameEvent::Miss));
    // 300 frames at 16/3 px
    assert_eq!(game.score(), 1600);
    assert_eq!(log.borrow().last(), Some(&GameEvent::TimeUp { score: 1600 }));
}

// ── Launch parameters ────────────────────────────────────────────────────────

/// Casual launch parameters pick the start offset from the difficulty tiers.
#[test]
fn difficulty_tier_moves_start_line() {
    let params = LaunchParameters::from_json(
        r#"{"nicowari": false, "difficulty": 5, "gameTimeLimit": 3}"#,
    )
    .unwrap();
    let tiers = DifficultyParameters::from_json(
        r#"{"difficultyParameterList": [
            {"minimumDifficulty": 1, "startPixel": 0},
            {"minimumDifficulty": 5, "startPixel": 1000}
        ]}"#,
    )
    .unwrap();
    let config = GameConfig::resolve(&params, &tiers, DebugFlags::default());
    assert_eq!(config.start_pixel, 1000);

    let mut game = new_game(config, SHARK_MAP);
    let log = record(&mut game);
    game.show_content();
    assert_eq!(game.obstacles().live_obstacles().count(), 1);
    game.start_game();

    for _ in 0..30 {
        tick(&mut game, &TickInput::default());
    }
    assert!(log.borrow().contains(&GameEvent::Miss));
    // Distance excludes the start offset
    assert!(game.score() < 100);
}

// ── Session reuse ────────────────────────────────────────────────────────────

/// The same instance runs two identical sessions back to back.
#[test]
fn sessions_are_repeatable() {
    let config = GameConfig {
        time_limit: 8,
        random_seed: Some(11),
        ..GameConfig::default()
    };
    let mut game = new_game(config, SHARK_MAP);
    let autoplay = TickInput {
        idle_mode: true,
        ..TickInput::default()
    };

    let mut results = Vec::new();
    for _ in 0..2 {
        game.show_content();
        game.start_game();
        let frames = run(&mut game, &autoplay);
        results.push((frames, game.score()));
        game.hide_content();
    }
    assert_eq!(results[0], results[1]);
    assert!(results[0].1 > 0);
}

/// Touches outside a running game are left to the host.
#[test]
fn touches_pass_through_outside_game() {
    let mut game = new_game(GameConfig::default(), SHARK_MAP);
    game.show_content();
    assert!(game.on_touch_down());
    game.start_game();
    assert!(!game.on_touch_down());
    assert!(!game.on_touch_up());
}
