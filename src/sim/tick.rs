//! Fixed timestep simulation tick
//!
//! One call advances a session by one frame: touches first, then the game
//! update, then the frame's events are dispatched.

use rand::Rng;

use super::events::GameEvent;
use super::game::{GameContent, WaveGame};
use super::state::{GamePhase, WavePhase};

/// Chance per frame that the autopilot skips a tap it wanted to make
const IDLE_HESITATION: f64 = 0.15;
/// The autopilot keeps the wave below this scroll factor before tapping again
const IDLE_TARGET_FACTOR: f32 = 0.9;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touch pressed this frame
    pub touch_down: bool,
    /// Touch released this frame
    pub touch_up: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the session by one frame and return the events it raised
pub fn tick(game: &mut WaveGame, input: &TickInput) -> Vec<GameEvent> {
    let mut input = input.clone();
    if input.idle_mode && game.phase() == GamePhase::Playing {
        let tap = autopilot_wants_tap(game);
        input.touch_down = tap;
        input.touch_up = !tap;
    }

    if input.touch_down {
        game.on_touch_down();
    }
    if input.touch_up {
        game.on_touch_up();
    }
    game.on_update();
    game.events().dispatch()
}

/// Keep the wave surging around the crest, with some human-like hesitation
fn autopilot_wants_tap(game: &mut WaveGame) -> bool {
    let player = game.wave().snapshot();
    if !player.touchable {
        return false;
    }
    let wants = player.wave_phase != WavePhase::Up && player.scroll_factor < IDLE_TARGET_FACTOR;
    wants && !game.rng_mut().random_bool(IDLE_HESITATION)
}
