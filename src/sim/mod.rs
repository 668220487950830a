//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Integer scroll accounting
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod events;
pub mod game;
pub mod level;
pub mod obstacles;
pub mod placement;
pub mod pool;
pub mod scroll;
pub mod state;
pub mod tick;
pub mod timer;
pub mod wave;

pub use animation::{AnimationSource, Animator, Clip, ClipLibrary, ClipPlayer, clips};
pub use collision::{Rect, hits_any};
pub use events::{EventBus, GameEvent, Subscription};
pub use game::{GameContent, WaveGame};
pub use level::Level;
pub use obstacles::ObstacleManager;
pub use placement::{LandmarkPlacement, ObstacleKind, ObstaclePlacement, Placement, PlacementIndex};
pub use pool::{LiveEntityPool, LiveLandmark, LiveObstacle};
pub use scroll::{FixedPointScroller, MapLoop, ScrollRates, ScrollStep};
pub use state::{GamePhase, GameSnapshot, PcPhase, PlayerState, WavePhase};
pub use tick::{TickInput, tick};
pub use timer::CountdownTimer;
pub use wave::WaveManager;
