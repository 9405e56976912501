//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Ticks take the host's frame delta (1.0 per frame at 60 fps)
//! - Seeded RNG only
//! - Stable iteration order (pool index)
//! - No rendering or platform dependencies beyond the `InputSource` trait

pub mod collision;
pub mod events;
pub mod gameplay;
pub mod geometry;
pub mod player;
pub mod scene;
pub mod snack;
pub mod sprite;

pub use collision::{Aabb, Rect, point_in_range};
pub use events::{BusEvent, EventBus, ListenerId};
pub use gameplay::{GameplayEvent, GameplayEventKind, GameplayManager, GameplayState};
pub use geometry::Vector2;
pub use player::{AnimationKey, AnimationMeta, Facing, Player};
pub use scene::{MainScene, SceneCommand};
pub use snack::{DropZone, Snack, SnackEvent, SnackManager, SnackState};
pub use sprite::SpriteView;
