//! Deterministic simulation module
//!
//! All gameplay logic lives here, advanced one fixed tick at a time by a
//! single thread:
//! - Fixed timestep only
//! - No rendering, windowing or file I/O
//! - Collaborators feed inputs in and read finished state out at tick
//!   boundaries

pub mod camera;
pub mod collision;
pub mod geom;
pub mod mask;
pub mod object;
pub mod player;
pub mod sprites;
pub mod tick;

pub use camera::Camera;
pub use geom::Rect;
pub use mask::Mask;
pub use object::{
    Block, Fire, ObjectKind, Reaction, RockHead, RockHeadState, SolidBody, Spike, SpikeDir,
    Trampoline, WorldObject, solid_bodies,
};
pub use player::{Facing, Player, PlayerAnim, PlayerSprites};
pub use sprites::{
    Animator, AssetBank, ContentError, Frame, ImageHandle, SpriteSet, SpriteSheet,
};
pub use tick::{GameState, TickInput, TickOutcome, tick};
