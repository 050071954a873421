//! World objects and their per-kind state machines
//!
//! Everything the player can touch is one `WorldObject` variant sharing a
//! rect + mask contract. Blocks and spikes are inert after creation; fire,
//! trampolines and rock heads advance their own machines once per tick,
//! after the collision pass.

use std::rc::Rc;

use glam::Vec2;

use crate::consts::TICK_RATE;

use super::geom::Rect;
use super::mask::Mask;
use super::player::Player;
use super::sprites::{Animator, ContentError, Frame, SpriteSet, SpriteSheet};

/// Kind tag, for render ordering and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Block,
    Fire,
    Spike,
    Trampoline,
    RockHead,
}

/// How the collision resolver reacts to touching an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Plain surface: stand on it, bump into it
    None,
    /// Hazard contact: one damage hit
    Damage,
    /// Trampoline: bounce animation plus a large upward impulse
    Bounce,
}

/// Position and collision shape of a solid body, snapshotted once per tick
/// for falling traps to land on
#[derive(Debug, Clone)]
pub struct SolidBody {
    pub rect: Rect,
    pub mask: Rc<Mask>,
}

/// Terrain block; immutable after creation
#[derive(Debug, Clone)]
pub struct Block {
    rect: Rect,
    frame: Frame,
}

impl Block {
    pub fn new(pos: Vec2, frame: Frame) -> Self {
        let rect = Rect {
            pos,
            size: frame.size,
        };
        Self { rect, frame }
    }
}

/// Spike orientation, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikeDir {
    Up,
    Down,
}

/// Static spike; inverted spikes reuse the upright art rotated a half turn
#[derive(Debug, Clone)]
pub struct Spike {
    rect: Rect,
    frame: Frame,
    pub dir: SpikeDir,
}

impl Spike {
    pub fn upright(pos: Vec2, frame: Frame) -> Self {
        let rect = Rect {
            pos,
            size: frame.size,
        };
        Self {
            rect,
            frame,
            dir: SpikeDir::Up,
        }
    }

    pub fn inverted(pos: Vec2, frame: Frame) -> Self {
        let mask = frame.mask.rotated_180();
        let frame = Frame {
            image: frame.image,
            size: frame.size,
            mask: Rc::new(mask),
        };
        let rect = Rect {
            pos,
            size: frame.size,
        };
        Self {
            rect,
            frame,
            dir: SpikeDir::Down,
        }
    }
}

/// Looping two-state flame; harms through the resolver only
#[derive(Debug, Clone)]
pub struct Fire {
    rect: Rect,
    on: SpriteSheet,
    off: SpriteSheet,
    lit: bool,
    animator: Animator,
    frame: Frame,
}

impl Fire {
    const ANIMATION_DELAY: u32 = 6;

    /// Fires spawn lit
    pub fn new(pos: Vec2, set: &SpriteSet) -> Result<Self, ContentError> {
        let on = set.sheet("on")?;
        let off = set.sheet("off")?;
        let frame = on.frame(0).clone();
        let rect = Rect {
            pos,
            size: frame.size,
        };
        Ok(Self {
            rect,
            on,
            off,
            lit: true,
            animator: Animator::new(Self::ANIMATION_DELAY),
            frame,
        })
    }

    pub fn set_on(&mut self) {
        self.lit = true;
    }

    pub fn set_off(&mut self) {
        self.lit = false;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn update(&mut self) {
        let sheet = if self.lit { &self.on } else { &self.off };
        let index = self.animator.advance(sheet.len());
        self.frame = sheet.frame(index).clone();
        self.rect.size = self.frame.size;
    }
}

/// Trampoline: idle until bounced on, then plays its jump animation for a
/// fixed stretch before rearming
#[derive(Debug, Clone)]
pub struct Trampoline {
    rect: Rect,
    idle: SpriteSheet,
    jump: SpriteSheet,
    bouncing: bool,
    bounce_ticks: u32,
    animator: Animator,
    frame: Frame,
}

impl Trampoline {
    const ANIMATION_DELAY: u32 = 6;
    /// How long the bounce animation plays before reverting to idle
    const BOUNCE_TICKS: u32 = TICK_RATE / 2;

    pub fn new(pos: Vec2, set: &SpriteSet) -> Result<Self, ContentError> {
        let idle = set.sheet("idle")?;
        let jump = set.sheet("jump")?;
        let frame = idle.frame(0).clone();
        let rect = Rect {
            pos,
            size: frame.size,
        };
        Ok(Self {
            rect,
            idle,
            jump,
            bouncing: false,
            bounce_ticks: 0,
            animator: Animator::new(Self::ANIMATION_DELAY),
            frame,
        })
    }

    /// Start the bounce animation; ignored while one is already playing
    pub fn trigger(&mut self) {
        if !self.bouncing {
            self.bouncing = true;
            self.animator.reset();
        }
    }

    pub fn is_bouncing(&self) -> bool {
        self.bouncing
    }

    fn update(&mut self) {
        let sheet = if self.bouncing { &self.jump } else { &self.idle };
        let index = self.animator.advance(sheet.len());
        self.frame = sheet.frame(index).clone();
        self.rect.size = self.frame.size;

        if self.bouncing {
            self.bounce_ticks += 1;
            if self.bounce_ticks > Self::BOUNCE_TICKS {
                self.bouncing = false;
                self.bounce_ticks = 0;
            }
        }
    }
}

/// Crushing-trap states; a closed cycle with no terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RockHeadState {
    Idle,
    Falling,
    Smashed,
    Resetting,
}

/// Ambush trap: hangs in place until the player walks beneath it, crashes
/// down, rests, then winches itself back up to its spawn height
#[derive(Debug, Clone)]
pub struct RockHead {
    rect: Rect,
    origin_y: f32,
    state: RockHeadState,
    fall_vel: f32,
    reset_ticks: u32,
    trigger_zone: Rect,
    idle: SpriteSheet,
    smashed: SpriteSheet,
    smashed_art: bool,
    animator: Animator,
    frame: Frame,
}

impl RockHead {
    const ANIMATION_DELAY: u32 = 10;
    /// Downward acceleration while falling, px/tick²
    const FALL_ACCEL: f32 = 1.0;
    /// Rest time on the ground before rising again
    const RESET_DELAY_TICKS: u32 = TICK_RATE / 2;
    /// Upward travel per tick while resetting
    const RISE_STEP: f32 = 3.0;
    /// Trigger region height, in multiples of the trap's own height
    const TRIGGER_REACH: f32 = 5.0;

    pub fn new(pos: Vec2, set: &SpriteSet) -> Result<Self, ContentError> {
        let idle = set.sheet("idle")?;
        let smashed = set.sheet("hit")?;
        let frame = idle.frame(0).clone();
        let rect = Rect {
            pos,
            size: frame.size,
        };
        let trigger_zone = Rect::new(
            rect.left(),
            rect.bottom(),
            rect.size.x,
            rect.size.y * Self::TRIGGER_REACH,
        );
        Ok(Self {
            rect,
            origin_y: pos.y,
            state: RockHeadState::Idle,
            fall_vel: 0.0,
            reset_ticks: 0,
            trigger_zone,
            idle,
            smashed,
            smashed_art: false,
            animator: Animator::new(Self::ANIMATION_DELAY),
            frame,
        })
    }

    pub fn state(&self) -> RockHeadState {
        self.state
    }

    fn update(&mut self, player: &mut Player, solids: &[SolidBody]) {
        let sheet = if self.smashed_art {
            &self.smashed
        } else {
            &self.idle
        };
        let index = self.animator.advance(sheet.len());
        self.frame = sheet.frame(index).clone();
        self.rect.size = self.frame.size;

        match self.state {
            RockHeadState::Idle => {
                // The trigger region tracks the trap's current position
                self.trigger_zone = Rect::new(
                    self.rect.left(),
                    self.rect.bottom(),
                    self.rect.size.x,
                    self.rect.size.y * Self::TRIGGER_REACH,
                );
                if player.rect.intersects(&self.trigger_zone) {
                    self.state = RockHeadState::Falling;
                    log::debug!("rock head triggered at y {}", self.rect.top());
                }
            }
            RockHeadState::Falling => {
                self.rect.pos.y += self.fall_vel;
                self.fall_vel += Self::FALL_ACCEL;

                if self.fall_vel > 0.0
                    && self.frame.mask.overlaps(
                        self.rect.pixel_pos(),
                        player.mask(),
                        player.rect.pixel_pos(),
                    )
                {
                    player.take_hit();
                }

                if self.fall_vel > 0.0 {
                    for solid in solids {
                        if self.frame.mask.overlaps(
                            self.rect.pixel_pos(),
                            &solid.mask,
                            solid.rect.pixel_pos(),
                        ) {
                            self.rect.set_bottom(solid.rect.top());
                            self.fall_vel = 0.0;
                            self.state = RockHeadState::Smashed;
                            self.smashed_art = true;
                            break;
                        }
                    }
                }
            }
            RockHeadState::Smashed => {
                self.reset_ticks += 1;
                if self.reset_ticks >= Self::RESET_DELAY_TICKS {
                    self.state = RockHeadState::Resetting;
                }
            }
            RockHeadState::Resetting => {
                self.fall_vel = 0.0;
                self.reset_ticks = 0;
                self.smashed_art = false;
                if self.rect.pos.y > self.origin_y {
                    // Clamp so the cycle closes at exactly the spawn height
                    self.rect.pos.y = (self.rect.pos.y - Self::RISE_STEP).max(self.origin_y);
                } else {
                    self.state = RockHeadState::Idle;
                }
            }
        }
    }
}

/// Polymorphism point for everything placeable in a level
#[derive(Debug, Clone)]
pub enum WorldObject {
    Block(Block),
    Fire(Fire),
    Spike(Spike),
    Trampoline(Trampoline),
    RockHead(RockHead),
}

impl WorldObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            WorldObject::Block(_) => ObjectKind::Block,
            WorldObject::Fire(_) => ObjectKind::Fire,
            WorldObject::Spike(_) => ObjectKind::Spike,
            WorldObject::Trampoline(_) => ObjectKind::Trampoline,
            WorldObject::RockHead(_) => ObjectKind::RockHead,
        }
    }

    pub fn rect(&self) -> &Rect {
        match self {
            WorldObject::Block(b) => &b.rect,
            WorldObject::Fire(f) => &f.rect,
            WorldObject::Spike(s) => &s.rect,
            WorldObject::Trampoline(t) => &t.rect,
            WorldObject::RockHead(r) => &r.rect,
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            WorldObject::Block(b) => &b.frame,
            WorldObject::Fire(f) => &f.frame,
            WorldObject::Spike(s) => &s.frame,
            WorldObject::Trampoline(t) => &t.frame,
            WorldObject::RockHead(r) => &r.frame,
        }
    }

    pub fn mask(&self) -> &Mask {
        &self.frame().mask
    }

    /// Reaction category used by the resolver's dispatch. Rock heads are
    /// inert here: standing on one is safe, their damage comes from their
    /// own falling update.
    pub fn reaction(&self) -> Reaction {
        match self {
            WorldObject::Fire(_) | WorldObject::Spike(_) => Reaction::Damage,
            WorldObject::Trampoline(_) => Reaction::Bounce,
            WorldObject::Block(_) | WorldObject::RockHead(_) => Reaction::None,
        }
    }

    /// Per-tick behavior; the inert kinds have none
    pub fn update(&mut self, player: &mut Player, solids: &[SolidBody]) {
        match self {
            WorldObject::Block(_) | WorldObject::Spike(_) => {}
            WorldObject::Fire(f) => f.update(),
            WorldObject::Trampoline(t) => t.update(),
            WorldObject::RockHead(r) => r.update(player, solids),
        }
    }

    /// Start the bounce animation, if this is a trampoline
    pub fn trigger_bounce(&mut self) {
        if let WorldObject::Trampoline(t) = self {
            t.trigger();
        }
    }

    /// Whether a falling rock head can land on this object; fires and other
    /// rock heads do not block hazards
    fn is_landing_surface(&self) -> bool {
        !matches!(self, WorldObject::Fire(_) | WorldObject::RockHead(_))
    }
}

/// Snapshot of every body a falling trap can land on
pub fn solid_bodies(objects: &[WorldObject]) -> Vec<SolidBody> {
    objects
        .iter()
        .filter(|obj| obj.is_landing_surface())
        .map(|obj| SolidBody {
            rect: *obj.rect(),
            mask: obj.frame().mask.clone(),
        })
        .collect()
}
