//! Player state and controller
//!
//! Velocity integration with a ramped gravity, the double-jump budget, the
//! damage cooldown window and animation-state derivation live here. How the
//! player interacts with world objects is the collision resolver's job.

use glam::Vec2;

use crate::consts::*;

use super::geom::Rect;
use super::mask::Mask;
use super::sprites::{Animator, ContentError, Frame, SpriteSet, SpriteSheet};

/// Horizontal facing; sprite strips come in mirrored pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    fn suffix(self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// Animation state, derived fresh from physical state every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAnim {
    Idle,
    Run,
    Jump,
    DoubleJump,
    Fall,
    Hit,
}

impl PlayerAnim {
    const ALL: [PlayerAnim; 6] = [
        PlayerAnim::Idle,
        PlayerAnim::Run,
        PlayerAnim::Jump,
        PlayerAnim::DoubleJump,
        PlayerAnim::Fall,
        PlayerAnim::Hit,
    ];

    fn name(self) -> &'static str {
        match self {
            PlayerAnim::Idle => "idle",
            PlayerAnim::Run => "run",
            PlayerAnim::Jump => "jump",
            PlayerAnim::DoubleJump => "double_jump",
            PlayerAnim::Fall => "fall",
            PlayerAnim::Hit => "hit",
        }
    }
}

/// Sprite strips resolved up front for every (animation, facing) pair, so a
/// mismatched sprite-set cannot fail mid-tick
#[derive(Debug, Clone)]
pub struct PlayerSprites {
    sheets: Vec<SpriteSheet>,
}

impl PlayerSprites {
    pub fn from_set(set: &SpriteSet) -> Result<Self, ContentError> {
        let mut sheets = Vec::with_capacity(PlayerAnim::ALL.len() * 2);
        for anim in PlayerAnim::ALL {
            for facing in [Facing::Left, Facing::Right] {
                let name = format!("{}_{}", anim.name(), facing.suffix());
                sheets.push(set.sheet(&name)?);
            }
        }
        Ok(Self { sheets })
    }

    fn sheet(&self, anim: PlayerAnim, facing: Facing) -> &SpriteSheet {
        &self.sheets[anim as usize * 2 + facing as usize]
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Velocity in px per tick; x is commanded, y is integrated
    pub vel: Vec2,
    pub facing: Facing,
    /// Jumps spent since the last landing; capped by the orchestrator
    pub jump_count: u8,
    pub health: u8,
    /// In the post-hit reaction/invulnerability window
    pub hit: bool,
    hit_ticks: u32,
    hit_applied: bool,
    fall_ticks: u32,
    anim: PlayerAnim,
    animator: Animator,
    frame_index: usize,
    frame: Frame,
    sprites: PlayerSprites,
}

impl Player {
    const ANIMATION_DELAY: u32 = 3;

    pub fn new(pos: Vec2, sprites: PlayerSprites) -> Self {
        let facing = Facing::Left;
        let frame = sprites.sheet(PlayerAnim::Idle, facing).frame(0).clone();
        let rect = Rect {
            pos,
            size: frame.size,
        };
        Self {
            rect,
            vel: Vec2::ZERO,
            facing,
            jump_count: 0,
            health: START_HEALTH,
            hit: false,
            hit_ticks: 0,
            hit_applied: false,
            fall_ticks: 0,
            anim: PlayerAnim::Idle,
            animator: Animator::new(Self::ANIMATION_DELAY),
            frame_index: 0,
            frame,
            sprites,
        }
    }

    /// Start a jump; the caller enforces the jump budget
    pub fn jump(&mut self) {
        self.vel.y = -JUMP_SPEED;
        self.animator.reset();
        self.jump_count += 1;
        if self.jump_count == 1 {
            self.fall_ticks = 0;
        }
    }

    /// Trampoline bounce: larger impulse, no jump budget spent
    pub fn bounce(&mut self) {
        self.vel.y = -TRAMPOLINE_SPEED;
        self.animator.reset();
    }

    pub fn run_left(&mut self, speed: f32) {
        self.vel.x = -speed;
        if self.facing != Facing::Left {
            self.facing = Facing::Left;
            self.animator.reset();
        }
    }

    pub fn run_right(&mut self, speed: f32) {
        self.vel.x = speed;
        if self.facing != Facing::Right {
            self.facing = Facing::Right;
            self.animator.reset();
        }
    }

    /// Apply one damage hit unless the current cooldown window has already
    /// absorbed one
    pub fn take_hit(&mut self) {
        self.hit = true;
        if !self.hit_applied {
            self.health = self.health.saturating_sub(1);
            self.hit_applied = true;
            log::debug!("player hit, health now {}", self.health);
        }
    }

    /// Landing on a surface ends the fall and refunds the jump budget
    pub fn landed(&mut self) {
        self.fall_ticks = 0;
        self.vel.y = 0.0;
        self.jump_count = 0;
    }

    /// Bumping a ceiling reflects the residual upward velocity
    pub fn hit_head(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Integrate one tick: ramped gravity, the committed move, the hit
    /// timer, and the sprite for the resulting state
    pub fn advance(&mut self) {
        let ramp = (self.fall_ticks as f32 / TICK_RATE as f32).min(1.0);
        self.vel.y += GRAVITY * ramp;
        self.rect.translate(self.vel);

        if self.hit {
            self.hit_ticks += 1;
        }
        if self.hit_ticks > HIT_COOLDOWN_TICKS {
            self.hit = false;
            self.hit_ticks = 0;
            self.hit_applied = false;
        }

        self.fall_ticks += 1;
        self.update_sprite();
    }

    fn derive_anim(&self) -> PlayerAnim {
        if self.hit {
            PlayerAnim::Hit
        } else if self.vel.y < 0.0 {
            match self.jump_count {
                1 => PlayerAnim::Jump,
                2 => PlayerAnim::DoubleJump,
                // A trampoline bounce from the ground ascends with the
                // jump budget untouched
                _ => PlayerAnim::Idle,
            }
        } else if self.vel.y > FALL_SPRITE_THRESHOLD {
            PlayerAnim::Fall
        } else if self.vel.x != 0.0 {
            PlayerAnim::Run
        } else {
            PlayerAnim::Idle
        }
    }

    fn update_sprite(&mut self) {
        self.anim = self.derive_anim();
        let sheet = self.sprites.sheet(self.anim, self.facing);
        self.frame_index = self.animator.advance(sheet.len());
        self.frame = sheet.frame(self.frame_index).clone();
        self.rect.size = self.frame.size;
    }

    pub fn anim(&self) -> PlayerAnim {
        self.anim
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn mask(&self) -> &Mask {
        &self.frame.mask
    }
}
