//! Sprite registry and animation bookkeeping
//!
//! Sheet loading and slicing are an external concern. The registry receives
//! ready-made frames (an opaque image handle plus a pixel mask) keyed by
//! sprite-set and animation name, validates every lookup at content-load
//! time, and hands shared frame strips to entity constructors. Because a
//! mask travels with its frame, the displayed sprite and its collision
//! shape can never drift apart.

use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use thiserror::Error;

use super::mask::Mask;

/// Registry integrity errors; all of these are fatal at startup
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("sprite set '{0}' is not loaded")]
    MissingSet(String),
    #[error("sprite set '{set}' has no animation named '{anim}'")]
    MissingAnimation { set: String, anim: String },
    #[error("animation '{anim}' in sprite set '{set}' has no frames")]
    EmptyAnimation { set: String, anim: String },
}

/// Opaque handle to a ready-to-draw image owned by the render side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageHandle(pub u32);

/// One displayable frame: drawable handle, pixel size and collision mask
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: ImageHandle,
    pub size: Vec2,
    pub mask: Rc<Mask>,
}

impl Frame {
    /// Frame whose whole bounding box collides
    pub fn solid(image: ImageHandle, width: u32, height: u32) -> Self {
        Self::from_mask(image, Mask::filled(width, height))
    }

    /// Frame sized after its mask
    pub fn from_mask(image: ImageHandle, mask: Mask) -> Self {
        Self {
            image,
            size: Vec2::new(mask.width() as f32, mask.height() as f32),
            mask: Rc::new(mask),
        }
    }
}

/// A shared, validated frame strip for one animation
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    frames: Rc<[Frame]>,
}

impl SpriteSheet {
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> &Frame {
        &self.frames[index % self.frames.len()]
    }
}

/// All animation strips of one entity kind
#[derive(Debug)]
pub struct SpriteSet {
    name: String,
    anims: HashMap<String, Rc<[Frame]>>,
}

impl SpriteSet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            anims: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, anim: &str, frames: Vec<Frame>) {
        self.anims.insert(anim.to_string(), frames.into());
    }

    /// Resolve one animation strip; missing or empty strips are content
    /// errors, caught here once rather than mid-tick
    pub fn sheet(&self, anim: &str) -> Result<SpriteSheet, ContentError> {
        let frames = self
            .anims
            .get(anim)
            .ok_or_else(|| ContentError::MissingAnimation {
                set: self.name.clone(),
                anim: anim.to_string(),
            })?;
        if frames.is_empty() {
            return Err(ContentError::EmptyAnimation {
                set: self.name.clone(),
                anim: anim.to_string(),
            });
        }
        Ok(SpriteSheet {
            frames: frames.clone(),
        })
    }
}

/// Sprite registry built once at startup and passed to entity constructors
#[derive(Debug, Default)]
pub struct AssetBank {
    sets: HashMap<String, SpriteSet>,
}

impl AssetBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_set(&mut self, set: SpriteSet) {
        self.sets.insert(set.name().to_string(), set);
    }

    pub fn set(&self, name: &str) -> Result<&SpriteSet, ContentError> {
        self.sets
            .get(name)
            .ok_or_else(|| ContentError::MissingSet(name.to_string()))
    }

    /// Placeholder registry with solid rectangular masks at the nominal
    /// sprite dimensions; stands in for the external sheet loader in the
    /// headless binary and in tests
    pub fn untextured() -> Self {
        let mut bank = Self::new();
        let mut next_image = 0u32;
        let mut strip = |count: usize, w: u32, h: u32| -> Vec<Frame> {
            (0..count)
                .map(|_| {
                    let frame = Frame::solid(ImageHandle(next_image), w, h);
                    next_image += 1;
                    frame
                })
                .collect()
        };

        let mut player = SpriteSet::new("player");
        for anim in ["idle", "run", "jump", "double_jump", "fall", "hit"] {
            for facing in ["left", "right"] {
                player.insert(&format!("{anim}_{facing}"), strip(2, 50, 50));
            }
        }
        bank.insert_set(player);

        let mut terrain = SpriteSet::new("terrain");
        terrain.insert("grass", strip(1, 96, 96));
        terrain.insert("dirt", strip(1, 96, 96));
        bank.insert_set(terrain);

        let mut fire = SpriteSet::new("fire");
        fire.insert("on", strip(3, 16, 32));
        fire.insert("off", strip(1, 16, 32));
        bank.insert_set(fire);

        let mut spikes = SpriteSet::new("spikes");
        spikes.insert("idle", strip(1, 64, 64));
        bank.insert_set(spikes);

        let mut trampoline = SpriteSet::new("trampoline");
        trampoline.insert("idle", strip(1, 28, 28));
        trampoline.insert("jump", strip(4, 28, 28));
        bank.insert_set(trampoline);

        let mut rock_head = SpriteSet::new("rock_head");
        rock_head.insert("idle", strip(1, 42, 42));
        rock_head.insert("hit", strip(2, 42, 42));
        bank.insert_set(rock_head);

        bank
    }
}

/// Frame-divisor animation counter
///
/// The frame index advances once every `delay` ticks and wraps at the strip
/// length, so playback speed does not depend on how many frames a strip has.
#[derive(Debug, Clone)]
pub struct Animator {
    counter: u32,
    delay: u32,
}

impl Animator {
    pub fn new(delay: u32) -> Self {
        Self { counter: 0, delay }
    }

    /// Restart the cycle, e.g. when the animation changes meaning
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Index into a strip of `len` frames for this tick, then advance
    pub fn advance(&mut self, len: usize) -> usize {
        let len = len.max(1);
        let index = (self.counter / self.delay) as usize % len;
        self.counter += 1;
        if (self.counter / self.delay) as usize >= len {
            self.counter = 0;
        }
        index
    }
}
