//! Level instantiation from grid symbols
//!
//! The level source (an external parser) hands over rows of single-character
//! symbols, top row first; this module turns them into a populated
//! [`GameState`]. Cells are `BLOCK_SIZE` squares and every kind spawns with
//! its own fixed in-cell offset. Unrecognized symbols are ignored.

use glam::Vec2;
use thiserror::Error;

use crate::consts::BLOCK_SIZE;
use crate::settings::Settings;
use crate::sim::{
    AssetBank, Block, Camera, ContentError, Fire, GameState, Player, PlayerSprites, RockHead,
    Spike, Trampoline, WorldObject,
};

/// Fatal level-instantiation failures
#[derive(Debug, Error)]
pub enum LevelError {
    /// No `P` marker anywhere in the grid; there is nothing to simulate
    #[error("level grid has no player spawn marker")]
    MissingPlayer,
    #[error(transparent)]
    Content(#[from] ContentError),
}

// In-cell spawn offsets, px
const FIRE_OFFSET: Vec2 = Vec2::new(48.0, 32.0);
const SPIKE_UP_OFFSET: Vec2 = Vec2::new(24.0, 32.0);
const TRAMPOLINE_OFFSET: Vec2 = Vec2::new(16.0, 40.0);
const ROCK_HEAD_OFFSET: Vec2 = Vec2::new(0.0, 40.0);

/// Build a ready-to-run [`GameState`] from parsed level rows
///
/// The camera starts centered on the player spawn. An empty grid is
/// tolerated by the simulation itself, but the missing player makes it a
/// startup error here.
pub fn build_level<S: AsRef<str>>(
    rows: &[S],
    assets: &AssetBank,
    settings: &Settings,
) -> Result<GameState, LevelError> {
    let mut objects = Vec::new();
    let mut player = None;

    for (row, line) in rows.iter().enumerate() {
        for (col, symbol) in line.as_ref().chars().enumerate() {
            let cell = Vec2::new(col as f32 * BLOCK_SIZE, row as f32 * BLOCK_SIZE);
            match symbol {
                'X' => {
                    let frame = assets.set("terrain")?.sheet("grass")?.frame(0).clone();
                    objects.push(WorldObject::Block(Block::new(cell, frame)));
                }
                'D' => {
                    let frame = assets.set("terrain")?.sheet("dirt")?.frame(0).clone();
                    objects.push(WorldObject::Block(Block::new(cell, frame)));
                }
                'P' => {
                    let sprites = PlayerSprites::from_set(assets.set("player")?)?;
                    player = Some(Player::new(cell, sprites));
                }
                'F' => {
                    let fire = Fire::new(cell + FIRE_OFFSET, assets.set("fire")?)?;
                    objects.push(WorldObject::Fire(fire));
                }
                'S' => {
                    let frame = assets.set("spikes")?.sheet("idle")?.frame(0).clone();
                    objects.push(WorldObject::Spike(Spike::upright(
                        cell + SPIKE_UP_OFFSET,
                        frame,
                    )));
                }
                's' => {
                    let frame = assets.set("spikes")?.sheet("idle")?.frame(0).clone();
                    objects.push(WorldObject::Spike(Spike::inverted(cell, frame)));
                }
                'T' => {
                    let tramp =
                        Trampoline::new(cell + TRAMPOLINE_OFFSET, assets.set("trampoline")?)?;
                    objects.push(WorldObject::Trampoline(tramp));
                }
                'R' => {
                    let rock = RockHead::new(cell + ROCK_HEAD_OFFSET, assets.set("rock_head")?)?;
                    objects.push(WorldObject::RockHead(rock));
                }
                _ => {}
            }
        }
    }

    let player = player.ok_or(LevelError::MissingPlayer)?;

    let mut camera = Camera::new(
        settings.window_width as f32,
        settings.window_height as f32,
        settings.scroll_margin as f32,
    );
    camera.center_on(&player.rect);

    log::info!(
        "level instantiated: {} objects, player at {},{}",
        objects.len(),
        player.rect.left(),
        player.rect.top()
    );

    Ok(GameState {
        player,
        objects,
        camera,
        time_ticks: 0,
    })
}
