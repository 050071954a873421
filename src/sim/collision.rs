//! Axis-separated collision resolution between the player and the world
//!
//! The hard requirements live here. Horizontal contact is tested with a
//! non-destructive probe two ticks of run speed ahead, so a movement command
//! can be suppressed before the player ever clips a wall. Vertical contact
//! is resolved after the committed move by snapping to the touched edge.
//! Every test is pixel-mask exact, and at most one damaging or bouncing
//! reaction fires per tick.

use glam::Vec2;

use crate::consts::PLAYER_SPEED;

use super::object::{Reaction, WorldObject};
use super::player::Player;
use super::tick::TickInput;

/// Pixel-exact overlap between the player and an object
fn touches(player: &Player, obj: &WorldObject) -> bool {
    player.mask().overlaps(
        player.rect.pixel_pos(),
        obj.mask(),
        obj.rect().pixel_pos(),
    )
}

/// Probe one horizontal direction without committing the displacement
///
/// Returns the first object the displaced player would overlap. The rect is
/// restored from a saved copy rather than by moving back, so the revert is
/// bit-identical even where `x + dx - dx` would not round-trip in `f32`.
pub fn probe_horizontal(
    player: &mut Player,
    objects: &[WorldObject],
    dx: f32,
) -> Option<usize> {
    let saved = player.rect;
    player.rect.translate(Vec2::new(dx, 0.0));
    let hit = objects.iter().position(|obj| touches(player, obj));
    player.rect = saved;
    hit
}

/// Resolve vertical overlaps after the committed move
///
/// Downward contact snaps the player onto the surface and lands them;
/// upward contact snaps them under the surface and reflects the climb.
/// Every touched object is collected, not just the first.
pub fn resolve_vertical(player: &mut Player, objects: &[WorldObject]) -> Vec<usize> {
    let dy = player.vel.y;
    let mut touched = Vec::new();
    for (index, obj) in objects.iter().enumerate() {
        if !touches(player, obj) {
            continue;
        }
        if dy > 0.0 {
            player.rect.set_bottom(obj.rect().top());
            player.landed();
        } else if dy < 0.0 {
            player.rect.set_top(obj.rect().bottom());
            player.hit_head();
        }
        touched.push(index);
    }
    touched
}

/// One full movement pass: probes, movement commands, vertical resolution,
/// and the single per-tick reaction
///
/// Reaction dispatch walks the left probe result, the right probe result,
/// then the vertical contacts, and stops at the first object that damages
/// or bounces; plain blocks are skipped without consuming the reaction.
pub fn handle_move(player: &mut Player, objects: &mut [WorldObject], input: &TickInput) {
    player.vel.x = 0.0;

    let probe = PLAYER_SPEED * 2.0;
    let left = probe_horizontal(player, objects, -probe);
    let right = probe_horizontal(player, objects, probe);

    if input.move_left && left.is_none() {
        player.run_left(PLAYER_SPEED);
    }
    if input.move_right && right.is_none() {
        player.run_right(PLAYER_SPEED);
    }

    let vertical = resolve_vertical(player, objects);

    for index in left.into_iter().chain(right).chain(vertical) {
        match objects[index].reaction() {
            Reaction::Damage => {
                player.take_hit();
                break;
            }
            Reaction::Bounce => {
                objects[index].trigger_bounce();
                player.bounce();
                break;
            }
            Reaction::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::object::{Block, Fire, Spike, Trampoline};
    use crate::sim::player::PlayerSprites;
    use crate::sim::sprites::AssetBank;
    use proptest::prelude::*;

    fn bank() -> AssetBank {
        AssetBank::untextured()
    }

    fn test_player(bank: &AssetBank, x: f32, y: f32) -> Player {
        let sprites = PlayerSprites::from_set(bank.set("player").unwrap()).unwrap();
        Player::new(Vec2::new(x, y), sprites)
    }

    fn block(bank: &AssetBank, x: f32, y: f32) -> WorldObject {
        let frame = bank
            .set("terrain")
            .unwrap()
            .sheet("grass")
            .unwrap()
            .frame(0)
            .clone();
        WorldObject::Block(Block::new(Vec2::new(x, y), frame))
    }

    #[test]
    fn test_right_probe_detects_wall_ahead() {
        let bank = bank();
        // Player 50 px wide, 6 px short of the block; the 10 px probe
        // reaches it one tick early
        let mut player = test_player(&bank, 40.0, 0.0);
        let objects = vec![block(&bank, 96.0, 0.0)];

        assert_eq!(probe_horizontal(&mut player, &objects, PLAYER_SPEED * 2.0), Some(0));
        assert_eq!(probe_horizontal(&mut player, &objects, -PLAYER_SPEED * 2.0), None);
    }

    #[test]
    fn test_blocked_direction_suppresses_movement() {
        let bank = bank();
        let mut player = test_player(&bank, 40.0, 0.0);
        let mut objects = vec![block(&bank, 96.0, 0.0)];

        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        handle_move(&mut player, &mut objects, &input);
        // No tunneling: the command was dropped, the rect never moved
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.rect.left(), 40.0);

        // The open direction still works
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        handle_move(&mut player, &mut objects, &input);
        assert_eq!(player.vel.x, -PLAYER_SPEED);
    }

    #[test]
    fn test_probe_is_non_destructive() {
        let bank = bank();
        let mut player = test_player(&bank, 40.25, 17.5);
        let objects = vec![block(&bank, 96.0, 0.0)];

        let before = player.rect;
        probe_horizontal(&mut player, &objects, PLAYER_SPEED * 2.0);
        assert_eq!(player.rect, before);
        probe_horizontal(&mut player, &objects, -PLAYER_SPEED * 2.0);
        assert_eq!(player.rect, before);
    }

    #[test]
    fn test_landing_snaps_and_resets() {
        let bank = bank();
        // Bottom starts at 200; a 5 px/tick fall would reach 205, inside
        // the block whose top is at 200
        let mut player = test_player(&bank, 0.0, 150.0);
        player.vel.y = 5.0;
        player.jump_count = 2;
        player.advance();
        assert_eq!(player.rect.bottom(), 205.0);

        let objects = vec![block(&bank, 0.0, 200.0)];
        let touched = resolve_vertical(&mut player, &objects);

        assert_eq!(touched, vec![0]);
        assert_eq!(player.rect.bottom(), 200.0);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.jump_count, 0);
    }

    #[test]
    fn test_head_bump_snaps_and_reflects() {
        let bank = bank();
        let mut player = test_player(&bank, 0.0, 290.0);
        player.vel.y = -8.0;
        player.rect.translate(Vec2::new(0.0, -8.0));

        // Ceiling block whose bottom edge is at 286
        let objects = vec![block(&bank, 0.0, 190.0)];
        let touched = resolve_vertical(&mut player, &objects);

        assert_eq!(touched, vec![0]);
        assert_eq!(player.rect.top(), 286.0);
        assert_eq!(player.vel.y, 8.0);
    }

    #[test]
    fn test_hazard_contact_applies_one_hit() {
        let bank = bank();
        let mut player = test_player(&bank, 0.0, 0.0);
        let mut objects = vec![WorldObject::Fire(
            Fire::new(Vec2::new(20.0, 10.0), bank.set("fire").unwrap()).unwrap(),
        )];
        let health = player.health;

        // Standing in the flame across many ticks costs exactly one heart
        for _ in 0..10 {
            handle_move(&mut player, &mut objects, &TickInput::default());
        }
        assert_eq!(player.health, health - 1);
    }

    #[test]
    fn test_dispatch_stops_at_first_qualifying_object() {
        let bank = bank();
        // Spike on the left probe, trampoline on the right probe: the fixed
        // left-first order reaches the spike and the trampoline never fires
        let mut player = test_player(&bank, 0.0, 0.0);
        let spike_frame = bank
            .set("spikes")
            .unwrap()
            .sheet("idle")
            .unwrap()
            .frame(0)
            .clone();
        let mut objects = vec![
            WorldObject::Trampoline(
                Trampoline::new(Vec2::new(55.0, 10.0), bank.set("trampoline").unwrap()).unwrap(),
            ),
            WorldObject::Spike(Spike::upright(Vec2::new(-64.0, 0.0), spike_frame)),
        ];

        assert_eq!(
            probe_horizontal(&mut player, &objects, -PLAYER_SPEED * 2.0),
            Some(1)
        );
        assert_eq!(
            probe_horizontal(&mut player, &objects, PLAYER_SPEED * 2.0),
            Some(0)
        );

        let health = player.health;
        handle_move(&mut player, &mut objects, &TickInput::default());

        assert_eq!(player.health, health - 1);
        assert!(matches!(&objects[0], WorldObject::Trampoline(t) if !t.is_bouncing()));
    }

    #[test]
    fn test_blocks_do_not_consume_the_reaction() {
        let bank = bank();
        // A block on the left probe, a spike on the right probe: the block
        // is skipped and the spike still stings
        let mut player = test_player(&bank, 100.0, 0.0);
        let spike_frame = bank
            .set("spikes")
            .unwrap()
            .sheet("idle")
            .unwrap()
            .frame(0)
            .clone();
        let mut objects = vec![
            block(&bank, 0.0, 0.0),
            WorldObject::Spike(Spike::upright(Vec2::new(155.0, 0.0), spike_frame)),
        ];

        let health = player.health;
        handle_move(&mut player, &mut objects, &TickInput::default());
        assert_eq!(player.health, health - 1);
    }

    #[test]
    fn test_trampoline_bounce_dispatch() {
        let bank = bank();
        let mut player = test_player(&bank, 0.0, 0.0);
        let mut objects = vec![WorldObject::Trampoline(
            Trampoline::new(Vec2::new(10.0, 48.0), bank.set("trampoline").unwrap()).unwrap(),
        )];

        player.vel.y = 2.0;
        handle_move(&mut player, &mut objects, &TickInput::default());

        assert_eq!(player.vel.y, -TRAMPOLINE_SPEED);
        assert_eq!(player.jump_count, 0);
        assert!(matches!(&objects[0], WorldObject::Trampoline(t) if t.is_bouncing()));
    }

    proptest! {
        /// Whatever the start position and probe distance, the probe leaves
        /// the player rect bit-identical
        #[test]
        fn prop_probe_restores_rect(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            dx in -50.0f32..50.0,
        ) {
            let bank = bank();
            let mut player = test_player(&bank, x, y);
            let objects = vec![block(&bank, 0.0, 0.0), block(&bank, 96.0, 96.0)];

            let before = player.rect;
            probe_horizontal(&mut player, &objects, dx);
            prop_assert_eq!(player.rect, before);
        }
    }
}
