//! Dead-zone scroll controller
//!
//! The camera holds still while the player moves inside the viewport's
//! dead-zone and follows their velocity once they push past a margin while
//! still heading outward. The level never scrolls left of its start.

use glam::Vec2;

use super::geom::Rect;
use super::player::Player;

/// Camera offset subtracted from every draw position
#[derive(Debug, Clone)]
pub struct Camera {
    pub offset: Vec2,
    viewport: Vec2,
    margin: f32,
}

impl Camera {
    pub fn new(viewport_w: f32, viewport_h: f32, margin: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport: Vec2::new(viewport_w, viewport_h),
            margin,
        }
    }

    /// Start with the given rect centered in the viewport
    pub fn center_on(&mut self, rect: &Rect) {
        self.offset = rect.pos - self.viewport / 2.0;
    }

    /// Follow the player once they cross the dead-zone boundary while still
    /// moving further in that direction
    pub fn follow(&mut self, player: &Player) {
        let rect = &player.rect;
        if (rect.right() - self.offset.x >= self.viewport.x - self.margin && player.vel.x > 0.0)
            || (rect.left() - self.offset.x <= self.margin && player.vel.x < 0.0)
        {
            self.offset.x += player.vel.x;
        }
        if (rect.bottom() - self.offset.y >= self.viewport.y - self.margin && player.vel.y > 0.0)
            || (rect.top() - self.offset.y <= self.margin && player.vel.y < 0.0)
        {
            self.offset.y += player.vel.y;
        }

        self.offset.x = self.offset.x.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::PlayerSprites;
    use crate::sim::sprites::AssetBank;

    fn test_player(x: f32, y: f32) -> Player {
        let bank = AssetBank::untextured();
        let sprites = PlayerSprites::from_set(bank.set("player").unwrap()).unwrap();
        Player::new(Vec2::new(x, y), sprites)
    }

    #[test]
    fn test_holds_inside_dead_zone() {
        let mut camera = Camera::new(1000.0, 800.0, 200.0);
        let mut player = test_player(400.0, 400.0);
        player.vel.x = 5.0;

        camera.follow(&player);
        assert_eq!(camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_scrolls_when_pushing_the_margin() {
        let mut camera = Camera::new(1000.0, 800.0, 200.0);
        let mut player = test_player(760.0, 400.0);
        player.vel.x = 5.0;

        camera.follow(&player);
        assert_eq!(camera.offset.x, 5.0);

        // Standing at the margin without outward velocity holds steady
        player.vel.x = 0.0;
        camera.follow(&player);
        assert_eq!(camera.offset.x, 5.0);
    }

    #[test]
    fn test_horizontal_offset_clamped_at_level_start() {
        let mut camera = Camera::new(1000.0, 800.0, 200.0);
        let mut player = test_player(100.0, 400.0);
        player.vel.x = -5.0;

        for _ in 0..10 {
            camera.follow(&player);
        }
        assert_eq!(camera.offset.x, 0.0);
    }

    #[test]
    fn test_vertical_scroll_follows_falls() {
        let mut camera = Camera::new(1000.0, 800.0, 200.0);
        let mut player = test_player(400.0, 580.0);
        player.vel.y = 6.0;

        camera.follow(&player);
        assert_eq!(camera.offset.y, 6.0);
    }

    #[test]
    fn test_center_on_spawn() {
        let mut camera = Camera::new(1000.0, 800.0, 200.0);
        let player = test_player(1200.0, 900.0);
        camera.center_on(&player.rect);
        assert_eq!(camera.offset, Vec2::new(700.0, 500.0));
    }
}
