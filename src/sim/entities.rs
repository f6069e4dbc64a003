//! Entity model
//!
//! Passive game objects that own their position, velocity and per-type
//! state. Each exposes a per-tick `update`; anything that needs to know about
//! other entities (scoring, spawning, audio) is left to the caller.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::Color;
use crate::consts::*;

/// Timed paddle modifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleEffect {
    /// Wider paddle
    Grow,
    /// Paddle can fire lasers
    Laser,
    /// Balls stick to the paddle until launched
    Glue,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Horizontal speed (pixels per tick)
    pub speed: f32,
    pub has_laser: bool,
    pub laser_charges: u32,
    /// Balls touching the paddle get glued to it
    pub is_sticky: bool,
    /// Remaining ticks per effect (0 = inactive)
    pub grow_ticks: u32,
    pub laser_ticks: u32,
    pub glue_ticks: u32,
}

impl Paddle {
    /// Default-size paddle centered near the bottom of the screen
    pub fn new(bounds: Vec2) -> Self {
        let rect = Rect::new(
            (bounds.x - PADDLE_WIDTH) / 2.0,
            bounds.y - PADDLE_BOTTOM_MARGIN - PADDLE_HEIGHT,
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
        );
        Self {
            rect,
            speed: PADDLE_SPEED,
            has_laser: false,
            laser_charges: 0,
            is_sticky: false,
            grow_ticks: 0,
            laser_ticks: 0,
            glue_ticks: 0,
        }
    }

    /// Back to default size and position with every effect cleared
    pub fn reset(&mut self, bounds: Vec2) {
        *self = Self::new(bounds);
    }

    /// Move by `direction` (-1 left, +1 right), clamp to the screen and
    /// count down active effects
    pub fn update(&mut self, direction: f32, bounds: Vec2) {
        self.rect.pos.x += direction.clamp(-1.0, 1.0) * self.speed;
        self.clamp_to(bounds);

        if self.grow_ticks > 0 {
            self.grow_ticks -= 1;
            if self.grow_ticks == 0 {
                self.set_width(PADDLE_WIDTH, bounds);
            }
        }
        if self.laser_ticks > 0 {
            self.laser_ticks -= 1;
            if self.laser_ticks == 0 {
                self.disarm_laser();
            }
        }
        if self.glue_ticks > 0 {
            self.glue_ticks -= 1;
            if self.glue_ticks == 0 {
                self.is_sticky = false;
            }
        }
    }

    /// Start (or restart) a timed effect
    pub fn activate(&mut self, effect: PaddleEffect, bounds: Vec2) {
        match effect {
            PaddleEffect::Grow => {
                self.set_width(PADDLE_WIDTH * PADDLE_GROW_FACTOR, bounds);
                self.grow_ticks = EFFECT_DURATION_TICKS;
            }
            PaddleEffect::Laser => {
                self.has_laser = true;
                self.laser_charges = LASER_CHARGES;
                self.laser_ticks = EFFECT_DURATION_TICKS;
            }
            PaddleEffect::Glue => {
                self.is_sticky = true;
                self.glue_ticks = EFFECT_DURATION_TICKS;
            }
        }
    }

    /// Fire one beam from the paddle center, spending a charge.
    /// Running out of charges ends the laser effect.
    pub fn fire_laser(&mut self) -> Option<Laser> {
        if !self.has_laser || self.laser_charges == 0 {
            return None;
        }
        self.laser_charges -= 1;
        let laser = Laser::new(self.rect.center().x, self.rect.top());
        if self.laser_charges == 0 {
            self.disarm_laser();
        }
        Some(laser)
    }

    /// Fire two beams offset either side of center. Spends no charge.
    pub fn fire_spread(&self) -> Option<[Laser; 2]> {
        if !self.has_laser {
            return None;
        }
        let cx = self.rect.center().x;
        let top = self.rect.top();
        Some([
            Laser::new(cx - LASER_SPREAD_OFFSET, top),
            Laser::new(cx + LASER_SPREAD_OFFSET, top),
        ])
    }

    fn disarm_laser(&mut self) {
        self.has_laser = false;
        self.laser_charges = 0;
        self.laser_ticks = 0;
    }

    /// Resize around the current center
    fn set_width(&mut self, width: f32, bounds: Vec2) {
        let center = self.rect.center();
        self.rect.size.x = width;
        self.rect.set_center(center);
        self.clamp_to(bounds);
    }

    fn clamp_to(&mut self, bounds: Vec2) {
        let max_x = (bounds.x - self.rect.size.x).max(0.0);
        self.rect.pos.x = self.rect.pos.x.clamp(0.0, max_x);
    }
}

/// Surface a ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Wall,
    Paddle,
}

/// What happened to a ball during its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    Continuing,
    /// Passed the bottom boundary
    Lost,
    Bounced(Surface),
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Base velocity (pixels per tick), before the slow effect is applied
    pub speed_x: f32,
    pub speed_y: f32,
    /// Stuck to the paddle, waiting for launch
    pub is_glued: bool,
    /// Horizontal offset from paddle center while glued
    pub glue_offset: f32,
    /// Remaining ticks of the slow effect
    pub slow_ticks: u32,
}

impl Ball {
    /// A fresh ball glued to the middle of the paddle
    pub fn on_paddle(paddle: &Paddle) -> Self {
        let mut ball = Self {
            rect: Rect::new(0.0, 0.0, BALL_SIZE, BALL_SIZE),
            speed_x: 0.0,
            speed_y: 0.0,
            is_glued: true,
            glue_offset: 0.0,
            slow_ticks: 0,
        };
        ball.pin_to(paddle);
        ball
    }

    /// A free-moving ball centered at `center`
    pub fn free(center: Vec2, speed_x: f32, speed_y: f32) -> Self {
        Self {
            rect: Rect::from_center(center, Vec2::splat(BALL_SIZE)),
            speed_x,
            speed_y,
            is_glued: false,
            glue_offset: 0.0,
            slow_ticks: 0,
        }
    }

    /// Effective displacement per tick
    pub fn velocity(&self) -> Vec2 {
        let v = Vec2::new(self.speed_x, self.speed_y);
        if self.slow_ticks > 0 { v * BALL_SLOW_FACTOR } else { v }
    }

    /// Release from the paddle, heading up and away from the paddle center
    pub fn launch(&mut self) {
        if !self.is_glued {
            return;
        }
        self.is_glued = false;
        let dir = if self.glue_offset < 0.0 { -1.0 } else { 1.0 };
        self.speed_x = dir * BALL_LAUNCH_SPEED_X;
        self.speed_y = -BALL_LAUNCH_SPEED_Y;
    }

    /// Start (or restart) the slow effect
    pub fn activate_slow(&mut self) {
        self.slow_ticks = EFFECT_DURATION_TICKS;
    }

    /// Advance one tick. Wall and paddle bounces are resolved here.
    pub fn update(&mut self, paddle: &Paddle, bounds: Vec2) -> BallOutcome {
        if self.slow_ticks > 0 {
            self.slow_ticks -= 1;
        }

        if self.is_glued {
            self.pin_to(paddle);
            return BallOutcome::Continuing;
        }

        self.rect.pos += self.velocity();
        let mut outcome = BallOutcome::Continuing;

        // --- Side and top walls ---
        if self.rect.left() <= 0.0 {
            self.rect.pos.x = 0.0;
            self.speed_x = self.speed_x.abs();
            outcome = BallOutcome::Bounced(Surface::Wall);
        } else if self.rect.right() >= bounds.x {
            self.rect.pos.x = bounds.x - self.rect.size.x;
            self.speed_x = -self.speed_x.abs();
            outcome = BallOutcome::Bounced(Surface::Wall);
        }
        if self.rect.top() <= 0.0 {
            self.rect.pos.y = 0.0;
            self.speed_y = self.speed_y.abs();
            outcome = BallOutcome::Bounced(Surface::Wall);
        }

        if self.rect.top() >= bounds.y {
            return BallOutcome::Lost;
        }

        // --- Paddle (only while falling) ---
        if self.speed_y > 0.0 && self.rect.overlaps(&paddle.rect) {
            let paddle_center = paddle.rect.center().x;
            let offset = self.rect.center().x - paddle_center;
            if paddle.is_sticky {
                self.is_glued = true;
                self.glue_offset = offset;
                self.pin_to(paddle);
            } else {
                // Edge hits steer the ball outward
                let half = paddle.rect.size.x / 2.0;
                let hit = (offset / half).clamp(-1.0, 1.0);
                let max_x = BALL_LAUNCH_SPEED_X * 2.0;
                self.speed_x = (self.speed_x + hit * PADDLE_ENGLISH).clamp(-max_x, max_x);
                self.speed_y = -self.speed_y.abs();
                self.rect.pos.y = paddle.rect.top() - self.rect.size.y;
            }
            outcome = BallOutcome::Bounced(Surface::Paddle);
        }

        outcome
    }

    /// Sit on top of the paddle at the current glue offset
    fn pin_to(&mut self, paddle: &Paddle) {
        let half = paddle.rect.size.x / 2.0;
        self.glue_offset = self.glue_offset.clamp(-half, half);
        let center = Vec2::new(
            paddle.rect.center().x + self.glue_offset,
            paddle.rect.top() - self.rect.size.y / 2.0,
        );
        self.rect.set_center(center);
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub rect: Rect,
    pub color: Color,
}

/// A laser beam travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub rect: Rect,
    pub speed_y: f32,
}

impl Laser {
    /// Beam centered on `center_x` with its bottom at `bottom`
    pub fn new(center_x: f32, bottom: f32) -> Self {
        Self {
            rect: Rect::new(
                center_x - LASER_WIDTH / 2.0,
                bottom - LASER_HEIGHT,
                LASER_WIDTH,
                LASER_HEIGHT,
            ),
            speed_y: -LASER_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.rect.pos.y += self.speed_y;
    }

    /// Fully above the top boundary
    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() < 0.0
    }
}

/// Particle motion ranges for a burst
#[derive(Debug, Clone, Copy)]
pub struct BurstStyle {
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
}

/// Bounce sparks
pub const BOUNCE_STYLE: BurstStyle = BurstStyle {
    min_speed: 1.0,
    max_speed: 3.0,
    min_size: 1.0,
    max_size: 3.0,
    gravity: 0.0,
};

/// Brick broken by a ball
pub const BRICK_STYLE: BurstStyle = BurstStyle {
    min_speed: 1.0,
    max_speed: 4.0,
    min_size: 1.0,
    max_size: 4.0,
    gravity: 0.05,
};

/// Brick broken by a laser
pub const LASER_STYLE: BurstStyle = BurstStyle {
    min_speed: 1.0,
    max_speed: 3.0,
    min_size: 1.0,
    max_size: 3.0,
    gravity: 0.05,
};

/// Firework shell
pub const FIREWORK_STYLE: BurstStyle = BurstStyle {
    min_speed: 1.0,
    max_speed: 5.0,
    min_size: 2.0,
    max_size: 4.0,
    gravity: 0.05,
};

/// A cosmetic particle. Shrinks every tick and dies at size zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub size: f32,
    pub gravity: f32,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, color: Color, style: BurstStyle, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(style.min_speed..=style.max_speed);
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            size: rng.random_range(style.min_size..=style.max_size),
            gravity: style.gravity,
        }
    }

    /// Push `count` particles at `pos`
    pub fn burst<R: Rng + ?Sized>(
        out: &mut Vec<Particle>,
        pos: Vec2,
        color: Color,
        count: usize,
        style: BurstStyle,
        rng: &mut R,
    ) {
        out.extend((0..count).map(|_| Particle::new(pos, color, style, rng)));
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.size -= PARTICLE_SHRINK_RATE;
    }

    pub fn is_dead(&self) -> bool {
        self.size <= 0.0
    }
}

const FIREWORK_COLORS: [Color; 6] = [
    [255, 80, 80],
    [255, 200, 60],
    [120, 255, 120],
    [100, 180, 255],
    [220, 120, 255],
    [255, 255, 255],
];

/// Win screen decoration: a shell that bursts into sparks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firework {
    pub pos: Vec2,
    pub sparks: Vec<Particle>,
}

impl Firework {
    /// Burst at a random point in the upper half of the screen
    pub fn new<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Self {
        let pos = Vec2::new(
            rng.random_range(bounds.x * 0.1..bounds.x * 0.9),
            rng.random_range(bounds.y * 0.1..bounds.y * 0.5),
        );
        let color = FIREWORK_COLORS[rng.random_range(0..FIREWORK_COLORS.len())];
        let mut sparks = Vec::with_capacity(FIREWORK_SPARKS);
        Particle::burst(&mut sparks, pos, color, FIREWORK_SPARKS, FIREWORK_STYLE, rng);
        Self { pos, sparks }
    }

    pub fn update(&mut self) {
        for spark in &mut self.sparks {
            spark.update();
        }
        self.sparks.retain(|s| !s.is_dead());
    }

    pub fn is_dead(&self) -> bool {
        self.sparks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bounds() -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_paddle_clamped_to_screen() {
        let mut paddle = Paddle::new(bounds());
        for _ in 0..200 {
            paddle.update(-1.0, bounds());
        }
        assert_eq!(paddle.rect.left(), 0.0);
        for _ in 0..200 {
            paddle.update(1.0, bounds());
        }
        assert_eq!(paddle.rect.right(), SCREEN_WIDTH);
    }

    #[test]
    fn test_grow_reverts_on_expiry() {
        let mut paddle = Paddle::new(bounds());
        let center = paddle.rect.center();
        paddle.activate(PaddleEffect::Grow, bounds());
        assert_eq!(paddle.rect.size.x, PADDLE_WIDTH * PADDLE_GROW_FACTOR);
        assert_eq!(paddle.rect.center(), center);

        for _ in 0..EFFECT_DURATION_TICKS - 1 {
            paddle.update(0.0, bounds());
        }
        assert_eq!(paddle.rect.size.x, PADDLE_WIDTH * PADDLE_GROW_FACTOR);
        paddle.update(0.0, bounds());
        assert_eq!(paddle.rect.size.x, PADDLE_WIDTH);
        assert_eq!(paddle.grow_ticks, 0);
    }

    #[test]
    fn test_reactivation_restarts_timer() {
        let mut paddle = Paddle::new(bounds());
        paddle.activate(PaddleEffect::Glue, bounds());
        for _ in 0..100 {
            paddle.update(0.0, bounds());
        }
        paddle.activate(PaddleEffect::Glue, bounds());
        assert_eq!(paddle.glue_ticks, EFFECT_DURATION_TICKS);
        assert!(paddle.is_sticky);
    }

    #[test]
    fn test_laser_charges() {
        let mut paddle = Paddle::new(bounds());
        assert!(paddle.fire_laser().is_none());
        assert!(paddle.fire_spread().is_none());

        paddle.activate(PaddleEffect::Laser, bounds());
        assert!(paddle.fire_laser().is_some());
        assert_eq!(paddle.laser_charges, LASER_CHARGES - 1);

        let [left, right] = paddle.fire_spread().unwrap();
        assert_eq!(paddle.laser_charges, LASER_CHARGES - 1);
        let cx = paddle.rect.center().x;
        assert_eq!(left.rect.center().x, cx - LASER_SPREAD_OFFSET);
        assert_eq!(right.rect.center().x, cx + LASER_SPREAD_OFFSET);
    }

    #[test]
    fn test_last_charge_disarms() {
        let mut paddle = Paddle::new(bounds());
        paddle.activate(PaddleEffect::Laser, bounds());
        for _ in 0..LASER_CHARGES {
            assert!(paddle.fire_laser().is_some());
        }
        assert!(!paddle.has_laser);
        assert!(paddle.fire_laser().is_none());
    }

    #[test]
    fn test_glued_ball_follows_paddle() {
        let mut paddle = Paddle::new(bounds());
        let mut ball = Ball::on_paddle(&paddle);
        for _ in 0..10 {
            paddle.update(1.0, bounds());
            assert_eq!(ball.update(&paddle, bounds()), BallOutcome::Continuing);
        }
        assert_eq!(ball.rect.center().x, paddle.rect.center().x);
        assert_eq!(ball.rect.bottom(), paddle.rect.top());
    }

    #[test]
    fn test_launch_moves_up() {
        let paddle = Paddle::new(bounds());
        let mut ball = Ball::on_paddle(&paddle);
        ball.launch();
        assert!(!ball.is_glued);
        let y = ball.rect.top();
        ball.update(&paddle, bounds());
        assert!(ball.rect.top() < y);
    }

    #[test]
    fn test_wall_bounce() {
        let paddle = Paddle::new(bounds());
        let mut ball = Ball::free(Vec2::new(10.0, 300.0), -5.0, 1.0);
        let outcome = ball.update(&paddle, bounds());
        assert_eq!(outcome, BallOutcome::Bounced(Surface::Wall));
        assert!(ball.speed_x > 0.0);

        let mut ball = Ball::free(Vec2::new(400.0, 8.0), 0.0, -5.0);
        assert_eq!(ball.update(&paddle, bounds()), BallOutcome::Bounced(Surface::Wall));
        assert!(ball.speed_y > 0.0);
    }

    #[test]
    fn test_paddle_bounce() {
        let paddle = Paddle::new(bounds());
        let above = Vec2::new(paddle.rect.center().x, paddle.rect.top() - 4.0);
        let mut ball = Ball::free(above, 0.0, 5.0);
        assert_eq!(ball.update(&paddle, bounds()), BallOutcome::Bounced(Surface::Paddle));
        assert!(ball.speed_y < 0.0);
        assert_eq!(ball.rect.bottom(), paddle.rect.top());
    }

    #[test]
    fn test_sticky_paddle_catches_ball() {
        let mut paddle = Paddle::new(bounds());
        paddle.activate(PaddleEffect::Glue, bounds());
        let above = Vec2::new(paddle.rect.center().x + 20.0, paddle.rect.top() - 4.0);
        let mut ball = Ball::free(above, 2.0, 5.0);
        assert_eq!(ball.update(&paddle, bounds()), BallOutcome::Bounced(Surface::Paddle));
        assert!(ball.is_glued);
        ball.launch();
        assert!(ball.speed_x > 0.0 && ball.speed_y < 0.0);
    }

    #[test]
    fn test_ball_lost_below_screen() {
        let paddle = Paddle::new(bounds());
        let mut ball = Ball::free(Vec2::new(50.0, SCREEN_HEIGHT + 2.0), 0.0, 5.0);
        assert_eq!(ball.update(&paddle, bounds()), BallOutcome::Lost);
    }

    #[test]
    fn test_ball_lost_when_top_reaches_bottom_edge() {
        let paddle = Paddle::new(bounds());
        let half = BALL_SIZE / 2.0;

        // Top edge lands one pixel short of the boundary
        let mut ball = Ball::free(Vec2::new(50.0, SCREEN_HEIGHT - 6.0 + half), 0.0, 5.0);
        assert_eq!(ball.update(&paddle, bounds()), BallOutcome::Continuing);
        assert_eq!(ball.rect.top(), SCREEN_HEIGHT - 1.0);

        // Top edge lands exactly on the boundary
        let mut ball = Ball::free(Vec2::new(50.0, SCREEN_HEIGHT - 5.0 + half), 0.0, 5.0);
        assert_eq!(ball.update(&paddle, bounds()), BallOutcome::Lost);
    }

    #[test]
    fn test_slow_scales_velocity_and_expires() {
        let mut ball = Ball::free(Vec2::new(400.0, 300.0), 4.0, -5.0);
        ball.activate_slow();
        assert_eq!(ball.velocity(), Vec2::new(4.0, -5.0) * BALL_SLOW_FACTOR);
        ball.slow_ticks = 1;
        let paddle = Paddle::new(bounds());
        ball.update(&paddle, bounds());
        assert_eq!(ball.velocity(), Vec2::new(4.0, -5.0));
    }

    #[test]
    fn test_laser_leaves_top() {
        let mut laser = Laser::new(100.0, 15.0);
        assert!(!laser.is_off_screen());
        laser.update();
        laser.update();
        assert!(laser.is_off_screen());
    }

    #[test]
    fn test_particles_shrink_to_death() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        Particle::burst(&mut particles, Vec2::ZERO, BOUNCE_COLOR, 5, BOUNCE_STYLE, &mut rng);
        assert_eq!(particles.len(), 5);
        for _ in 0..31 {
            for p in &mut particles {
                p.update();
            }
        }
        assert!(particles.iter().all(Particle::is_dead));
    }

    #[test]
    fn test_firework_dies() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut fw = Firework::new(bounds(), &mut rng);
        assert!(!fw.is_dead());
        assert!(fw.pos.y < SCREEN_HEIGHT * 0.5);
        for _ in 0..41 {
            fw.update();
        }
        assert!(fw.is_dead());
    }
}
