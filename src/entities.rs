/// All moving things on the playfield, with their per-tick behavior.
///
/// Entities carry `f32` pixel positions and advance by `dt` seconds, so the
/// simulation is frame-rate independent.  Anything random about an entity
/// (drift direction, park height, shot jitter) is rolled once at
/// construction; `advance` itself is deterministic.

use rand::Rng;

use crate::config::*;
use crate::difficulty::DifficultyProfile;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box; `x`/`y` is the top-left corner.
/// Overlap is strict, so boxes that merely touch edges do not collide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn center(&self) -> (f32, f32) {
        (self.center_x(), self.center_y())
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Directional input sampled once per tick.  The ship fires on its own, so
/// there is no shoot flag.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub lives: u32,
    /// Current upgrade level, 0 ..= PLAYER_MAX_POWER.
    pub power_level: u32,
    /// Expiry timestamps (session-clock ms) of the active power-up stacks,
    /// ascending.  Always exactly `power_level` entries long.
    pub powerup_timers: Vec<f64>,
    /// True while the ship is off the field after losing a life.
    pub hidden: bool,
    pub hidden_since: f64,
    pub last_shot: f64,
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            y: HEIGHT - PLAYER_BOTTOM_MARGIN - PLAYER_HEIGHT,
            lives: PLAYER_LIVES,
            power_level: 0,
            powerup_timers: Vec::new(),
            hidden: false,
            hidden_since: 0.0,
            last_shot: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Movement speed in px/s, including the per-power bonus.
    pub fn speed(&self) -> f32 {
        PLAYER_SPEED + self.power_level as f32 * PLAYER_POWER_SPEED_BONUS
    }

    /// Current delay between volleys in ms; shrinks as power grows.
    pub fn shoot_delay(&self) -> f64 {
        PLAYER_SHOOT_DELAY / (1.0 + self.power_level as f64 * 0.2)
    }

    /// Move for one tick and expire finished power-up stacks.  A hidden
    /// ship ignores input and only waits out its respawn timer.
    pub fn advance(&mut self, dt: f32, input: &InputState, now: f64) {
        if self.hidden {
            if now - self.hidden_since >= PLAYER_HIDE_MS {
                self.respawn();
            }
            return;
        }

        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.left {
            dx -= 1.0;
        }
        if input.right {
            dx += 1.0;
        }
        if input.up {
            dy -= 1.0;
        }
        if input.down {
            dy += 1.0;
        }
        // Diagonals cover the same ground per second as straight lines.
        if dx != 0.0 && dy != 0.0 {
            dx *= std::f32::consts::FRAC_1_SQRT_2;
            dy *= std::f32::consts::FRAC_1_SQRT_2;
        }
        self.x = (self.x + dx * self.speed() * dt).clamp(0.0, WIDTH - PLAYER_WIDTH);
        // The ship is confined to the lower half of the field.
        self.y = (self.y + dy * self.speed() * dt).clamp(HEIGHT / 2.0, HEIGHT - PLAYER_HEIGHT);

        let before = self.powerup_timers.len();
        self.powerup_timers.retain(|&expiry| now < expiry);
        let expired = (before - self.powerup_timers.len()) as u32;
        self.power_level = self.power_level.saturating_sub(expired);
    }

    /// Emit a volley if the shot timer has elapsed.  Power 0 fires one
    /// center shot, power 1 two wing shots, power 2+ all three.
    pub fn try_fire(&mut self, now: f64) -> Vec<Bullet> {
        if self.hidden || now - self.last_shot <= self.shoot_delay() {
            return Vec::new();
        }
        self.last_shot = now;
        let b = self.bounds();
        match self.power_level {
            0 => vec![Bullet::new(b.center_x(), b.top())],
            1 => vec![
                Bullet::new(b.left() + 5.0, b.center_y()),
                Bullet::new(b.right() - 5.0, b.center_y()),
            ],
            _ => vec![
                Bullet::new(b.left() + 5.0, b.center_y()),
                Bullet::new(b.center_x(), b.top()),
                Bullet::new(b.right() - 5.0, b.center_y()),
            ],
        }
    }

    /// Pick up one power-up stack.  Below the cap this raises the power
    /// level; at the cap it replaces the stack closest to expiring.
    pub fn collect_powerup(&mut self, now: f64) {
        if self.hidden {
            return;
        }
        if self.power_level < PLAYER_MAX_POWER {
            self.power_level += 1;
        } else if !self.powerup_timers.is_empty() {
            self.powerup_timers.remove(0);
        } else {
            return;
        }
        self.powerup_timers.push(now + POWERUP_DURATION);
        self.powerup_timers.sort_by(f64::total_cmp);
    }

    /// Park the ship off the field after losing a life.
    pub fn hide(&mut self, now: f64) {
        self.hidden = true;
        self.hidden_since = now;
        self.x = WIDTH / 2.0 - PLAYER_WIDTH / 2.0;
        self.y = HEIGHT + 200.0;
    }

    /// Put the ship back at the default spawn point.
    pub fn respawn(&mut self) {
        self.hidden = false;
        self.x = WIDTH / 2.0 - PLAYER_WIDTH / 2.0;
        self.y = HEIGHT - PLAYER_BOTTOM_MARGIN - PLAYER_HEIGHT;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Falls straight down.
    Basic,
    /// Falls while drifting sideways, bouncing off the field edges.
    Zigzag,
    /// Falls slowly, parks at a rolled height and fires downward.
    Shooter,
}

impl EnemyKind {
    /// Parse a catalog name.  Unknown names spawn as `Basic` rather than
    /// failing the level.
    pub fn parse(name: &str) -> Self {
        match name {
            "basic" => EnemyKind::Basic,
            "zigzag" => EnemyKind::Zigzag,
            "shooter" => EnemyKind::Shooter,
            _ => EnemyKind::Basic,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    /// Fall speed in px/s with difficulty and ramp multipliers baked in.
    pub vel_y: f32,
    /// Sideways drift in px/s; zero for everything but zigzags.
    pub vel_x: f32,
    /// Height at which a shooter parks, rolled once at spawn.
    pub stop_at: f32,
    pub stopped: bool,
    /// Interval between volleys in ms, jittered per enemy at spawn.
    pub shoot_delay: f64,
    pub last_shot: f64,
    pub alive: bool,
}

impl Enemy {
    pub fn new(
        kind: EnemyKind,
        x: f32,
        y: f32,
        profile: &DifficultyProfile,
        ramp_mult: f32,
        now: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let mut vel_y = ENEMY_FALL_SPEED * profile.enemy_speed_mult * ramp_mult;
        let mut vel_x = 0.0;
        let mut stop_at = 0.0;
        match kind {
            EnemyKind::Basic => {}
            EnemyKind::Zigzag => {
                let dir = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                vel_x = dir * ZIGZAG_DRIFT_SPEED * profile.enemy_speed_mult;
            }
            EnemyKind::Shooter => {
                vel_y *= SHOOTER_SPEED_FACTOR;
                stop_at = rng.gen_range(SHOOTER_STOP_MIN..SHOOTER_STOP_MAX);
            }
        }
        let jitter = rng.gen_range(-ENEMY_SHOOT_JITTER..ENEMY_SHOOT_JITTER);
        Enemy {
            kind,
            x,
            y,
            vel_y,
            vel_x,
            stop_at,
            stopped: false,
            shoot_delay: (ENEMY_SHOOT_DELAY + jitter) * profile.enemy_shoot_delay_mult,
            last_shot: now,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn advance(&mut self, dt: f32) {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        match self.kind {
            EnemyKind::Basic => {}
            EnemyKind::Zigzag => {
                if self.x < 0.0 || self.x + ENEMY_WIDTH > WIDTH {
                    self.vel_x = -self.vel_x;
                }
            }
            EnemyKind::Shooter => {
                // Parks for good the first time it passes its stop height.
                if !self.stopped && self.y > self.stop_at {
                    self.stopped = true;
                    self.vel_y = 0.0;
                }
            }
        }
    }

    /// True once the whole sprite has left the field, with a little slack
    /// past each edge.
    pub fn off_field(&self) -> bool {
        self.y > HEIGHT + ENEMY_BOTTOM_SLACK
            || self.x + ENEMY_WIDTH < -ENEMY_SIDE_SLACK
            || self.x > WIDTH + ENEMY_SIDE_SLACK
    }

    /// Shooters fire once parked and on-screen; other kinds never do.
    pub fn try_fire(&mut self, now: f64, profile: &DifficultyProfile) -> Option<EnemyBullet> {
        if self.kind != EnemyKind::Shooter || !self.stopped {
            return None;
        }
        if self.y + ENEMY_HEIGHT <= 0.0 {
            return None;
        }
        if now - self.last_shot <= self.shoot_delay {
            return None;
        }
        self.last_shot = now;
        let b = self.bounds();
        Some(EnemyBullet::new(b.center_x(), b.bottom(), profile))
    }
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossKind {
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    Final,
}

impl BossKind {
    /// Parse a catalog name, falling back to the tamest boss.
    pub fn parse(name: &str) -> Self {
        match name {
            "level1_boss" => BossKind::Level1,
            "level2_boss" => BossKind::Level2,
            "level3_boss" => BossKind::Level3,
            "level4_boss" => BossKind::Level4,
            "level5_boss" => BossKind::Level5,
            "final_boss" => BossKind::Final,
            _ => BossKind::Level1,
        }
    }

    /// Base delay between volleys in ms.
    fn shoot_delay(self) -> f64 {
        match self {
            BossKind::Level1 => 1000.0,
            BossKind::Level2 => 750.0,
            BossKind::Level3 => 900.0,
            BossKind::Level4 => 600.0,
            BossKind::Level5 => 700.0,
            BossKind::Final => 500.0,
        }
    }

    fn health_factor(self) -> f32 {
        match self {
            BossKind::Level5 => 1.5,
            BossKind::Final => 2.0,
            _ => 1.0,
        }
    }

    fn speed_factor(self) -> f32 {
        match self {
            BossKind::Level3 => 1.2,
            _ => 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub kind: BossKind,
    pub x: f32,
    pub y: f32,
    /// Signed patrol speed in px/s; the sign flips on wall contact.
    pub vel_x: f32,
    /// Entry descent speed in px/s, zeroed once the boss is in position.
    pub vel_y: f32,
    pub health: f32,
    pub max_health: f32,
    /// False while the boss is still descending into view.
    pub entry_done: bool,
    pub shoot_delay: f64,
    pub last_shot: f64,
    pub alive: bool,
}

impl Boss {
    pub fn new(
        level: u32,
        kind: BossKind,
        profile: &DifficultyProfile,
        now: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let health =
            BOSS_HEALTH_BASE * level as f32 * kind.health_factor() * profile.boss_health_mult;
        let dir = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        Boss {
            kind,
            x: WIDTH / 2.0 - BOSS_WIDTH / 2.0,
            y: -BOSS_HEIGHT * 2.0,
            vel_x: dir
                * BOSS_PATROL_FACTOR
                * BOSS_SPEED
                * kind.speed_factor()
                * profile.boss_speed_mult,
            vel_y: BOSS_SPEED * profile.boss_speed_mult,
            health,
            max_health: health,
            entry_done: false,
            shoot_delay: kind.shoot_delay() * profile.boss_shoot_delay_mult,
            last_shot: now,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BOSS_WIDTH, BOSS_HEIGHT)
    }

    /// Descend into position, then patrol between the side margins.
    pub fn advance(&mut self, dt: f32) {
        if !self.entry_done {
            self.y += self.vel_y * dt;
            if self.y >= BOSS_ENTRY_Y {
                self.y = BOSS_ENTRY_Y;
                self.vel_y = 0.0;
                self.entry_done = true;
            }
            return;
        }
        self.x += self.vel_x * dt;
        if self.x < BOSS_PATROL_MARGIN {
            self.x = BOSS_PATROL_MARGIN;
            self.vel_x = -self.vel_x;
        } else if self.x + BOSS_WIDTH > WIDTH - BOSS_PATROL_MARGIN {
            self.x = WIDTH - BOSS_PATROL_MARGIN - BOSS_WIDTH;
            self.vel_x = -self.vel_x;
        }
    }

    /// Emit this kind's volley if in position and off cooldown.
    pub fn try_fire(&mut self, now: f64, profile: &DifficultyProfile) -> Vec<EnemyBullet> {
        if !self.entry_done || now - self.last_shot <= self.shoot_delay {
            return Vec::new();
        }
        self.last_shot = now;
        let b = self.bounds();
        match self.kind {
            BossKind::Level2 => vec![
                EnemyBullet::new(b.left() + 10.0, b.bottom(), profile),
                EnemyBullet::new(b.right() - 10.0, b.bottom(), profile),
            ],
            BossKind::Final => vec![
                EnemyBullet::new(b.left() + 10.0, b.center_y(), profile),
                EnemyBullet::new(b.center_x(), b.bottom(), profile),
                EnemyBullet::new(b.right() - 10.0, b.center_y(), profile),
            ],
            _ => vec![EnemyBullet::new(b.center_x(), b.bottom(), profile)],
        }
    }

    /// Apply damage, clamping health at zero.  Returns true exactly once,
    /// on the hit that defeats the boss.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
            return true;
        }
        false
    }
}

// ── Projectiles & pickups ─────────────────────────────────────────────────────

/// A player shot travelling straight up.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
}

impl Bullet {
    /// Spawn at a muzzle given as center-x plus bottom edge.
    pub fn new(center_x: f32, bottom: f32) -> Self {
        Bullet {
            x: center_x - BULLET_WIDTH / 2.0,
            y: bottom - BULLET_HEIGHT,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn advance(&mut self, dt: f32) {
        self.y -= BULLET_SPEED * dt;
        if self.y + BULLET_HEIGHT < 0.0 {
            self.alive = false;
        }
    }
}

/// A hostile shot travelling straight down.
#[derive(Clone, Debug)]
pub struct EnemyBullet {
    pub x: f32,
    pub y: f32,
    /// Fall speed in px/s with the difficulty multiplier baked in.
    pub vel_y: f32,
    pub alive: bool,
}

impl EnemyBullet {
    /// Spawn at a muzzle given as center-x plus top edge.
    pub fn new(center_x: f32, top: f32, profile: &DifficultyProfile) -> Self {
        EnemyBullet {
            x: center_x - ENEMY_BULLET_WIDTH / 2.0,
            y: top,
            vel_y: BULLET_SPEED * ENEMY_BULLET_SPEED_FACTOR * profile.enemy_bullet_speed_mult,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT)
    }

    pub fn advance(&mut self, dt: f32) {
        self.y += self.vel_y * dt;
        if self.y > HEIGHT {
            self.alive = false;
        }
    }
}

/// A falling upgrade dropped by a destroyed enemy.
#[derive(Clone, Debug)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
}

impl PowerUp {
    pub fn new(center: (f32, f32)) -> Self {
        PowerUp {
            x: center.0 - POWERUP_WIDTH / 2.0,
            y: center.1 - POWERUP_HEIGHT / 2.0,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, POWERUP_WIDTH, POWERUP_HEIGHT)
    }

    pub fn advance(&mut self, dt: f32) {
        self.y += POWERUP_FALL_SPEED * dt;
        if self.y > HEIGHT {
            self.alive = false;
        }
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

/// A short growing blast.  Purely cosmetic: it keeps animating through
/// pauses and the game-over screen, and collides with nothing.
#[derive(Clone, Debug)]
pub struct Explosion {
    /// Blast center.
    pub x: f32,
    pub y: f32,
    pub frame: u32,
    pub last_frame_at: f64,
    pub alive: bool,
}

impl Explosion {
    pub fn new(center: (f32, f32), now: f64) -> Self {
        Explosion {
            x: center.0,
            y: center.1,
            frame: 0,
            last_frame_at: now,
            alive: true,
        }
    }

    /// Diameter of the current frame in px.
    pub fn size(&self) -> f32 {
        EXPLOSION_BASE_SIZE + self.frame as f32 * EXPLOSION_GROWTH
    }

    pub fn advance(&mut self, now: f64) {
        if now - self.last_frame_at >= EXPLOSION_FRAME_MS {
            self.last_frame_at = now;
            self.frame += 1;
            if self.frame >= EXPLOSION_FRAMES {
                self.alive = false;
            }
        }
    }
}
