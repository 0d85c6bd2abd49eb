/// Central tuning table for the whole simulation.
///
/// The gameplay core runs on a fixed virtual playfield so the logic never
/// sees terminal cells; the renderer scales to whatever screen it finds.
/// Units throughout: distances in playfield pixels, speeds in pixels per
/// second, times in milliseconds of session-clock time.

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const WIDTH: f32 = 1280.0;
pub const HEIGHT: f32 = 800.0;
/// Target frame rate of the front-end loop (the core itself is dt-driven).
pub const FPS: u32 = 60;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
/// Base movement speed; each power level adds PLAYER_POWER_SPEED_BONUS.
pub const PLAYER_SPEED: f32 = 192.0;
pub const PLAYER_POWER_SPEED_BONUS: f32 = 1.5;
/// Delay between volleys at power level 0; higher power fires faster.
pub const PLAYER_SHOOT_DELAY: f64 = 250.0;
pub const PLAYER_MAX_POWER: u32 = 6;
/// How long one collected power-up stack lasts.
pub const POWERUP_DURATION: f64 = 10_000.0;
pub const PLAYER_LIVES: u32 = 3;
/// Off-field breather after losing a life, before respawning.
pub const PLAYER_HIDE_MS: f64 = 1000.0;
/// Gap between the ship and the bottom edge at the default spawn point.
pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 10.0;
pub const BULLET_SPEED: f32 = 420.0;
pub const ENEMY_BULLET_WIDTH: f32 = 5.0;
pub const ENEMY_BULLET_HEIGHT: f32 = 15.0;
/// Hostile shots fly at this fraction of the player bullet speed.
pub const ENEMY_BULLET_SPEED_FACTOR: f32 = 0.8;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: f32 = 35.0;
pub const ENEMY_HEIGHT: f32 = 35.0;
pub const ENEMY_FALL_SPEED: f32 = 120.0;
/// Sideways drift of the zigzag kind; it covers ground faster than it falls.
pub const ZIGZAG_DRIFT_SPEED: f32 = ENEMY_FALL_SPEED * 2.0 / 1.5;
/// Shooters descend slower than the others.
pub const SHOOTER_SPEED_FACTOR: f32 = 0.7;
/// A shooter parks at a height rolled once from this range.
pub const SHOOTER_STOP_MIN: f32 = 50.0;
pub const SHOOTER_STOP_MAX: f32 = 150.0;
/// Base interval between shooter volleys, jittered per enemy at spawn.
pub const ENEMY_SHOOT_DELAY: f64 = 1500.0;
pub const ENEMY_SHOOT_JITTER: f64 = 300.0;
/// Slack past each field edge before a leaked enemy is culled.
pub const ENEMY_BOTTOM_SLACK: f32 = 10.0;
pub const ENEMY_SIDE_SLACK: f32 = 5.0;
/// Consolation score for an enemy that leaks off the field.
pub const SKIP_SCORE: u32 = 5;
/// Size of the trickle waves spawned once a level's script is spent.
pub const FILLER_WAVE_SIZE: u32 = 3;

// ── Bosses ────────────────────────────────────────────────────────────────────

pub const BOSS_WIDTH: f32 = 100.0;
pub const BOSS_HEIGHT: f32 = 80.0;
/// Health per level number; boss kind and difficulty multiply on top.
pub const BOSS_HEALTH_BASE: f32 = 100.0;
/// Entry descent speed; patrol speed is BOSS_PATROL_FACTOR times this.
pub const BOSS_SPEED: f32 = 60.0;
pub const BOSS_PATROL_FACTOR: f32 = 1.5;
/// The boss stops descending once its top edge reaches this height.
pub const BOSS_ENTRY_Y: f32 = 20.0;
/// Patrol turnaround margin at both side walls.
pub const BOSS_PATROL_MARGIN: f32 = 10.0;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWERUP_WIDTH: f32 = 25.0;
pub const POWERUP_HEIGHT: f32 = 25.0;
pub const POWERUP_FALL_SPEED: f32 = 180.0;
/// Chance a destroyed enemy drops an upgrade (scaled by difficulty).
pub const POWERUP_DROP_CHANCE: f64 = 0.1;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const KILL_SCORE: u32 = 10;
pub const BOSS_HIT_SCORE: u32 = 5;
/// Multiplied by the level number when its boss falls.
pub const BOSS_CLEAR_BONUS: u32 = 500;

// ── Session pacing ────────────────────────────────────────────────────────────

/// A free power-up every 30 s of active play.
pub const POWER_GRANT_MS: f64 = 30_000.0;
/// Enemy fall speed ramps by RAMP_STEP every 20 s of active play.
pub const RAMP_MS: f64 = 20_000.0;
pub const RAMP_STEP: f32 = 0.1;
/// Dramatic freezes around boss fights and level starts.
pub const BOSS_INTRO_PAUSE_MS: f64 = 500.0;
pub const BOSS_DEFEAT_PAUSE_MS: f64 = 1000.0;
pub const LEVEL_START_PAUSE_MS: f64 = 500.0;

// ── Explosions ────────────────────────────────────────────────────────────────

pub const EXPLOSION_FRAMES: u32 = 8;
pub const EXPLOSION_FRAME_MS: f64 = 50.0;
/// Blast diameter starts at the base and grows every frame.
pub const EXPLOSION_BASE_SIZE: f32 = 30.0;
pub const EXPLOSION_GROWTH: f32 = 10.0;
