/// Game session: the tick pipeline that drives one run of the campaign.
///
/// The session owns every entity plus a millisecond clock advanced from the
/// `dt` passed to [`GameSession::tick`], so identical inputs and an identical
/// RNG replay an identical run.  Rendering and input live in the binary; the
/// session never touches the terminal.

use rand::Rng;

use crate::config::*;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::entities::{
    Boss, Bullet, Enemy, EnemyBullet, EnemyKind, Explosion, InputState, Player, PowerUp,
};
use crate::levels::{LevelDef, SpawnPattern, LEVEL_COUNT};

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Waiting in the menu; ticks only advance the clock.
    StartScreen,
    /// Scripted waves, filler waves, working toward the boss quota.
    Playing,
    /// The level boss is on the field.
    BossFight,
    /// Run over, by defeat or by clearing the campaign.
    GameOver,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameSession {
    pub game_state: GameState,
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub current_level: u32,
    pub level_def: LevelDef,
    /// Index of the next scripted wave to spawn.
    pub current_wave: usize,
    /// Bullet kills this level; escaped enemies do not count.
    pub kills_this_level: u32,
    pub score: u32,
    /// Set when the campaign is cleared rather than lost.
    pub victory: bool,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Session clock in ms, accumulated from tick deltas.
    pub now: f64,
    /// While set, gameplay is frozen until the clock passes the deadline.
    pub pause_until: Option<f64>,
    /// Level transition queued behind the boss-defeat pause.
    pub pending_level_advance: bool,
    pub last_power_grant: f64,
    pub last_difficulty_ramp: f64,
    /// Global enemy-speed ramp, grows the longer the run lasts.
    pub ramp_mult: f32,
}

impl GameSession {
    pub fn new() -> Self {
        GameSession {
            game_state: GameState::StartScreen,
            difficulty: Difficulty::Medium,
            profile: Difficulty::Medium.profile(),
            current_level: 1,
            level_def: LevelDef::load(1),
            current_wave: 0,
            kills_this_level: 0,
            score: 0,
            victory: false,
            player: Player::new(),
            enemies: Vec::new(),
            boss: None,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            now: 0.0,
            pause_until: None,
            pending_level_advance: false,
            last_power_grant: 0.0,
            last_difficulty_ramp: 0.0,
            ramp_mult: 1.0,
        }
    }

    /// Reset everything, including the clock, and enter `Playing` at the
    /// given level.
    pub fn start_new_game(&mut self, level: u32, difficulty: Difficulty) {
        let level = level.clamp(1, LEVEL_COUNT);
        self.game_state = GameState::Playing;
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
        self.current_level = level;
        self.level_def = LevelDef::load(level);
        self.current_wave = 0;
        self.kills_this_level = 0;
        self.score = 0;
        self.victory = false;
        self.player = Player::new();
        self.enemies.clear();
        self.boss = None;
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.powerups.clear();
        self.explosions.clear();
        self.now = 0.0;
        self.pause_until = None;
        self.pending_level_advance = false;
        self.last_power_grant = 0.0;
        self.last_difficulty_ramp = 0.0;
        self.ramp_mult = 1.0;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.game_state, GameState::Playing | GameState::BossFight)
    }

    /// Current and maximum boss health, while a boss is on the field.
    pub fn boss_health(&self) -> Option<(f32, f32)> {
        self.boss.as_ref().map(|b| (b.health, b.max_health))
    }

    /// Advance the whole simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32, input: &InputState, rng: &mut impl Rng) {
        // ── 1. Clock ─────────────────────────────────────────────────────
        self.now += dt as f64 * 1000.0;

        // ── 2. Idle states ───────────────────────────────────────────────
        if self.game_state == GameState::StartScreen {
            return;
        }
        if self.game_state == GameState::GameOver {
            self.advance_explosions();
            return;
        }

        // ── 3. Pauses (boss intro, defeat, level banner) ─────────────────
        if let Some(deadline) = self.pause_until {
            if self.now < deadline {
                self.advance_explosions();
                return;
            }
            self.pause_until = None;
        }
        if self.pending_level_advance {
            self.pending_level_advance = false;
            self.advance_level();
            self.advance_explosions();
            return;
        }

        // ── 4. Entities ──────────────────────────────────────────────────
        self.player.advance(dt, input, self.now);
        let volley = self.player.try_fire(self.now);
        self.bullets.extend(volley);

        for enemy in &mut self.enemies {
            if !enemy.alive {
                continue;
            }
            enemy.advance(dt);
            if enemy.off_field() {
                enemy.alive = false;
                self.score += SKIP_SCORE;
                continue;
            }
            if let Some(bullet) = enemy.try_fire(self.now, &self.profile) {
                self.enemy_bullets.push(bullet);
            }
        }

        if let Some(boss) = self.boss.as_mut() {
            boss.advance(dt);
            let volley = boss.try_fire(self.now, &self.profile);
            self.enemy_bullets.extend(volley);
        }

        for bullet in &mut self.bullets {
            bullet.advance(dt);
        }
        for bullet in &mut self.enemy_bullets {
            bullet.advance(dt);
        }
        for powerup in &mut self.powerups {
            powerup.advance(dt);
        }
        self.advance_explosions();

        // ── 5. Waves ─────────────────────────────────────────────────────
        if self.game_state == GameState::Playing {
            self.manage_waves(rng);
        }

        // ── 6. Collisions ────────────────────────────────────────────────
        self.check_collisions(rng);

        // ── 7. Cleanup & survival bonuses ────────────────────────────────
        self.bullets.retain(|b| b.alive);
        self.enemy_bullets.retain(|b| b.alive);
        self.enemies.retain(|e| e.alive);
        self.powerups.retain(|p| p.alive);

        if self.is_running() {
            if self.now - self.last_power_grant >= POWER_GRANT_MS {
                self.last_power_grant = self.now;
                self.player.collect_powerup(self.now);
            }
            if self.now - self.last_difficulty_ramp >= RAMP_MS {
                self.last_difficulty_ramp = self.now;
                self.ramp_mult += RAMP_STEP;
            }
        }
    }

    // ── Waves & bosses ────────────────────────────────────────────────────────

    /// Once the field is clear: next scripted wave, else the boss when the
    /// kill quota is met, else a small filler wave to keep the level alive.
    fn manage_waves(&mut self, rng: &mut impl Rng) {
        if self.enemies.iter().any(|e| e.alive) {
            return;
        }
        if self.current_wave < self.level_def.waves.len() {
            let wave = self.level_def.waves[self.current_wave];
            for _ in 0..wave.count {
                self.spawn_enemy(wave.kind, wave.pattern, rng);
            }
            self.current_wave += 1;
            return;
        }
        if self.kills_this_level >= self.level_def.kills_for_boss {
            self.start_boss_fight(rng);
            return;
        }
        for _ in 0..FILLER_WAVE_SIZE {
            self.spawn_enemy(EnemyKind::Basic, SpawnPattern::TopRandom, rng);
        }
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, pattern: SpawnPattern, rng: &mut impl Rng) {
        let (x, y) = pattern.position(rng);
        self.enemies.push(Enemy::new(
            kind,
            x,
            y,
            &self.profile,
            self.ramp_mult,
            self.now,
            rng,
        ));
    }

    fn start_boss_fight(&mut self, rng: &mut impl Rng) {
        self.enemies.clear();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.powerups.clear();
        self.game_state = GameState::BossFight;
        self.boss = Some(Boss::new(
            self.current_level,
            self.level_def.boss_kind,
            &self.profile,
            self.now,
            rng,
        ));
        self.pause_until = Some(self.now + BOSS_INTRO_PAUSE_MS);
    }

    fn handle_boss_defeat(&mut self) {
        self.score += BOSS_CLEAR_BONUS * self.current_level;
        if let Some(boss) = self.boss.take() {
            self.explosions
                .push(Explosion::new(boss.bounds().center(), self.now));
        }
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.powerups.clear();
        self.pause_until = Some(self.now + BOSS_DEFEAT_PAUSE_MS);
        self.pending_level_advance = true;
    }

    /// Move to the next level, or end the run in victory past the last one.
    fn advance_level(&mut self) {
        self.current_level += 1;
        if self.current_level > LEVEL_COUNT {
            self.victory = true;
            self.game_state = GameState::GameOver;
            return;
        }
        self.level_def = LevelDef::load(self.current_level);
        self.current_wave = 0;
        self.kills_this_level = 0;
        // Back to the spawn point; power level persists across levels.
        self.player.respawn();
        self.game_state = GameState::Playing;
        self.pause_until = Some(self.now + LEVEL_START_PAUSE_MS);
    }

    // ── Collisions ────────────────────────────────────────────────────────────

    fn check_collisions(&mut self, rng: &mut impl Rng) {
        // Player bullets vs enemies.  Each bullet kills at most one enemy.
        for bullet in &mut self.bullets {
            if !bullet.alive {
                continue;
            }
            for enemy in &mut self.enemies {
                if !enemy.alive {
                    continue;
                }
                if bullet.bounds().intersects(&enemy.bounds()) {
                    bullet.alive = false;
                    enemy.alive = false;
                    self.score += KILL_SCORE;
                    self.kills_this_level += 1;
                    let chance = (POWERUP_DROP_CHANCE * self.profile.powerup_drop_mult).min(1.0);
                    if rng.gen_bool(chance) {
                        self.powerups.push(PowerUp::new(enemy.bounds().center()));
                    }
                    break;
                }
            }
        }

        // Player bullets vs the boss.
        if self.game_state == GameState::BossFight {
            let mut boss_down = false;
            if let Some(boss) = self.boss.as_mut() {
                for bullet in &mut self.bullets {
                    if !bullet.alive || !boss.alive {
                        continue;
                    }
                    if bullet.bounds().intersects(&boss.bounds()) {
                        bullet.alive = false;
                        self.score += BOSS_HIT_SCORE;
                        if boss.take_damage(1.0) {
                            boss_down = true;
                        }
                    }
                }
            }
            if boss_down {
                self.handle_boss_defeat();
                return;
            }
        }

        // Ramming.  Every enemy in contact dies, the player dies once.
        if !self.player.hidden {
            let pb = self.player.bounds();
            let mut rammed = false;
            for enemy in &mut self.enemies {
                if enemy.alive && enemy.bounds().intersects(&pb) {
                    enemy.alive = false;
                    rammed = true;
                }
            }
            if rammed {
                self.player_death();
            }
        }

        // Boss contact hurts the player but never the boss.
        if !self.player.hidden {
            let pb = self.player.bounds();
            let touched = self
                .boss
                .as_ref()
                .map_or(false, |boss| boss.alive && boss.bounds().intersects(&pb));
            if touched {
                self.player_death();
            }
        }

        // Enemy bullets.  All overlapping shots are consumed, one death.
        if !self.player.hidden {
            let pb = self.player.bounds();
            let mut hit = false;
            for bullet in &mut self.enemy_bullets {
                if bullet.alive && bullet.bounds().intersects(&pb) {
                    bullet.alive = false;
                    hit = true;
                }
            }
            if hit {
                self.player_death();
            }
        }

        // Power-up pickups.
        if !self.player.hidden {
            let pb = self.player.bounds();
            for powerup in &mut self.powerups {
                if powerup.alive && powerup.bounds().intersects(&pb) {
                    powerup.alive = false;
                    self.player.collect_powerup(self.now);
                }
            }
        }
    }

    // ── Player death & explosions ─────────────────────────────────────────────

    fn player_death(&mut self) {
        if self.player.hidden {
            return;
        }
        self.explosions
            .push(Explosion::new(self.player.bounds().center(), self.now));
        self.player.lives = self.player.lives.saturating_sub(1);
        self.player.hide(self.now);
        self.player.power_level = 0;
        self.player.powerup_timers.clear();
        if self.player.lives > 0 {
            // A respawn grace: the screen is wiped of hostile shots.
            self.enemy_bullets.clear();
        } else {
            self.game_state = GameState::GameOver;
        }
    }

    /// Explosions animate everywhere, pauses and game over included.
    fn advance_explosions(&mut self) {
        for explosion in &mut self.explosions {
            explosion.advance(self.now);
        }
        self.explosions.retain(|e| e.alive);
    }
}
