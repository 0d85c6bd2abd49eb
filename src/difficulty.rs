/// Difficulty presets and the multiplier bundle each one carries.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Multipliers applied on top of the base tuning constants.
///
/// Speed multipliers scale px/s velocities, delay multipliers stretch or
/// shrink millisecond timers, and the drop multiplier scales the power-up
/// roll.  Enemies and bosses bake these in when they are constructed, so a
/// mid-game difficulty ramp never rewrites entities already on the field.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyProfile {
    pub enemy_speed_mult: f32,
    pub enemy_bullet_speed_mult: f32,
    /// Spawn-pacing multiplier from the balance tables; whole waves spawn
    /// at once, so no rule consumes it.
    pub enemy_spawn_rate_mult: f32,
    pub enemy_shoot_delay_mult: f64,
    pub boss_health_mult: f32,
    pub boss_speed_mult: f32,
    pub boss_shoot_delay_mult: f64,
    pub powerup_drop_mult: f64,
}

impl Difficulty {
    /// HUD / menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                enemy_speed_mult: 0.8,
                enemy_bullet_speed_mult: 0.7,
                enemy_spawn_rate_mult: 1.3,
                enemy_shoot_delay_mult: 1.4,
                boss_health_mult: 0.7,
                boss_speed_mult: 0.8,
                boss_shoot_delay_mult: 1.3,
                powerup_drop_mult: 1.5,
            },
            Difficulty::Medium => DifficultyProfile {
                enemy_speed_mult: 1.0,
                enemy_bullet_speed_mult: 1.0,
                enemy_spawn_rate_mult: 1.0,
                enemy_shoot_delay_mult: 1.0,
                boss_health_mult: 1.0,
                boss_speed_mult: 1.0,
                boss_shoot_delay_mult: 1.0,
                powerup_drop_mult: 1.0,
            },
            Difficulty::Hard => DifficultyProfile {
                enemy_speed_mult: 1.3,
                enemy_bullet_speed_mult: 1.2,
                enemy_spawn_rate_mult: 0.7,
                enemy_shoot_delay_mult: 0.7,
                boss_health_mult: 1.5,
                boss_speed_mult: 1.2,
                boss_shoot_delay_mult: 0.7,
                powerup_drop_mult: 0.6,
            },
        }
    }
}
