/// The ten-level campaign: wave scripts, boss quotas and boss picks.
///
/// Levels live here as a static catalog of plain names and numbers, kept
/// deliberately close to a data file.  `LevelDef::load` turns one row into
/// typed form; unknown names fall back to the mildest variant instead of
/// failing, so a typo in the catalog degrades rather than crashes.

use rand::Rng;

use crate::config::*;
use crate::entities::{BossKind, EnemyKind};

// ── Spawn patterns ────────────────────────────────────────────────────────────

/// Where above the field a wave's enemies materialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnPattern {
    /// Anywhere along the top edge.
    TopRandom,
    /// Hugging the left or right side, 50/50 per enemy.
    TopSides,
    /// Clustered around the horizontal center.
    TopCenterSpread,
}

impl SpawnPattern {
    pub fn parse(name: &str) -> Self {
        match name {
            "top_random" => SpawnPattern::TopRandom,
            "top_sides" => SpawnPattern::TopSides,
            "top_center_spread" => SpawnPattern::TopCenterSpread,
            _ => SpawnPattern::TopRandom,
        }
    }

    /// Roll a spawn point above the visible field.
    pub fn position(&self, rng: &mut impl Rng) -> (f32, f32) {
        match self {
            SpawnPattern::TopRandom => (
                rng.gen_range(ENEMY_WIDTH..WIDTH - ENEMY_WIDTH),
                rng.gen_range(-150.0..-100.0_f32),
            ),
            SpawnPattern::TopSides => {
                let x = if rng.gen_bool(0.5) {
                    rng.gen_range(ENEMY_WIDTH..WIDTH / 4.0)
                } else {
                    rng.gen_range(WIDTH * 3.0 / 4.0..WIDTH - ENEMY_WIDTH)
                };
                (x, rng.gen_range(-150.0..-100.0_f32))
            }
            SpawnPattern::TopCenterSpread => (
                WIDTH / 2.0 + rng.gen_range(-50.0..50.0_f32),
                rng.gen_range(-100.0..-80.0_f32),
            ),
        }
    }
}

// ── Level definitions ─────────────────────────────────────────────────────────

/// One scripted batch of same-kind enemies.
#[derive(Clone, Copy, Debug)]
pub struct Wave {
    pub kind: EnemyKind,
    pub count: u32,
    /// Per-enemy spawn stagger in ms, carried from the balance tables.
    /// Waves currently spawn all at once, so no rule consumes it.
    pub spawn_delay: f64,
    pub pattern: SpawnPattern,
}

/// Everything the session needs to run one level.
#[derive(Clone, Debug)]
pub struct LevelDef {
    pub waves: Vec<Wave>,
    /// Kills needed before the boss shows up once the script runs dry.
    pub kills_for_boss: u32,
    pub boss_kind: BossKind,
}

impl LevelDef {
    /// Load a level by 1-based number.  Out-of-range numbers clamp into
    /// the catalog, so level 10 repeats past the end of the campaign.
    pub fn load(level: u32) -> Self {
        let idx = level.clamp(1, LEVEL_COUNT) as usize - 1;
        let raw = &CATALOG[idx];
        LevelDef {
            waves: raw
                .waves
                .iter()
                .map(|&(kind, count, spawn_delay, pattern)| Wave {
                    kind: EnemyKind::parse(kind),
                    count,
                    spawn_delay,
                    pattern: SpawnPattern::parse(pattern),
                })
                .collect(),
            kills_for_boss: raw.kills_for_boss,
            boss_kind: BossKind::parse(raw.boss),
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

pub const LEVEL_COUNT: u32 = 10;

type RawWave = (&'static str, u32, f64, &'static str);

struct RawLevel {
    waves: &'static [RawWave],
    kills_for_boss: u32,
    boss: &'static str,
}

static CATALOG: [RawLevel; LEVEL_COUNT as usize] = [
    // Level 1
    RawLevel {
        waves: &[
            ("basic", 5, 1200.0, "top_random"),
            ("basic", 8, 800.0, "top_random"),
            ("zigzag", 3, 1500.0, "top_sides"),
        ],
        kills_for_boss: 16,
        boss: "level1_boss",
    },
    // Level 2
    RawLevel {
        waves: &[
            ("basic", 6, 1000.0, "top_sides"),
            ("zigzag", 5, 1000.0, "top_random"),
            ("basic", 7, 700.0, "top_center_spread"),
            ("shooter", 2, 2000.0, "top_sides"),
        ],
        kills_for_boss: 20,
        boss: "level2_boss",
    },
    // Level 3
    RawLevel {
        waves: &[
            ("shooter", 4, 1500.0, "top_random"),
            ("zigzag", 6, 900.0, "top_random"),
            ("basic", 10, 500.0, "top_center_spread"),
        ],
        kills_for_boss: 20,
        boss: "level1_boss",
    },
    // Level 4
    RawLevel {
        waves: &[
            ("basic", 8, 700.0, "top_sides"),
            ("zigzag", 8, 700.0, "top_sides"),
            ("shooter", 5, 1200.0, "top_random"),
        ],
        kills_for_boss: 21,
        boss: "level2_boss",
    },
    // Level 5
    RawLevel {
        waves: &[
            ("zigzag", 10, 600.0, "top_random"),
            ("shooter", 6, 1000.0, "top_sides"),
            ("basic", 10, 400.0, "top_center_spread"),
        ],
        kills_for_boss: 26,
        boss: "level3_boss",
    },
    // Level 6
    RawLevel {
        waves: &[
            ("basic", 15, 500.0, "top_random"),
            ("shooter", 8, 900.0, "top_sides"),
            ("zigzag", 10, 600.0, "top_center_spread"),
        ],
        kills_for_boss: 33,
        boss: "level3_boss",
    },
    // Level 7
    RawLevel {
        waves: &[
            ("shooter", 10, 800.0, "top_random"),
            ("zigzag", 15, 500.0, "top_sides"),
        ],
        kills_for_boss: 25,
        boss: "level4_boss",
    },
    // Level 8
    RawLevel {
        waves: &[
            ("basic", 20, 400.0, "top_center_spread"),
            ("zigzag", 10, 600.0, "top_sides"),
            ("shooter", 10, 700.0, "top_random"),
        ],
        kills_for_boss: 40,
        boss: "level4_boss",
    },
    // Level 9
    RawLevel {
        waves: &[
            ("zigzag", 20, 400.0, "top_random"),
            ("shooter", 15, 600.0, "top_sides"),
        ],
        kills_for_boss: 35,
        boss: "level5_boss",
    },
    // Level 10
    RawLevel {
        waves: &[
            ("basic", 10, 500.0, "top_center_spread"),
            ("zigzag", 10, 500.0, "top_sides"),
            ("shooter", 10, 800.0, "top_random"),
            ("basic", 15, 300.0, "top_random"),
            ("zigzag", 10, 400.0, "top_sides"),
        ],
        kills_for_boss: 55,
        boss: "final_boss",
    },
];
