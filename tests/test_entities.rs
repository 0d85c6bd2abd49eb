use cosmic_clash::config::*;
use cosmic_clash::difficulty::{Difficulty, DifficultyProfile};
use cosmic_clash::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn medium() -> DifficultyProfile {
    Difficulty::Medium.profile()
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.center(), (25.0, 40.0));
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    let c = Rect::new(10.0, 0.0, 10.0, 10.0); // shares the x=10 edge only
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
    assert!(!c.intersects(&a));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_spawns_centered_above_the_bottom() {
    let p = Player::new();
    assert_eq!(p.x, WIDTH / 2.0 - PLAYER_WIDTH / 2.0);
    assert_eq!(p.y, HEIGHT - PLAYER_BOTTOM_MARGIN - PLAYER_HEIGHT);
    assert_eq!(p.lives, PLAYER_LIVES);
    assert_eq!(p.power_level, 0);
    assert!(!p.hidden);
}

#[test]
fn player_moves_by_speed_times_dt() {
    let mut p = Player::new();
    let x0 = p.x;
    let input = InputState { left: true, ..Default::default() };
    p.advance(1.0, &input, 1000.0);
    assert!((p.x - (x0 - PLAYER_SPEED)).abs() < 1e-3);
}

#[test]
fn player_diagonal_is_normalized() {
    let mut p = Player::new();
    p.y = 600.0;
    let (x0, y0) = (p.x, p.y);
    let input = InputState { left: true, up: true, ..Default::default() };
    p.advance(1.0, &input, 1000.0);
    // Per-axis travel shrinks to speed / √2
    let expected = PLAYER_SPEED * std::f32::consts::FRAC_1_SQRT_2;
    assert!((x0 - p.x - expected).abs() < 1e-3);
    assert!((y0 - p.y - expected).abs() < 1e-3);
}

#[test]
fn player_clamps_to_field_edges() {
    let mut p = Player::new();
    p.x = 1.0;
    let input = InputState { left: true, ..Default::default() };
    p.advance(1.0, &input, 1000.0);
    assert_eq!(p.x, 0.0);

    p.x = WIDTH - PLAYER_WIDTH - 1.0;
    let input = InputState { right: true, ..Default::default() };
    p.advance(1.0, &input, 2000.0);
    assert_eq!(p.x, WIDTH - PLAYER_WIDTH);
}

#[test]
fn player_cannot_leave_the_lower_half() {
    let mut p = Player::new();
    let input = InputState { up: true, ..Default::default() };
    for i in 0..600 {
        p.advance(DT, &input, i as f64 * 16.0);
    }
    assert_eq!(p.y, HEIGHT / 2.0);
}

#[test]
fn volley_grows_with_power() {
    let mut p = Player::new();
    let b = p.bounds();

    // Base power: one shot from the nose
    let volley = p.try_fire(1000.0);
    assert_eq!(volley.len(), 1);
    assert!((volley[0].x + BULLET_WIDTH / 2.0 - b.center_x()).abs() < 1e-3);

    // Power 1: two wing shots
    p.power_level = 1;
    let volley = p.try_fire(3000.0);
    assert_eq!(volley.len(), 2);
    assert!((volley[0].x - (b.left() + 5.0 - BULLET_WIDTH / 2.0)).abs() < 1e-3);
    assert!(volley[0].x < volley[1].x);

    // Power 2 and up: all three
    p.power_level = 2;
    let volley = p.try_fire(5000.0);
    assert_eq!(volley.len(), 3);
}

#[test]
fn shot_timer_blocks_rapid_fire() {
    let mut p = Player::new();
    assert_eq!(p.try_fire(1000.0).len(), 1);
    // Inside the 250 ms delay: nothing
    assert!(p.try_fire(1100.0).is_empty());
    // Past it: fires again
    assert_eq!(p.try_fire(1300.0).len(), 1);
}

#[test]
fn power_shortens_the_shot_delay() {
    let mut p = Player::new();
    assert_eq!(p.shoot_delay(), PLAYER_SHOOT_DELAY);
    p.power_level = 5;
    // 250 / (1 + 5 * 0.2) = 125
    assert!((p.shoot_delay() - PLAYER_SHOOT_DELAY / 2.0).abs() < 1e-9);
}

#[test]
fn powerups_stack_and_cap() {
    let mut p = Player::new();
    for i in 0..PLAYER_MAX_POWER {
        p.collect_powerup(i as f64 * 100.0);
    }
    assert_eq!(p.power_level, PLAYER_MAX_POWER);
    assert_eq!(p.powerup_timers.len(), PLAYER_MAX_POWER as usize);

    // At the cap another pickup replaces the oldest stack instead
    let oldest = p.powerup_timers[0];
    p.collect_powerup(9000.0);
    assert_eq!(p.power_level, PLAYER_MAX_POWER);
    assert_eq!(p.powerup_timers.len(), PLAYER_MAX_POWER as usize);
    assert!(p.powerup_timers[0] > oldest);
}

#[test]
fn powerups_expire_and_power_drops() {
    let mut p = Player::new();
    p.collect_powerup(0.0); // lapses at 10 000
    p.collect_powerup(5000.0); // lapses at 15 000
    assert_eq!(p.power_level, 2);

    let input = InputState::default();
    p.advance(DT, &input, 12_000.0);
    assert_eq!(p.power_level, 1);
    assert_eq!(p.powerup_timers.len(), 1);

    p.advance(DT, &input, 16_000.0);
    assert_eq!(p.power_level, 0);
    assert!(p.powerup_timers.is_empty());
}

#[test]
fn hidden_ship_waits_out_the_grace_then_respawns() {
    let mut p = Player::new();
    p.hide(1000.0);
    assert!(p.hidden);
    assert!(p.y > HEIGHT); // parked off the field

    let input = InputState { left: true, ..Default::default() };
    // Still inside the grace window: no movement, no respawn
    p.advance(DT, &input, 1500.0);
    assert!(p.hidden);

    // Past it: back at the spawn point
    p.advance(DT, &input, 2001.0);
    assert!(!p.hidden);
    assert_eq!(p.x, WIDTH / 2.0 - PLAYER_WIDTH / 2.0);
    assert_eq!(p.y, HEIGHT - PLAYER_BOTTOM_MARGIN - PLAYER_HEIGHT);
}

#[test]
fn hidden_ship_does_not_fire() {
    let mut p = Player::new();
    p.hide(0.0);
    assert!(p.try_fire(5000.0).is_empty());
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_kind_parse_falls_back_to_basic() {
    assert_eq!(EnemyKind::parse("zigzag"), EnemyKind::Zigzag);
    assert_eq!(EnemyKind::parse("shooter"), EnemyKind::Shooter);
    assert_eq!(EnemyKind::parse("saucer"), EnemyKind::Basic);
}

#[test]
fn basic_enemy_falls_straight() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Basic, 600.0, -100.0, &medium(), 1.0, 0.0, &mut rng);
    assert_eq!(e.vel_x, 0.0);
    assert!((e.vel_y - ENEMY_FALL_SPEED).abs() < 1e-3);

    let x0 = e.x;
    e.advance(1.0);
    assert_eq!(e.x, x0);
    assert!((e.y - (-100.0 + ENEMY_FALL_SPEED)).abs() < 1e-3);
}

#[test]
fn zigzag_reflects_at_field_edges() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Zigzag, 100.0, 100.0, &medium(), 1.0, 0.0, &mut rng);
    // Drift magnitude is fixed either way: 2 × 120 / 1.5 = 160 px/s
    assert_eq!(ZIGZAG_DRIFT_SPEED, 160.0);
    assert_eq!(e.vel_x.abs(), ZIGZAG_DRIFT_SPEED);

    e.vel_x = -ZIGZAG_DRIFT_SPEED; // force a leftward drift
    e.x = 0.5;
    e.advance(DT);
    // Crossed the left edge: the drift flips to the right
    assert!(e.x < 0.5);
    assert!(e.vel_x > 0.0);
}

#[test]
fn shooter_parks_at_its_stop_height() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Shooter, 600.0, -60.0, &medium(), 1.0, 0.0, &mut rng);
    assert!((SHOOTER_STOP_MIN..SHOOTER_STOP_MAX).contains(&e.stop_at));
    assert!((e.vel_y - ENEMY_FALL_SPEED * SHOOTER_SPEED_FACTOR).abs() < 1e-3);

    for _ in 0..2000 {
        e.advance(DT);
    }
    assert!(e.stopped);
    assert_eq!(e.vel_y, 0.0);
    // Overshoots its mark by at most one tick of travel
    assert!(e.y > e.stop_at && e.y < e.stop_at + 2.0);
}

#[test]
fn shooter_fires_only_once_parked_and_on_screen() {
    let mut rng = seeded_rng();
    let profile = medium();
    let mut e = Enemy::new(EnemyKind::Shooter, 600.0, -60.0, &profile, 1.0, 0.0, &mut rng);
    // Still falling: no fire even with the delay long elapsed
    assert!(e.try_fire(60_000.0, &profile).is_none());

    e.stopped = true;
    e.y = 100.0;
    assert!(e.try_fire(60_000.0, &profile).is_some());
    // And the shot timer rearms
    assert!(e.try_fire(60_001.0, &profile).is_none());
}

#[test]
fn only_shooters_fire() {
    let mut rng = seeded_rng();
    let profile = medium();
    let mut e = Enemy::new(EnemyKind::Basic, 600.0, 100.0, &profile, 1.0, 0.0, &mut rng);
    e.stopped = true;
    assert!(e.try_fire(60_000.0, &profile).is_none());
}

#[test]
fn off_field_needs_the_full_slack() {
    let mut rng = seeded_rng();
    let mut e = Enemy::new(EnemyKind::Basic, 600.0, 100.0, &medium(), 1.0, 0.0, &mut rng);
    assert!(!e.off_field());

    e.y = HEIGHT + ENEMY_BOTTOM_SLACK; // exactly on the slack line: still in
    assert!(!e.off_field());
    e.y = HEIGHT + ENEMY_BOTTOM_SLACK + 0.1;
    assert!(e.off_field());

    e.y = 100.0;
    e.x = -ENEMY_WIDTH - ENEMY_SIDE_SLACK - 0.1;
    assert!(e.off_field());
    e.x = WIDTH + ENEMY_SIDE_SLACK + 0.1;
    assert!(e.off_field());
}

#[test]
fn ramp_scales_the_fall_speed() {
    let mut rng = seeded_rng();
    let e = Enemy::new(EnemyKind::Basic, 600.0, 0.0, &medium(), 1.5, 0.0, &mut rng);
    assert!((e.vel_y - ENEMY_FALL_SPEED * 1.5).abs() < 1e-3);
}

#[test]
fn difficulty_profile_scales_speed_and_shot_delay() {
    // Same seed → identical stop-height and jitter rolls, so any difference
    // comes from the profile multipliers alone
    let med = Difficulty::Medium.profile();
    let hard = Difficulty::Hard.profile();
    let e_med = Enemy::new(EnemyKind::Shooter, 600.0, 0.0, &med, 1.0, 0.0, &mut seeded_rng());
    let e_hard = Enemy::new(EnemyKind::Shooter, 600.0, 0.0, &hard, 1.0, 0.0, &mut seeded_rng());

    assert_eq!(e_med.stop_at, e_hard.stop_at);
    assert!((e_hard.vel_y - e_med.vel_y * hard.enemy_speed_mult).abs() < 1e-3);
    assert!(
        (e_hard.shoot_delay - e_med.shoot_delay * hard.enemy_shoot_delay_mult).abs() < 1e-6
    );
    assert!(e_hard.shoot_delay < e_med.shoot_delay);
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[test]
fn boss_kind_parse_falls_back() {
    assert_eq!(BossKind::parse("level3_boss"), BossKind::Level3);
    assert_eq!(BossKind::parse("final_boss"), BossKind::Final);
    assert_eq!(BossKind::parse("unheard_of"), BossKind::Level1);
}

#[test]
fn boss_health_scales_with_level_and_kind() {
    let profile = medium();
    let mut rng = seeded_rng();
    let b1 = Boss::new(1, BossKind::Level1, &profile, 0.0, &mut rng);
    assert_eq!(b1.health, 100.0);

    let b5 = Boss::new(5, BossKind::Level3, &profile, 0.0, &mut rng);
    assert_eq!(b5.health, 500.0);

    let b9 = Boss::new(9, BossKind::Level5, &profile, 0.0, &mut rng);
    assert_eq!(b9.health, 100.0 * 9.0 * 1.5);

    let b10 = Boss::new(10, BossKind::Final, &profile, 0.0, &mut rng);
    assert_eq!(b10.health, 2000.0);
    assert_eq!(b10.max_health, 2000.0);
}

#[test]
fn boss_descends_then_patrols_between_margins() {
    let profile = medium();
    let mut rng = seeded_rng();
    let mut b = Boss::new(1, BossKind::Level1, &profile, 0.0, &mut rng);
    assert!(b.y < 0.0);
    assert!(!b.entry_done);

    // Descending at 60 px/s it is in position well within 4 s
    for _ in 0..240 {
        b.advance(DT);
    }
    assert!(b.entry_done);
    assert_eq!(b.y, BOSS_ENTRY_Y);
    assert_eq!(b.vel_y, 0.0);

    // From then on it strafes without ever leaving the margins
    for _ in 0..2000 {
        b.advance(DT);
        assert!(b.x >= BOSS_PATROL_MARGIN - 1e-3);
        assert!(b.x + BOSS_WIDTH <= WIDTH - BOSS_PATROL_MARGIN + 1e-3);
    }
}

#[test]
fn boss_does_not_fire_during_entry() {
    let profile = medium();
    let mut rng = seeded_rng();
    let mut b = Boss::new(1, BossKind::Level1, &profile, 0.0, &mut rng);
    assert!(b.try_fire(60_000.0, &profile).is_empty());

    b.entry_done = true;
    assert_eq!(b.try_fire(60_000.0, &profile).len(), 1);
}

#[test]
fn boss_volley_width_by_kind() {
    let profile = medium();
    let mut rng = seeded_rng();

    let mut b2 = Boss::new(2, BossKind::Level2, &profile, 0.0, &mut rng);
    b2.entry_done = true;
    assert_eq!(b2.try_fire(60_000.0, &profile).len(), 2);

    let mut bf = Boss::new(10, BossKind::Final, &profile, 0.0, &mut rng);
    bf.entry_done = true;
    assert_eq!(bf.try_fire(60_000.0, &profile).len(), 3);
}

#[test]
fn take_damage_reports_defeat_exactly_once() {
    let profile = medium();
    let mut rng = seeded_rng();
    let mut b = Boss::new(1, BossKind::Level1, &profile, 0.0, &mut rng);
    b.health = 2.0;

    assert!(!b.take_damage(1.0));
    assert!(b.take_damage(1.0));
    assert!(!b.alive);
    // Hits on the corpse change nothing
    assert!(!b.take_damage(1.0));
    assert_eq!(b.health, 0.0);
}

// ── Projectiles & explosions ──────────────────────────────────────────────────

#[test]
fn player_bullet_flies_up_and_despawns_past_the_top() {
    let mut b = Bullet::new(640.0, 100.0);
    assert!((b.x + BULLET_WIDTH / 2.0 - 640.0).abs() < 1e-3);
    assert!((b.y - (100.0 - BULLET_HEIGHT)).abs() < 1e-3);

    let y0 = b.y;
    b.advance(DT);
    assert!(b.y < y0);
    assert!(b.alive);

    // One tick of travel past the upper edge kills it
    b.y = 0.5 - BULLET_HEIGHT;
    b.advance(DT);
    assert!(!b.alive);
}

#[test]
fn enemy_bullet_speed_follows_the_profile() {
    let easy = Difficulty::Easy.profile();
    let hard = Difficulty::Hard.profile();
    let b_easy = EnemyBullet::new(640.0, 100.0, &easy);
    let b_hard = EnemyBullet::new(640.0, 100.0, &hard);
    let base = BULLET_SPEED * ENEMY_BULLET_SPEED_FACTOR;
    assert!((b_easy.vel_y - base * easy.enemy_bullet_speed_mult).abs() < 1e-3);
    assert!((b_hard.vel_y - base * hard.enemy_bullet_speed_mult).abs() < 1e-3);
    assert!(b_hard.vel_y > b_easy.vel_y);
}

#[test]
fn enemy_bullet_shares_the_player_bullet_width() {
    let b = EnemyBullet::new(640.0, 100.0, &medium());
    let r = b.bounds();
    // Same 5 px width as a player bullet, half again as tall: 5×15
    assert_eq!(r.right() - r.left(), BULLET_WIDTH);
    assert_eq!(r.bottom() - r.top(), BULLET_HEIGHT * 1.5);
    assert!((r.center_x() - 640.0).abs() < 1e-3);
    assert!((r.top() - 100.0).abs() < 1e-3);
}

#[test]
fn enemy_bullet_despawns_below_the_field() {
    let mut b = EnemyBullet::new(640.0, HEIGHT - 1.0, &medium());
    b.advance(DT);
    assert!(b.y > HEIGHT);
    assert!(!b.alive);
}

#[test]
fn powerup_centers_on_its_drop_point() {
    let p = PowerUp::new((100.0, 200.0));
    let b = p.bounds();
    assert!((b.center_x() - 100.0).abs() < 1e-3);
    assert!((b.center_y() - 200.0).abs() < 1e-3);
}

#[test]
fn explosion_grows_then_burns_out() {
    let mut e = Explosion::new((640.0, 400.0), 0.0);
    assert_eq!(e.frame, 0);
    assert_eq!(e.size(), EXPLOSION_BASE_SIZE);

    // One frame step per EXPLOSION_FRAME_MS
    e.advance(EXPLOSION_FRAME_MS);
    assert_eq!(e.frame, 1);
    assert_eq!(e.size(), EXPLOSION_BASE_SIZE + EXPLOSION_GROWTH);

    // Not yet time for the next step
    e.advance(EXPLOSION_FRAME_MS + 1.0);
    assert_eq!(e.frame, 1);

    let mut t = EXPLOSION_FRAME_MS;
    while e.alive {
        t += EXPLOSION_FRAME_MS;
        e.advance(t);
    }
    assert_eq!(e.frame, EXPLOSION_FRAMES);
}
