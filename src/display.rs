/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only maps the virtual
/// pixel playfield onto whatever terminal grid happens to be available and
/// translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use cosmic_clash::config::{BOSS_WIDTH, HEIGHT, PLAYER_MAX_POWER, WIDTH};
use cosmic_clash::difficulty::Difficulty;
use cosmic_clash::entities::{
    Boss, BossKind, Bullet, Enemy, EnemyBullet, EnemyKind, Explosion, Player, PowerUp,
};
use cosmic_clash::levels::LEVEL_COUNT;
use cosmic_clash::session::{GameSession, GameState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_POWER: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY_BASIC: Color = Color::Green;
const C_ENEMY_ZIGZAG: Color = Color::Cyan;
const C_ENEMY_SHOOTER: Color = Color::DarkYellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_POWERUP: Color = Color::Yellow;
const C_BOSS_BAR: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Playfield mapping ─────────────────────────────────────────────────────────

/// Current terminal layout: row 0 is the HUD, rows 1 and `h-2` are the
/// border bars, the last row is the controls hint, and everything between
/// scales the virtual pixel field.
struct Screen {
    w: u16,
    h: u16,
}

impl Screen {
    fn current() -> Self {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        Screen { w, h }
    }

    fn play_cols(&self) -> f32 {
        self.w.saturating_sub(2) as f32
    }

    fn play_rows(&self) -> f32 {
        self.h.saturating_sub(4) as f32
    }

    /// Map a virtual pixel position to a terminal cell, or `None` while it
    /// is outside the visible field (spawning enemies, the parked ship).
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || x >= WIDTH || y < 0.0 || y >= HEIGHT {
            return None;
        }
        let col = 1.0 + x / WIDTH * self.play_cols();
        let row = 2.0 + y / HEIGHT * self.play_rows();
        let col = (col as u16).clamp(1, self.w.saturating_sub(2));
        let row = (row as u16).clamp(2, self.h.saturating_sub(3));
        Some((col, row))
    }

    /// Terminal columns covered by a virtual pixel width, at least one.
    fn span(&self, px: f32) -> usize {
        ((px / WIDTH * self.play_cols()).round() as usize).max(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    let screen = Screen::current();

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &screen)?;
    draw_hud(out, &screen, session)?;

    for enemy in &session.enemies {
        draw_enemy(out, &screen, enemy)?;
    }
    if let Some(boss) = &session.boss {
        draw_boss(out, &screen, boss)?;
        draw_boss_bar(out, &screen, boss)?;
    }
    for powerup in &session.powerups {
        draw_powerup(out, &screen, powerup)?;
    }
    for bullet in &session.bullets {
        draw_bullet(out, &screen, bullet)?;
    }
    for bullet in &session.enemy_bullets {
        draw_enemy_bullet(out, &screen, bullet)?;
    }
    for explosion in &session.explosions {
        draw_explosion(out, &screen, explosion)?;
    }
    if !session.player.hidden {
        draw_player(out, &screen, &session.player)?;
    }

    draw_controls_hint(out, &screen)?;

    if session.game_state == GameState::GameOver {
        draw_game_over(out, &screen, session)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    let w = screen.w as usize;
    let h = screen.h;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.w.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, screen: &Screen, session: &GameSession) -> std::io::Result<()> {
    // Score and level — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Lv:{:>2}",
        session.score, session.current_level
    )))?;

    // Difficulty — centre
    let tag = format!("[ {} ]", session.difficulty.label());
    let tag_color = match session.difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    };
    let tx = (screen.w / 2).saturating_sub(tag.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(tag_color))?;
    out.queue(Print(tag))?;

    // Power gauge + lives — right side, right-aligned
    let gauge: String = (0..PLAYER_MAX_POWER)
        .map(|i| if i < session.player.power_level { '▮' } else { '▯' })
        .collect();
    let power_str = format!("Power:{} ", gauge);
    let hearts: String = "♥".repeat(session.player.lives as usize);
    let lives_str = format!("Lives:{}", hearts);

    let right_len = (power_str.chars().count() + lives_str.chars().count()) as u16;
    let rx = screen.w.saturating_sub(right_len + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_POWER))?;
    out.queue(Print(&power_str))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, screen: &Screen, player: &Player) -> std::io::Result<()> {
    // Enhanced sprite (2 rows, 3 cols):
    //   ▲       ← row y      (tip)
    //  /█\      ← row y+1    (fuselage + wings)
    let b = player.bounds();
    let (col, row) = match screen.cell(b.center_x(), b.top()) {
        Some(cell) => cell,
        None => return Ok(()),
    };

    out.queue(style::SetForegroundColor(C_PLAYER))?;

    // Tip
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;

    // Fuselage — starting one column left of centre
    if row + 1 <= screen.h.saturating_sub(3) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, screen: &Screen, enemy: &Enemy) -> std::io::Result<()> {
    let b = enemy.bounds();
    let (col, row) = match screen.cell(b.center_x(), b.center_y()) {
        Some(cell) => cell,
        None => return Ok(()),
    };
    let (glyph, color) = match enemy.kind {
        EnemyKind::Basic => ("«▼»", C_ENEMY_BASIC),
        EnemyKind::Zigzag => ("<◆>", C_ENEMY_ZIGZAG),
        EnemyKind::Shooter => ("(Ω)", C_ENEMY_SHOOTER),
    };
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_boss<W: Write>(out: &mut W, screen: &Screen, boss: &Boss) -> std::io::Result<()> {
    let b = boss.bounds();
    let (col, row) = match screen.cell(b.center_x(), b.top().max(0.0)) {
        Some(cell) => cell,
        None => return Ok(()),
    };
    let color = match boss.kind {
        BossKind::Level1 => Color::DarkYellow,
        BossKind::Level2 => Color::Magenta,
        BossKind::Level3 => Color::Red,
        BossKind::Level4 => Color::White,
        BossKind::Level5 => Color::Blue,
        BossKind::Final => Color::Grey,
    };

    let width = screen.span(BOSS_WIDTH);
    let start = col.saturating_sub(width as u16 / 2).max(1);
    let block = "▓".repeat(width);

    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(start, row))?;
    out.queue(Print(&block))?;
    if row + 1 <= screen.h.saturating_sub(3) {
        out.queue(cursor::MoveTo(start, row + 1))?;
        out.queue(Print(&block))?;
    }

    Ok(())
}

/// Health bar drawn over the top border while a boss is on the field.
fn draw_boss_bar<W: Write>(out: &mut W, screen: &Screen, boss: &Boss) -> std::io::Result<()> {
    let filled = ((boss.health / boss.max_health) * 10.0).ceil() as usize;
    let filled = filled.min(10);
    let bar = format!("[BOSS {}{}]", "█".repeat(filled), "░".repeat(10 - filled));
    let col = (screen.w / 2).saturating_sub(bar.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, 1))?;
    out.queue(style::SetForegroundColor(C_BOSS_BAR))?;
    out.queue(Print(bar))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, screen: &Screen, bullet: &Bullet) -> std::io::Result<()> {
    let b = bullet.bounds();
    let (col, row) = match screen.cell(b.center_x(), b.center_y()) {
        Some(cell) => cell,
        None => return Ok(()),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
    out.queue(Print("║"))?;
    Ok(())
}

fn draw_enemy_bullet<W: Write>(
    out: &mut W,
    screen: &Screen,
    bullet: &EnemyBullet,
) -> std::io::Result<()> {
    let b = bullet.bounds();
    let (col, row) = match screen.cell(b.center_x(), b.center_y()) {
        Some(cell) => cell,
        None => return Ok(()),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
    out.queue(Print("↓"))?;
    Ok(())
}

fn draw_powerup<W: Write>(out: &mut W, screen: &Screen, powerup: &PowerUp) -> std::io::Result<()> {
    let b = powerup.bounds();
    let (col, row) = match screen.cell(b.center_x(), b.center_y()) {
        Some(cell) => cell,
        None => return Ok(()),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_POWERUP))?;
    out.queue(Print("★"))?;
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    screen: &Screen,
    explosion: &Explosion,
) -> std::io::Result<()> {
    let (col, row) = match screen.cell(explosion.x, explosion.y) {
        Some(cell) => cell,
        None => return Ok(()),
    };
    const CYCLE: [Color; 4] = [Color::White, Color::Yellow, Color::DarkYellow, Color::Red];
    let color = CYCLE[(explosion.frame % 4) as usize];
    let width = screen.span(explosion.size());
    let start = col.saturating_sub(width as u16 / 2).max(1);
    out.queue(cursor::MoveTo(start, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print("✶".repeat(width)))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ / WASD : Move (auto-fire)   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    screen: &Screen,
    session: &GameSession,
) -> std::io::Result<()> {
    let (title, box_color) = if session.victory {
        ("║     VICTORY !      ║", Color::Green)
    } else {
        ("║    GAME  OVER      ║", Color::Red)
    };
    let lines: &[&str] = &["╔════════════════════╗", title, "╚════════════════════╝"];

    let score_line = format!("Final Score: {:>6}", session.score);
    let level_line = if session.victory {
        format!("All {} levels cleared!", LEVEL_COUNT)
    } else {
        format!("Reached level {}", session.current_level)
    };
    let level_color = if session.victory {
        Color::Green
    } else {
        Color::DarkGrey
    };
    let hint = "R - Play Again  Q - Quit";

    let cx = screen.w / 2;
    let total_rows = lines.len() + 3; // 3 box lines + score + level + hint
    let start_row = (screen.h / 2).saturating_sub(total_rows as u16 / 2);

    for (i, msg) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(box_color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let level_row = score_row + 1;
    let col = cx.saturating_sub(level_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, level_row))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(&level_line))?;

    let hint_row = level_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
