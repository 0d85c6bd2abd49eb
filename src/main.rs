mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use cosmic_clash::config::FPS;
use cosmic_clash::difficulty::Difficulty;
use cosmic_clash::entities::InputState;
use cosmic_clash::levels::LEVEL_COUNT;
use cosmic_clash::session::{GameSession, GameState};

const FRAME: Duration = Duration::from_millis((1000 / FPS) as u64); // ≈60 FPS
const DT: f32 = 1.0 / FPS as f32;

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty, u32),
    Quit,
}

fn draw_menu<W: Write>(
    out: &mut W,
    difficulty: Difficulty,
    start_level: u32,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  COSMIC  CLASH  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty:"))?;

    let options: &[(Difficulty, &str, Color, &str)] = &[
        (Difficulty::Easy,   "Easy  ", Color::Green,  "Slow enemies, generous drops"),
        (Difficulty::Medium, "Medium", Color::Yellow, "Balanced challenge"),
        (Difficulty::Hard,   "Hard  ", Color::Red,    "Fast and relentless!"),
    ];

    for (i, (diff, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        let selected = *diff == difficulty;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(if selected {
            *color
        } else {
            Color::DarkGrey
        }))?;
        out.queue(Print(if selected { "▸ " } else { "  " }))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    // Starting-level selector
    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!(
        "Start level: ‹ {:>2} › of {}",
        start_level, LEVEL_COUNT
    )))?;

    // Enemy legend
    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 5))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Know your enemy:"))?;

    let enemy_info: &[(&str, Color, &str)] = &[
        ("«▼»", Color::Green,      " Basic   — dives straight down"),
        ("<◆>", Color::Cyan,       " Zigzag  — drifts side to side"),
        ("(Ω)", Color::DarkYellow, " Shooter — parks high and fires"),
        ("★",   Color::Yellow,     "  Power-up — catch for faster fire"),
    ];
    for (i, (sym, color, desc)) in enemy_info.iter().enumerate() {
        let row = cy + 6 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 11))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("←→ : Level   ↑↓ or 1/2/3 : Difficulty   Enter : Launch   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    difficulty: &mut Difficulty,
    start_level: &mut u32,
) -> std::io::Result<MenuResult> {
    loop {
        draw_menu(out, *difficulty, *start_level)?;

        // Block until the user makes a choice
        let event = match rx.recv() {
            Ok(ev) => ev,
            Err(_) => return Ok(MenuResult::Quit),
        };
        let code = match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => code,
            _ => continue,
        };
        match code {
            KeyCode::Char('1') => *difficulty = Difficulty::Easy,
            KeyCode::Char('2') => *difficulty = Difficulty::Medium,
            KeyCode::Char('3') => *difficulty = Difficulty::Hard,
            KeyCode::Up => {
                *difficulty = match *difficulty {
                    Difficulty::Easy => Difficulty::Hard,
                    Difficulty::Medium => Difficulty::Easy,
                    Difficulty::Hard => Difficulty::Medium,
                };
            }
            KeyCode::Down => {
                *difficulty = match *difficulty {
                    Difficulty::Easy => Difficulty::Medium,
                    Difficulty::Medium => Difficulty::Hard,
                    Difficulty::Hard => Difficulty::Easy,
                };
            }
            KeyCode::Enter => return Ok(MenuResult::Start(*difficulty, *start_level)),
            KeyCode::Left => {
                if *start_level > 1 {
                    *start_level -= 1;
                }
            }
            KeyCode::Right => {
                if *start_level < LEVEL_COUNT {
                    *start_level += 1;
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuResult::Quit);
            }
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which directional keys are still
/// "fresh" (within `HOLD_WINDOW` frames) and feed them all to the session as
/// one `InputState`, so diagonals just work and the autofiring ship never
/// stutters while turning.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if session.game_state == GameState::GameOver =>
                        {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Sample held keys into this frame's input ───────────────────────────
        let input = InputState {
            left: is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame),
            right: is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame),
            up: is_held(&key_frame, &KeyCode::Up, frame)
                || is_held(&key_frame, &KeyCode::Char('w'), frame)
                || is_held(&key_frame, &KeyCode::Char('W'), frame),
            down: is_held(&key_frame, &KeyCode::Down, frame)
                || is_held(&key_frame, &KeyCode::Char('s'), frame)
                || is_held(&key_frame, &KeyCode::Char('S'), frame),
        };

        // The session handles pauses and game over internally, so it is
        // safe to tick unconditionally.
        session.tick(DT, &input, &mut rng);

        display::render(out, session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut session = GameSession::new();
    let mut difficulty = Difficulty::Medium;
    let mut start_level: u32 = 1;

    loop {
        match show_menu(out, rx, &mut difficulty, &mut start_level)? {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty, level) => {
                session.start_new_game(level, difficulty);
                let quit = game_loop(out, &mut session, rx)?;
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
