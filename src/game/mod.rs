//! Game: terminal lifecycle and the fixed-rate main loop.
//!
//! Owns the world and a pair of canvases. Each iteration drains pending
//! input, steps the world, paints it offscreen, and blits only the pixels
//! that changed into the playfield, centered in the terminal. The
//! terminal is restored on every exit path, error included.

pub mod input;

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::{cursor, event, execute, queue, style, terminal};

use crate::config::GameConfig;
use crate::map::TileMap;
use crate::renderer::Canvas;
use crate::types::{Color, NamedColor};
use crate::world::{World, WorldOptions};
use input::{Action, handle_event};

/// Width and height of the square play area, in playfield pixels.
pub const PLAYGROUND_WIDTH: usize = 24;
/// Nominal frame rate of the main loop.
pub const FRAME_RATE: u32 = 30;
/// Player speed, in playfield pixels per second.
pub const PLAYER_SPEED: f64 = 6.0;
/// Grid cell the player spawns in, as `(column, row)`.
pub const PLAYER_SPAWN_CELL: (usize, usize) = (5, 9);

/// Rows reserved above the playfield for the menu bar.
const CANVAS_OFFSET: u16 = 1;
/// Terminal columns per playfield pixel. Two columns per row keeps the
/// tiles square-ish on common terminal fonts.
const PIXEL_WIDTH: u16 = 2;
const PIXEL: &str = "  ";

pub struct Game {
    config: GameConfig,
    world: World,
    /// Frame being painted.
    front: Canvas,
    /// Previous frame, for diffing.
    back: Canvas,
    /// Top-left terminal cell of the playfield.
    origin: (u16, u16),
    full_redraw_needed: bool,
}

impl Game {
    pub fn new(map: &TileMap, config: GameConfig) -> Game {
        let world = World::new(
            map,
            WorldOptions {
                playground_width: PLAYGROUND_WIDTH,
                frame_rate: f64::from(FRAME_RATE),
                spawn_cell: PLAYER_SPAWN_CELL,
                player_speed: PLAYER_SPEED,
                wall_color: config.colors.wall,
                player_color: config.colors.player,
            },
        );
        let background = config.colors.background;

        Game {
            config,
            world,
            front: Canvas::new(PLAYGROUND_WIDTH, PLAYGROUND_WIDTH, background),
            back: Canvas::new(PLAYGROUND_WIDTH, PLAYGROUND_WIDTH, background),
            origin: (0, CANVAS_OFFSET),
            full_redraw_needed: true,
        }
    }

    /// Run the game in the terminal.
    ///
    /// Sets up the terminal, enters the main loop, and restores the
    /// terminal on exit (even on error).
    pub fn run(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let need_w = PLAYGROUND_WIDTH as u16 * PIXEL_WIDTH;
        // +2: one row for the menu bar, one row for the status bar
        let need_h = PLAYGROUND_WIDTH as u16 + 2;
        if term_w < need_w || term_h < need_h {
            bail!("Terminal too small: need {need_w}x{need_h}, have {term_w}x{term_h}");
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;

        // Held-key driving needs key release events, and terminals only
        // deliver those through the keyboard enhancement protocol.
        match terminal::supports_keyboard_enhancement() {
            Ok(true) => {}
            Ok(false) => {
                let _ = terminal::disable_raw_mode();
                bail!(
                    "This terminal does not report key releases \
                     (kitty keyboard protocol required)"
                );
            }
            Err(e) => {
                let _ = terminal::disable_raw_mode();
                return Err(e.into());
            }
        }

        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES),
        )?;

        let result = self.main_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            event::PopKeyboardEnhancementFlags,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let frame = Duration::from_secs(1) / FRAME_RATE;

        loop {
            let frame_start = Instant::now();

            // Drain everything that arrived since the last frame.
            while event::poll(Duration::ZERO)? {
                match handle_event(&self.config, event::read()?) {
                    Action::Quit => return Ok(()),
                    Action::Held(direction, held) => self.world.set_held(direction, held),
                    Action::Redraw => self.full_redraw_needed = true,
                    Action::Continue => {}
                }
            }

            self.world.step();

            self.front.clear(self.config.colors.background);
            self.world.paint(&mut self.front);

            if self.full_redraw_needed {
                self.render_all(stdout)?;
                self.full_redraw_needed = false;
            } else {
                self.render_diff(stdout)?;
            }
            self.render_status(stdout)?;
            stdout.flush()?;

            std::mem::swap(&mut self.front, &mut self.back);

            // Fixed pacing: sleep away the remainder of the nominal frame.
            // The movement step is a constant; elapsed time never scales it.
            let elapsed = frame_start.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    /// Clear the screen and redraw the menu bar and the whole playfield,
    /// re-centering it in the current terminal size.
    fn render_all(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        self.origin = playfield_origin(term_w, term_h);

        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        self.render_menubar(stdout)?;

        let (ox, oy) = self.origin;
        for y in 0..self.front.height() {
            queue!(stdout, cursor::MoveTo(ox, oy + y as u16))?;
            let mut current: Option<Color> = None;
            for x in 0..self.front.width() {
                let color = self.front.pixel(x, y);
                if current != Some(color) {
                    queue!(stdout, style::SetBackgroundColor(to_ct_color(&color)))?;
                    current = Some(color);
                }
                queue!(stdout, style::Print(PIXEL))?;
            }
        }
        queue!(stdout, style::ResetColor)?;
        Ok(())
    }

    /// Redraw only the pixels that changed since the previous frame.
    fn render_diff(&self, stdout: &mut io::Stdout) -> Result<()> {
        let (ox, oy) = self.origin;
        for change in self.front.diff(&self.back) {
            queue!(
                stdout,
                cursor::MoveTo(ox + change.x * PIXEL_WIDTH, oy + change.y),
                style::SetBackgroundColor(to_ct_color(&change.color)),
                style::Print(PIXEL),
            )?;
        }
        queue!(stdout, style::ResetColor)?;
        Ok(())
    }

    fn render_menubar(&self, stdout: &mut io::Stdout) -> Result<()> {
        let items: &[&str] = &["[\u{2190}\u{2191}\u{2193}\u{2192}] drive", "[q][Esc] quit"];

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(" "),
        )?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                queue!(stdout, style::Print("  "))?;
            }
            print_menu_item(stdout, item)?;
        }
        Ok(())
    }

    fn render_status(&self, stdout: &mut io::Stdout) -> Result<()> {
        let status_y = self.origin.1 + PLAYGROUND_WIDTH as u16;
        let (_, term_h) = terminal::size()?;
        if status_y >= term_h {
            return Ok(()); // No room for the status bar.
        }

        let pos = self.world.player().position();
        let status = format!(" tank ({:>5.1}, {:>5.1}) ", pos.x, pos.y);

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            stdout,
            cursor::MoveTo(self.origin.0, status_y),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        Ok(())
    }
}

/// Center the playfield in the terminal, below the menu bar row.
fn playfield_origin(term_w: u16, term_h: u16) -> (u16, u16) {
    let w = PLAYGROUND_WIDTH as u16 * PIXEL_WIDTH;
    let h = PLAYGROUND_WIDTH as u16;
    let x = term_w.saturating_sub(w) / 2;
    let y = CANVAS_OFFSET + term_h.saturating_sub(h + 2) / 2;
    (x, y)
}

/// Print one menu item, bolding the `[...]` key part and dimming the
/// label.
fn print_menu_item(stdout: &mut io::Stdout, item: &str) -> Result<()> {
    let (keys, label) = match item.rfind(']') {
        Some(end) => item.split_at(end + 1),
        None => ("", item),
    };
    queue!(
        stdout,
        style::SetAttribute(style::Attribute::Bold),
        style::Print(keys),
        style::SetAttribute(style::Attribute::Reset),
        style::SetAttribute(style::Attribute::Dim),
        style::Print(label),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    Ok(())
}

/// Convert a config color to a crossterm color at the terminal boundary.
fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}
