use crate::{TermInt, Coords};
use crate::board::Position;
use crate::config::{CELL_WIDTH, SCREEN_COLS, SCREEN_ROWS};
use crate::error::{Result, SnakeError};
use crate::game::{InputSource, Key, Renderer};
use crate::snake::Direction::*;
use crate::state::Frame;
use std::{env, io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read, poll};
use log::warn;

const BORDER_COLOR: Color = Color::DarkYellow;
const FIELD_COLOR: Color = Color::DarkCyan;
const HEAD_COLOR: Color = Color::White;
const BODY_COLOR: Color = Color::Black;
const FOOD_COLOR: Color = Color::DarkBlue;
const COUNTER_FG: Color = Color::Black;
const COUNTER_BG: Color = Color::DarkMagenta;
const MESSAGE_FG: Color = Color::Red;
const MESSAGE_BG: Color = Color::Black;

/// A character on screen together with the background behind it.
#[derive(Copy, Clone, PartialEq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', fg: Color::Reset, bg: Color::Reset };

/// Owns the terminal while the game runs: raw mode, the alternate screen and
/// a copy of what the arena looks like so messages can be taken down again.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
    active: bool,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    /// Checks that the terminal can show the arena. Nothing is changed on
    /// screen until `setup` is called.
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        if rows < SCREEN_ROWS || cols < SCREEN_COLS {
            return Err(SnakeError::TerminalTooSmall {
                rows,
                cols,
                min_rows: SCREEN_ROWS,
                min_cols: SCREEN_COLS,
            });
        }

        let term = env::var("TERM").ok();
        if !supports_color(term.as_deref(), env::var_os("NO_COLOR").is_some()) {
            return Err(SnakeError::NoColorSupport);
        }

        let (width, height) = (SCREEN_COLS, SCREEN_ROWS);
        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None, active: false })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, glyph: Glyph) -> io::Result<()> {
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = glyph;
        self.print_at_no_save(pos, glyph)
    }

    fn print_at_no_save(&mut self, pos: Coords, glyph: Glyph) -> io::Result<()> {
        // Used for messages, which must not overwrite the local buffer so the
        // arena can be restored when they are hidden
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetColors(style::Colors::new(glyph.fg, glyph.bg)),
            style::Print(glyph.ch)
        )
    }

    fn paint_cell(&mut self, pos: Position, color: Color) -> io::Result<()> {
        let x = 1 + pos.col as TermInt * CELL_WIDTH;
        let y = 1 + pos.row as TermInt;
        let glyph = Glyph { ch: ' ', fg: color, bg: color };

        for dx in 0..CELL_WIDTH {
            self.print_at((x + dx, y), glyph)?;
        }
        Ok(())
    }

    fn print_length(&mut self, length: usize) -> io::Result<()> {
        let text = format!("{:03}", length);
        let x = self.width - 1 - text.len() as TermInt;
        let glyph = Glyph { ch: ' ', fg: COUNTER_FG, bg: COUNTER_BG };

        for (i, ch) in text.chars().enumerate() {
            self.print_at((x + i as TermInt, self.height - 1), Glyph { ch, ..glyph })?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()
    }
}

impl Renderer for TermManager {
    fn draw_arena(&mut self) -> io::Result<()> {
        let border = Glyph { ch: ' ', fg: BORDER_COLOR, bg: BORDER_COLOR };
        let field = Glyph { ch: ' ', fg: FIELD_COLOR, bg: FIELD_COLOR };
        let (end_x, end_y) = (self.width - 1, self.height - 1);

        for y in 0..self.height {
            for x in 0..self.width {
                let on_edge = x == 0 || y == 0 || x == end_x || y == end_y;
                self.print_at((x, y), if on_edge { border } else { field })?;
            }
        }

        self.flush()
    }

    fn draw_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let field = Glyph { ch: ' ', fg: FIELD_COLOR, bg: FIELD_COLOR };
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                if self.screen[self.width as usize * y as usize + x as usize] != field {
                    self.print_at((x, y), field)?;
                }
            }
        }

        for pos in frame.segments.iter().skip(1) {
            self.paint_cell(*pos, BODY_COLOR)?;
        }
        if let Some(food) = frame.food {
            self.paint_cell(food, FOOD_COLOR)?;
        }
        self.paint_cell(frame.head, HEAD_COLOR)?;
        self.print_length(frame.length)?;

        self.flush()
    }

    fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 4) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);
        let blank = Glyph { ch: ' ', fg: MESSAGE_FG, bg: MESSAGE_BG };

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, y), blank)?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), Glyph { ch, ..blank })?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    fn hide_message(&mut self) -> io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let glyph = self.screen[self.width as usize * y as usize + x as usize];
                self.print_at_no_save((x, y), glyph)?;
            }
        }

        self.flush()
    }
}

impl InputSource for TermManager {
    fn poll_keys(&mut self) -> io::Result<Vec<Key>> {
        let mut keys = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    keys.push(to_key(&ev));
                }
            }
        }

        Ok(keys)
    }

    fn wait_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(to_key(&ev));
                }
            }
        }
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("could not restore the terminal: {}", e);
        }
    }
}

/// Whether a terminal described by `$TERM` can show the arena's colors.
/// A set `NO_COLOR` counts as no color at all.
fn supports_color(term: Option<&str>, no_color: bool) -> bool {
    match term {
        _ if no_color => false,
        None | Some("") | Some("dumb") => false,
        Some(_) => true,
    }
}

fn to_key(ev: &KeyEvent) -> Key {
    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('w') | KeyCode::Up => Key::Turn(Up),
        KeyCode::Char('a') | KeyCode::Left => Key::Turn(Left),
        KeyCode::Char('s') | KeyCode::Down => Key::Turn(Down),
        KeyCode::Char('d') | KeyCode::Right => Key::Turn(Right),
        KeyCode::Char('q') => Key::Quit,
        KeyCode::Char('p') => Key::Pause,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn colorless_terminals_are_rejected() {
        assert!(!supports_color(None, false));
        assert!(!supports_color(Some(""), false));
        assert!(!supports_color(Some("dumb"), false));
        assert!(!supports_color(Some("xterm-256color"), true));

        assert!(supports_color(Some("xterm-256color"), false));
        assert!(supports_color(Some("screen"), false));
        assert!(supports_color(Some("linux"), false));
    }

    #[test]
    fn maps_keys() {
        assert_eq!(to_key(&press(KeyCode::Up, KeyModifiers::NONE)), Key::Turn(Up));
        assert_eq!(to_key(&press(KeyCode::Char('a'), KeyModifiers::NONE)), Key::Turn(Left));
        assert_eq!(to_key(&press(KeyCode::Char('s'), KeyModifiers::NONE)), Key::Turn(Down));
        assert_eq!(to_key(&press(KeyCode::Right, KeyModifiers::NONE)), Key::Turn(Right));
        assert_eq!(to_key(&press(KeyCode::Char('q'), KeyModifiers::NONE)), Key::Quit);
        assert_eq!(to_key(&press(KeyCode::Char('p'), KeyModifiers::NONE)), Key::Pause);
        assert_eq!(to_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Key::Quit);
        assert_eq!(to_key(&press(KeyCode::Char('c'), KeyModifiers::NONE)), Key::Other);
        assert_eq!(to_key(&press(KeyCode::Esc, KeyModifiers::NONE)), Key::Other);
    }
}
