use crate::colors::{scheme_color, ColorState};
use crate::config::{Layout, Viewport};
use crate::display::{Display, InputEvent, Status};
use crate::help::render_help_overlay;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

const HELP_TEXT: &str = "\
GAME OF LIFE
───────────────────────
Space  Pause/resume
Mouse  Toggle a cell
Resize Reseed the board
?      Close help
───────────────────────
 !-()   Color scheme
 q/Esc  Quit
───────────────────────";

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
}

/// A single cell in the terminal buffer
#[derive(Clone)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Enter raw mode and the alternate screen with mouse capture
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;

        Ok(Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
        })
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reallocate the back buffer for new dimensions
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Render the entire buffer to screen
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }

                if let Some(color) = cell.fg {
                    queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?;
                } else {
                    queue!(out, Print(cell.ch))?;
                }

                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Wait up to `timeout` for one input event
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if poll(timeout)? {
            return Ok(Some(read()?));
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Draws the grid onto the terminal back buffer
pub struct TerminalDisplay {
    term: Terminal,
    layout: Layout,
    draw_char: char,
    colors: ColorState,
    show_status: bool,
    show_help: bool,
    shown: Vec<Vec<bool>>,
    status: Status,
}

impl TerminalDisplay {
    pub fn new(term: Terminal, draw_char: char, color_scheme: u8, show_status: bool) -> Self {
        Self {
            term,
            layout: Layout::default(),
            draw_char,
            colors: ColorState::new(color_scheme),
            show_status,
            show_help: false,
            shown: Vec::new(),
            status: Status::default(),
        }
    }

    fn cols(&self) -> usize {
        self.shown.first().map_or(0, Vec::len)
    }

    /// Wait for the next input the app cares about.
    ///
    /// Display-local keys (help, color scheme) are handled here and the
    /// frame is redrawn; they never reach the simulation.
    pub fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        let Some(event) = self.term.poll_event(timeout)? else {
            return Ok(None);
        };
        let input = match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => None,
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::Quit)
                }
                KeyCode::Char('?') => {
                    self.show_help = !self.show_help;
                    self.refresh()?;
                    None
                }
                code if self.colors.handle_key(code) => {
                    self.refresh()?;
                    None
                }
                code => Some(InputEvent::KeyPress(code)),
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self
                    .layout
                    .cell_at(mouse.column, mouse.row, self.shown.len(), self.cols())
                    .map(|(row, col)| InputEvent::CellClick { row, col }),
                _ => None,
            },
            Event::Resize(width, height) => {
                self.term.resize(width, height);
                Some(InputEvent::Resize(Viewport::new(width, height)))
            }
            _ => None,
        };
        Ok(input)
    }

    fn cell_color(&self) -> (Color, bool) {
        scheme_color(self.colors.scheme, 2, false)
    }

    /// Redraw every cell from the last rendered states
    fn repaint(&mut self) {
        self.term.clear();
        for row in 0..self.shown.len() {
            for col in 0..self.shown[row].len() {
                self.draw(row, col);
            }
        }
    }

    fn draw(&mut self, row: usize, col: usize) {
        let alive = self.shown[row][col];
        let (x, y) = self.layout.cell_origin(row, col);
        let (color, bold) = self.cell_color();
        for dx in 0..self.layout.cell.width {
            let x = (x + dx) as i32;
            if alive {
                self.term.set(x, y as i32, self.draw_char, Some(color), bold);
            } else {
                self.term.set(x, y as i32, ' ', None, false);
            }
        }
    }

    fn draw_status(&mut self) {
        let (width, height) = self.term.size();
        if !self.show_status || height == 0 {
            return;
        }
        let y = height as i32 - 1;
        let text = self.status.text();
        let (color, _) = scheme_color(self.colors.scheme, 1, false);
        self.term.set_str(0, y, &" ".repeat(width as usize), None, false);
        self.term.set_str(0, y, &text, Some(color), false);
    }

    /// Repaint and flush, with the help box on top when open
    fn refresh(&mut self) -> io::Result<()> {
        self.repaint();
        self.draw_status();
        if self.show_help {
            let (width, height) = self.term.size();
            render_help_overlay(&mut self.term, width, height, HELP_TEXT);
        }
        self.term.present()
    }
}

impl Display for TerminalDisplay {
    fn viewport(&self) -> Viewport {
        let (width, height) = self.term.size();
        Viewport::new(width, height)
    }

    fn rebuild_layout(&mut self, rows: usize, cols: usize) -> io::Result<()> {
        self.term.clear_screen()?;
        self.shown = vec![vec![false; cols]; rows];
        self.term.clear();
        Ok(())
    }

    fn render_cell(&mut self, row: usize, col: usize, alive: bool) {
        let Some(slot) = self.shown.get_mut(row).and_then(|line| line.get_mut(col)) else {
            return;
        };
        *slot = alive;
        self.draw(row, col);
    }

    fn present(&mut self, status: &Status) -> io::Result<()> {
        self.status = *status;
        self.draw_status();
        if self.show_help {
            let (width, height) = self.term.size();
            render_help_overlay(&mut self.term, width, height, HELP_TEXT);
        }
        self.term.present()
    }
}
