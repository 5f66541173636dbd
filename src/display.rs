//! Boundary between the simulation and whatever draws it
//!
//! The core only ever asks a display for its viewport, tells it the grid
//! shape after a rebuild, and pushes single-cell states. Input comes back
//! as [`InputEvent`]s.

use crate::config::Viewport;
use crossterm::event::KeyCode;
use std::io;

/// Input raised by the display side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Load,
    Resize(Viewport),
    KeyPress(KeyCode),
    CellClick { row: usize, col: usize },
    Quit,
}

/// Line shown under the grid after each frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub generation: u64,
    pub live: usize,
    pub paused: bool,
}

impl Status {
    pub fn text(&self) -> String {
        let state = if self.paused { "paused" } else { "running" };
        format!(
            " gen {}  live {}  [{}]  space: pause  ?: help  q: quit",
            self.generation, self.live, state
        )
    }
}

pub trait Display {
    /// Current drawable area
    fn viewport(&self) -> Viewport;

    /// Forget everything drawn and prepare for a rows x cols grid
    fn rebuild_layout(&mut self, rows: usize, cols: usize) -> io::Result<()>;

    fn render_cell(&mut self, row: usize, col: usize, alive: bool);

    /// Push the frame built so far
    fn present(&mut self, status: &Status) -> io::Result<()>;
}

/// Display that draws into plain text lines.
///
/// Used by the `print` subcommand and by tests; its viewport is fixed at construction.
pub struct TextDisplay {
    viewport: Viewport,
    alive_char: char,
    lines: Vec<Vec<char>>,
    status: Option<Status>,
}

impl TextDisplay {
    pub fn new(viewport: Viewport, alive_char: char) -> Self {
        Self {
            viewport,
            alive_char,
            lines: Vec::new(),
            status: None,
        }
    }

    /// Grid rows as text, one char per cell ('.' for dead)
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().map(|row| row.iter().collect()).collect()
    }

    pub fn last_status(&self) -> Option<Status> {
        self.status
    }
}

impl Display for TextDisplay {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn rebuild_layout(&mut self, rows: usize, cols: usize) -> io::Result<()> {
        self.lines = vec![vec!['.'; cols]; rows];
        Ok(())
    }

    fn render_cell(&mut self, row: usize, col: usize, alive: bool) {
        if let Some(slot) = self.lines.get_mut(row).and_then(|line| line.get_mut(col)) {
            *slot = if alive { self.alive_char } else { '.' };
        }
    }

    fn present(&mut self, status: &Status) -> io::Result<()> {
        self.status = Some(*status);
        Ok(())
    }
}
