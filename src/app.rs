//! Event handling and the tick loop

use crate::config::{Layout, Viewport, LIVE_CELL_CHANCE};
use crate::display::{Display, InputEvent, Status, TextDisplay};
use crate::grid::Grid;
use crate::sim::SimulationClock;
use crate::terminal::TerminalDisplay;
use crossterm::event::KeyCode;
use rand::Rng;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Source of input events for the run loop
pub trait EventSource {
    /// Wait up to `timeout` for the next event
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

impl EventSource for TerminalDisplay {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        TerminalDisplay::next_event(self, timeout)
    }
}

/// Owns the grid, the clock and the display; every event is handled here,
/// one at a time.
pub struct App<D, R> {
    display: D,
    rng: R,
    layout: Layout,
    grid: Grid,
    clock: SimulationClock,
}

impl<D: Display, R: Rng> App<D, R> {
    pub fn new(display: D, rng: R) -> Self {
        Self {
            display,
            rng,
            layout: Layout::default(),
            grid: Grid::default(),
            clock: SimulationClock::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Dispatch one event. Returns false once the app should stop.
    pub fn handle(&mut self, event: InputEvent) -> io::Result<bool> {
        match event {
            InputEvent::Load => self.on_load()?,
            InputEvent::Resize(viewport) => self.on_resize(viewport)?,
            InputEvent::KeyPress(code) => self.on_key_press(code)?,
            InputEvent::CellClick { row, col } => self.on_cell_click(row, col)?,
            InputEvent::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn on_load(&mut self) -> io::Result<()> {
        let viewport = self.display.viewport();
        self.rebuild(viewport)
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> io::Result<()> {
        self.rebuild(viewport)
    }

    pub fn on_key_press(&mut self, code: KeyCode) -> io::Result<()> {
        if code != KeyCode::Char(' ') {
            return Ok(());
        }
        let state = self.clock.toggle_pause();
        info!(?state, generation = self.clock.generation(), "pause toggled");
        self.present()
    }

    pub fn on_cell_click(&mut self, row: usize, col: usize) -> io::Result<()> {
        match self.grid.toggle(row, col) {
            Ok(alive) => {
                debug!(row, col, alive, "cell toggled");
                self.display.render_cell(row, col, alive);
                self.present()
            }
            Err(err) => {
                // a click from before the last resize
                warn!(error = %err, "ignoring click");
                Ok(())
            }
        }
    }

    /// One firing of the timer. While paused nothing changes.
    pub fn on_tick(&mut self) -> io::Result<()> {
        let Some(report) = self.clock.tick(&mut self.grid) else {
            return Ok(());
        };
        debug!(
            generation = self.clock.generation(),
            births = report.births,
            deaths = report.deaths,
            "generation advanced"
        );
        if report.changed() {
            self.render_all();
        }
        self.present()
    }

    /// Throw away the current board and start over at the new size
    fn rebuild(&mut self, viewport: Viewport) -> io::Result<()> {
        self.grid = Grid::build(viewport, self.layout.pitch, self.layout.padding);
        self.grid.reseed(LIVE_CELL_CHANCE, &mut self.rng);
        self.clock.reset_generation();

        let (rows, cols) = self.grid.dimensions();
        info!(
            width = viewport.width,
            height = viewport.height,
            rows,
            cols,
            live = self.grid.live_count(),
            "grid rebuilt"
        );

        self.display.rebuild_layout(rows, cols)?;
        self.render_all();
        self.present()
    }

    fn render_all(&mut self) {
        for (row, cells) in self.grid.rows().enumerate() {
            for (col, &alive) in cells.iter().enumerate() {
                self.display.render_cell(row, col, alive);
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let status = Status {
            generation: self.clock.generation(),
            live: self.grid.live_count(),
            paused: self.clock.is_paused(),
        };
        self.display.present(&status)
    }
}

impl<D: Display + EventSource, R: Rng> App<D, R> {
    /// Run until a quit event.
    ///
    /// The first tick fires right after load. Each following tick is
    /// scheduled one interval after the previous one finished, so ticks
    /// never overlap and pausing only skips the step.
    pub fn run(&mut self) -> io::Result<()> {
        self.handle(InputEvent::Load)?;
        let mut next_tick = Instant::now();

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if let Some(event) = self.display.next_event(timeout)? {
                if !self.handle(event)? {
                    break;
                }
                continue;
            }

            if Instant::now() >= next_tick {
                self.on_tick()?;
                next_tick = Instant::now() + self.clock.interval();
            }
        }

        info!(generation = self.clock.generation(), "stopped");
        Ok(())
    }
}

/// Seed a board for `viewport`, advance it `generations` times without
/// waiting, and return its rows as text.
pub fn run_headless<R: Rng>(
    viewport: Viewport,
    generations: u64,
    rng: R,
    draw_char: char,
) -> io::Result<Vec<String>> {
    let mut app = App::new(TextDisplay::new(viewport, draw_char), rng);
    app.handle(InputEvent::Load)?;
    for _ in 0..generations {
        app.on_tick()?;
    }
    Ok(app.display().lines())
}
