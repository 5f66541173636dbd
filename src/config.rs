use std::path::PathBuf;
use std::time::Duration;

/// Probability of a cell starting alive after a (re)seed
pub const LIVE_CELL_CHANCE: f64 = 0.3;
/// Time between generations
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// A cell is drawn two columns wide so it looks roughly square
pub const CELL_SIZE: CellSize = CellSize { width: 2, height: 1 };
pub const CELL_GAP: CellSize = CellSize { width: 1, height: 0 };
/// Total padding per axis, split evenly between both sides
pub const VIEWPORT_PADDING: CellSize = CellSize { width: 2, height: 2 };

/// Width/height pair measured in terminal cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

/// Available drawing area, in terminal cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Distance from the start of one grid cell to the next (cell size + gap)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPitch {
    pub width: u16,
    pub height: u16,
}

impl CellPitch {
    pub fn new(cell: CellSize, gap: CellSize) -> Self {
        Self {
            width: cell.width + gap.width,
            height: cell.height + gap.height,
        }
    }
}

impl Default for CellPitch {
    fn default() -> Self {
        Self::new(CELL_SIZE, CELL_GAP)
    }
}

/// Geometry shared by grid construction and click mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub pitch: CellPitch,
    pub cell: CellSize,
    pub padding: CellSize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            pitch: CellPitch::default(),
            cell: CELL_SIZE,
            padding: VIEWPORT_PADDING,
        }
    }
}

impl Layout {
    /// Number of whole grid cells along one axis.
    ///
    /// Keeps the extra `- 1` of the browser original: one cell of margin is
    /// always left over.
    pub fn fit(extent: u16, padding: u16, pitch: u16) -> usize {
        if pitch == 0 {
            return 0;
        }
        (extent.saturating_sub(padding) / pitch).saturating_sub(1) as usize
    }

    /// Screen position of the top-left corner of grid cell (row, col)
    pub fn cell_origin(&self, row: usize, col: usize) -> (u16, u16) {
        let x = self.padding.width / 2 + (col as u16).saturating_mul(self.pitch.width);
        let y = self.padding.height / 2 + (row as u16).saturating_mul(self.pitch.height);
        (x, y)
    }

    /// Map a screen position back to a grid cell. Clicks on gaps or padding
    /// return `None`, as do positions beyond the grid.
    pub fn cell_at(&self, x: u16, y: u16, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let x = x.checked_sub(self.padding.width / 2)?;
        let y = y.checked_sub(self.padding.height / 2)?;
        if self.pitch.width == 0 || self.pitch.height == 0 {
            return None;
        }
        if x % self.pitch.width >= self.cell.width || y % self.pitch.height >= self.cell.height {
            return None;
        }
        let col = (x / self.pitch.width) as usize;
        let row = (y / self.pitch.height) as usize;
        (row < rows && col < cols).then_some((row, col))
    }
}

/// Options for one run, merged from the settings file and the command line
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub seed: Option<u64>,
    pub draw_char: char,
    pub color_scheme: u8,
    pub show_status: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            draw_char: '█',
            color_scheme: 0,
            show_status: true,
            log_file: None,
        }
    }
}
