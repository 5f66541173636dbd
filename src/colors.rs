use crossterm::event::KeyCode;
use crossterm::style::Color;

/// Shift+digit symbols, indexed by the scheme they select
const SCHEME_KEYS: [char; 10] = [')', '!', '@', '#', '$', '%', '^', '&', '*', '('];

/// (dim, normal, bright) per scheme: matrix, fire, ice, pink, gold,
/// electric, lava, mono, rainbow, neon
const SCHEMES: [[Color; 3]; 10] = [
    [Color::DarkGreen, Color::Green, Color::AnsiValue(10)],
    [Color::DarkRed, Color::Red, Color::Yellow],
    [Color::DarkBlue, Color::Blue, Color::Cyan],
    [Color::DarkMagenta, Color::Magenta, Color::AnsiValue(13)],
    [Color::DarkYellow, Color::Yellow, Color::AnsiValue(11)],
    [Color::DarkCyan, Color::Cyan, Color::AnsiValue(14)],
    [Color::DarkRed, Color::Red, Color::Magenta],
    [Color::DarkGrey, Color::Grey, Color::White],
    [Color::Red, Color::Yellow, Color::Green],
    [Color::DarkBlue, Color::Blue, Color::Magenta],
];

/// Color scheme used for live cells and the status line
#[derive(Clone, Copy)]
pub struct ColorState {
    pub scheme: u8,
}

impl ColorState {
    pub fn new(default_scheme: u8) -> Self {
        Self {
            scheme: default_scheme.min(SCHEMES.len() as u8 - 1),
        }
    }

    /// Handle color scheme key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let KeyCode::Char(c) = code else {
            return false;
        };
        match SCHEME_KEYS.iter().position(|&k| k == c) {
            Some(scheme) => {
                self.scheme = scheme as u8;
                true
            }
            None => false,
        }
    }
}

/// Get color from scheme based on intensity (0 = dim, 1 = normal, 2+ = bright).
/// Unknown schemes fall back to the green one.
pub fn scheme_color(scheme: u8, intensity: u8, bold: bool) -> (Color, bool) {
    let palette = SCHEMES.get(scheme as usize).unwrap_or(&SCHEMES[0]);
    match intensity {
        0 => (palette[0], false),
        1 => (palette[1], false),
        _ => (palette[2], bold),
    }
}
