use crate::terminal::Terminal;
use crossterm::style::Color;

/// Lines of a bordered box around `text`, padded to equal width
pub fn help_box(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;

    let mut boxed = Vec::with_capacity(lines.len() + 2);
    boxed.push(format!("┌{}┐", "─".repeat(inner)));
    for line in lines {
        let pad = inner - 1 - line.chars().count();
        boxed.push(format!("│ {}{}│", line, " ".repeat(pad)));
    }
    boxed.push(format!("└{}┘", "─".repeat(inner)));
    boxed
}

/// Render a centered help overlay box with the provided text.
pub fn render_help_overlay(term: &mut Terminal, width: u16, height: u16, help_text: &str) {
    if help_text.is_empty() {
        return;
    }

    let boxed = help_box(help_text);
    let box_width = boxed[0].chars().count();
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(boxed.len()) / 2;

    let last = boxed.len() - 1;
    for (i, line) in boxed.iter().enumerate() {
        let y = (start_y + i) as i32;
        if i == 0 || i == last {
            term.set_str(start_x as i32, y, line, Some(Color::White), false);
            continue;
        }
        // border in white, text in grey
        let body: String = line.chars().skip(1).take(box_width - 2).collect();
        term.set(start_x as i32, y, '│', Some(Color::White), false);
        term.set_str(start_x as i32 + 1, y, &body, Some(Color::Grey), false);
        term.set((start_x + box_width - 1) as i32, y, '│', Some(Color::White), false);
    }
}
