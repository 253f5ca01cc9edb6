use colored::*;
use slotgrid_core::{Grid, Line, Notice, NoticeLevel, GRID_SIZE};

pub const GRID_HEIGHT: usize = GRID_SIZE + 2;
/// Glyph (two columns) plus padding or brackets, plus the gap.
const CELL_WIDTH: usize = 5;

fn border(left: &str, right: &str) -> String {
    format!("{left}{}{right}", "─".repeat(CELL_WIDTH * GRID_SIZE))
        .cyan()
        .to_string()
}

fn cell_text(grid: &Grid, row: usize, col: usize) -> String {
    match grid.get(row, col) {
        Some(sym) => sym.glyph().to_string(),
        None => "  ".to_string(),
    }
}

/// Boxed grid; cells on a winning line are bracketed and highlighted.
pub fn grid(grid: &Grid, lines: &[Line]) -> String {
    let mut out = String::new();
    out.push_str(&border("┌", "┐"));
    out.push('\n');
    for row in 0..GRID_SIZE {
        out.push_str(&"│".cyan().to_string());
        for col in 0..GRID_SIZE {
            let text = cell_text(grid, row, col);
            if lines.iter().any(|l| l.contains(row, col)) {
                out.push_str(&format!("[{text}]").yellow().bold().to_string());
            } else {
                out.push_str(&format!(" {text} "));
            }
            out.push(' ');
        }
        out.push_str(&"│".cyan().to_string());
        out.push('\n');
    }
    out.push_str(&border("└", "┘"));
    out
}

/// Moves the cursor back over a previously drawn grid.
pub fn rewind() -> String {
    format!("\x1b[{GRID_HEIGHT}A\r")
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => notice.message.white().to_string(),
        NoticeLevel::Win => notice.message.green().bold().to_string(),
        NoticeLevel::BigWin => format!("🎉 {} 🎉", notice.message)
            .bright_magenta()
            .bold()
            .to_string(),
        NoticeLevel::Warning => notice.message.red().to_string(),
    }
}

pub fn credits(credits: u64) -> String {
    format!("{} {}", "Credits:".bold(), credits.to_string().bright_yellow())
}

pub fn lines(lines: &[Line]) -> String {
    lines.iter().map(|l| l.label()).collect::<Vec<_>>().join(", ")
}
