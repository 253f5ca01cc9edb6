use serde::{Deserialize, Serialize};

use crate::symbols::Grid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LineKind {
    Row(u8),
    Column(u8),
    /// top-left to bottom-right
    Diagonal,
    /// top-right to bottom-left
    AntiDiagonal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Line {
    pub kind: LineKind,
    pub cells: [(usize, usize); 3],
}

impl Line {
    const fn row(r: usize) -> Self {
        Self {
            kind: LineKind::Row(r as u8),
            cells: [(r, 0), (r, 1), (r, 2)],
        }
    }

    const fn column(c: usize) -> Self {
        Self {
            kind: LineKind::Column(c as u8),
            cells: [(0, c), (1, c), (2, c)],
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }

    pub fn label(&self) -> String {
        match self.kind {
            LineKind::Row(r) => format!("row {}", r + 1),
            LineKind::Column(c) => format!("column {}", c + 1),
            LineKind::Diagonal => "diagonal".to_string(),
            LineKind::AntiDiagonal => "anti-diagonal".to_string(),
        }
    }

    /// All three cells hold the same symbol; a blank cell never matches.
    pub fn is_match(&self, grid: &Grid) -> bool {
        let [a, b, c] = self.cells.map(|(r, col)| grid.get(r, col));
        matches!(a, Some(sym) if b == Some(sym) && c == Some(sym))
    }
}

/// The eight paylines in evaluation order.
pub const LINES: [Line; 8] = [
    Line::row(0),
    Line::row(1),
    Line::row(2),
    Line::column(0),
    Line::column(1),
    Line::column(2),
    Line {
        kind: LineKind::Diagonal,
        cells: [(0, 0), (1, 1), (2, 2)],
    },
    Line {
        kind: LineKind::AntiDiagonal,
        cells: [(0, 2), (1, 1), (2, 0)],
    },
];

/// Returns every matched line, rows first, then columns, then the two diagonals.
pub fn winning_lines(grid: &Grid) -> Vec<Line> {
    LINES.iter().filter(|line| line.is_match(grid)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol::{self, *};

    fn grid(rows: [[Symbol; 3]; 3]) -> Grid {
        Grid::filled(rows)
    }

    fn scattered() -> Grid {
        grid([[Cherry, Lemon, Grape], [Bell, Star, Diamond], [Seven, Cherry, Lemon]])
    }

    #[test]
    fn detects_each_row() {
        for r in 0..3 {
            let mut g = scattered();
            for c in 0..3 {
                g.set(r, c, Some(Seven));
            }
            let lines = winning_lines(&g);
            assert!(lines.iter().any(|l| l.kind == LineKind::Row(r as u8)), "row {r}");
        }
    }

    #[test]
    fn detects_each_column() {
        for c in 0..3 {
            let mut g = scattered();
            for r in 0..3 {
                g.set(r, c, Some(Diamond));
            }
            let lines = winning_lines(&g);
            let kind = LineKind::Column(c as u8);
            assert!(lines.iter().any(|l| l.kind == kind), "column {c}");
        }
    }

    #[test]
    fn detects_both_diagonals() {
        let g = grid([[Bell, Lemon, Bell], [Grape, Bell, Star], [Bell, Cherry, Bell]]);
        let kinds: Vec<LineKind> = winning_lines(&g).iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::Diagonal, LineKind::AntiDiagonal]);
    }

    #[test]
    fn no_match_yields_nothing() {
        assert!(winning_lines(&scattered()).is_empty());
    }

    #[test]
    fn blank_cells_never_win() {
        assert!(winning_lines(&Grid::empty()).is_empty());
        let mut g = grid([[Star, Star, Star], [Bell, Lemon, Diamond], [Seven, Cherry, Lemon]]);
        g.set(0, 1, None);
        assert!(winning_lines(&g).is_empty());
    }

    #[test]
    fn uniform_grid_emits_all_lines_in_order() {
        let g = grid([[Cherry; 3]; 3]);
        assert_eq!(winning_lines(&g), LINES.to_vec());
    }

    #[test]
    fn line_membership() {
        assert!(LINES[7].contains(1, 1));
        assert!(LINES[7].contains(2, 0));
        assert!(!LINES[7].contains(0, 0));
        assert_eq!(LINES[4].label(), "column 2");
    }
}
