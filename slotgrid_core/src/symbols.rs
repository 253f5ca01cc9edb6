use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseGridError, ParseSymbolError};

pub const GRID_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symbol {
    Cherry,
    Lemon,
    Grape,
    Bell,
    Star,
    Diamond,
    Seven,
}

impl Symbol {
    pub const ALL: [Symbol; 7] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Grape,
        Symbol::Bell,
        Symbol::Star,
        Symbol::Diamond,
        Symbol::Seven,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(i: u8) -> Self {
        Self::ALL[i as usize % Self::COUNT]
    }

    pub fn to_index(self) -> u8 {
        match self {
            Symbol::Cherry => 0,
            Symbol::Lemon => 1,
            Symbol::Grape => 2,
            Symbol::Bell => 3,
            Symbol::Star => 4,
            Symbol::Diamond => 5,
            Symbol::Seven => 6,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Lemon => "🍋",
            Symbol::Grape => "🍇",
            Symbol::Bell => "🔔",
            Symbol::Star => "⭐",
            Symbol::Diamond => "💎",
            Symbol::Seven => "7️⃣",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Cherry => "cherry",
            Symbol::Lemon => "lemon",
            Symbol::Grape => "grape",
            Symbol::Bell => "bell",
            Symbol::Star => "star",
            Symbol::Diamond => "diamond",
            Symbol::Seven => "seven",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl FromStr for Symbol {
    type Err = ParseSymbolError;

    /// Accepts a glyph, a name (any case) or "7".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // the keycap seven is sometimes typed without its variation selector
        if s == "7" || s == "7\u{20e3}" {
            return Ok(Symbol::Seven);
        }
        Symbol::ALL
            .iter()
            .copied()
            .find(|sym| sym.glyph() == s || sym.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSymbolError(s.to_string()))
    }
}

/// A grid cell; `None` is the blank cell shown before the first spin.
pub type Cell = Option<Symbol>;

/// Row-major 3x3 grid.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Grid(pub [[Cell; GRID_SIZE]; GRID_SIZE]);

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn filled(rows: [[Symbol; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self(rows.map(|row| row.map(Some)))
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.0[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.0[row][col] = cell;
    }

    pub fn is_empty(&self) -> bool {
        self.cells().all(|c| c.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.cells().all(|c| c.is_some())
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                f.write_str(";")?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(",")?;
                }
                match cell {
                    Some(sym) => f.write_str(sym.glyph())?,
                    None => f.write_str("_")?,
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses the `Display` form: rows split by `;`, cells by `,`, `_` for blank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split(';').collect();
        if rows.len() != GRID_SIZE {
            return Err(ParseGridError::Rows(rows.len()));
        }
        let mut grid = Grid::empty();
        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<&str> = row.split(',').collect();
            if cells.len() != GRID_SIZE {
                return Err(ParseGridError::Columns {
                    row: r,
                    found: cells.len(),
                });
            }
            for (c, cell) in cells.iter().enumerate() {
                let cell = cell.trim();
                if cell != "_" {
                    grid.set(r, c, Some(cell.parse()?));
                }
            }
        }
        Ok(grid)
    }
}
