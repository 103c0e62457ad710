use std::fmt;
use std::str::FromStr;

use super::Player;
use crate::error::BoardParseError;

pub const SIZE: usize = 8;

/// The eight compass offsets `(d_row, d_col)` a line of flips can run along.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'B',
            Cell::White => 'W',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// Create a board with the standard opening layout:
    /// (3,3) and (4,4) White, (3,4) and (4,3) Black.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;
        Board { cells }
    }

    /// Get the cell at a specific position. Row 0 is the top.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Check whether `player` may place a piece at (row, col).
    ///
    /// The cell must be empty and at least one direction must run over one or
    /// more opponent pieces and end on one of `player`'s own pieces. Pure with
    /// respect to `player`: it need not be the player to move.
    pub fn is_valid_move(&self, row: usize, col: usize, player: Player) -> bool {
        if row >= SIZE || col >= SIZE || self.cells[row][col] != Cell::Empty {
            return false;
        }

        let own = player.to_cell();
        for (d_row, d_col) in DIRECTIONS {
            let mut pos = step(row, col, d_row, d_col);
            let mut seen_opponent = false;
            while let Some((r, c)) = pos {
                match self.cells[r][c] {
                    Cell::Empty => break,
                    cell if cell == own => {
                        if seen_opponent {
                            return true;
                        }
                        break;
                    }
                    _ => seen_opponent = true,
                }
                pos = step(r, c, d_row, d_col);
            }
        }
        false
    }

    /// Place `player`'s piece at (row, col) and flip every bracketed line.
    ///
    /// Callers must check [`Board::is_valid_move`] first; the placement is not
    /// re-validated here. Each direction is resolved on its own. Returns the
    /// number of pieces flipped.
    pub fn apply_move(&mut self, row: usize, col: usize, player: Player) -> usize {
        let own = player.to_cell();
        self.cells[row][col] = own;

        let mut flipped = 0;
        let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(SIZE);
        for (d_row, d_col) in DIRECTIONS {
            candidates.clear();
            let mut pos = step(row, col, d_row, d_col);
            while let Some((r, c)) = pos {
                match self.cells[r][c] {
                    Cell::Empty => break,
                    cell if cell == own => {
                        for &(fr, fc) in &candidates {
                            self.cells[fr][fc] = own;
                        }
                        flipped += candidates.len();
                        break;
                    }
                    _ => candidates.push((r, c)),
                }
                pos = step(r, c, d_row, d_col);
            }
        }
        flipped
    }

    /// Check if `player` has at least one legal placement anywhere
    pub fn has_any_valid_move(&self, player: Player) -> bool {
        self.legal_moves(player).next().is_some()
    }

    /// All legal placements for `player`, in row-major order
    pub fn legal_moves(
        &self,
        player: Player,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.is_valid_move(row, col, player))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    /// Count pieces as `(black, white)`
    pub fn count_pieces(&self) -> (usize, usize) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                Cell::Empty => (black, white),
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// One step from (row, col) along (d_row, d_col), or `None` off the board.
fn step(row: usize, col: usize, d_row: isize, d_col: isize) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(d_row)?;
    let c = col.checked_add_signed(d_col)?;
    (r < SIZE && c < SIZE).then_some((r, c))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Parses eight lines of `B`, `W` and `.`; blank lines and spaces are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != SIZE {
            return Err(BoardParseError::RowCount(rows.len()));
        }

        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != SIZE {
                return Err(BoardParseError::RowLength {
                    row: r,
                    len: row.len(),
                });
            }
            for (c, &symbol) in row.iter().enumerate() {
                cells[r][c] = match symbol {
                    '.' => Cell::Empty,
                    'B' | 'b' => Cell::Black,
                    'W' | 'w' => Cell::White,
                    other => {
                        return Err(BoardParseError::UnknownSymbol {
                            symbol: other,
                            row: r,
                            col: c,
                        })
                    }
                };
            }
        }
        Ok(Board { cells })
    }
}
