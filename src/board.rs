use std::collections::HashSet;

use crate::{ConnectFourAxis, ConnectFourBoardError, ConnectFourColor, ConnectFourCoord};

/// A Connect Four playing board: a fixed-size grid that discs drop into
/// under gravity, plus win detection from an arbitrary origin position.
/// The grid is a flat vector of optional colors indexed by coordinate,
/// where row 0 is the top row and row `num_rows - 1` is the bottom.
/// Dimensions never change after construction; only `reset` clears cells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectFourBoard {
    pub num_rows: usize,
    pub num_columns: usize,
    pub num_to_win: usize,
    grid: Vec<Option<ConnectFourColor>>,
}

impl ConnectFourBoard {
    /// Creates an empty board. `num_to_win` is not required to fit within
    /// either dimension; an oversized value makes the board unwinnable but
    /// is still a valid configuration.
    pub fn new(
        num_rows: usize,
        num_columns: usize,
        num_to_win: usize,
    ) -> Result<Self, ConnectFourBoardError> {
        if num_rows < 1 || num_columns < 1 || num_to_win < 1 {
            return Err(ConnectFourBoardError::InvalidDimension);
        }
        Ok(ConnectFourBoard {
            num_rows,
            num_columns,
            num_to_win,
            grid: vec![None; num_rows * num_columns],
        })
    }

    /// Resets the board for a new round, clearing every cell.
    pub fn reset(&mut self) {
        self.grid.fill(None);
    }

    pub fn is_row_in_bounds(&self, row: i32) -> bool {
        row >= 0 && (row as usize) < self.num_rows
    }

    pub fn is_column_in_bounds(&self, column: i32) -> bool {
        column >= 0 && (column as usize) < self.num_columns
    }

    pub fn is_in_bounds(&self, pos: ConnectFourCoord) -> bool {
        pos.is_valid(self.num_rows, self.num_columns)
    }

    /// Checks whether a column has no empty cell left, which is the case
    /// exactly when its top cell is occupied.
    pub fn is_column_full(&self, column: i32) -> Result<bool, ConnectFourBoardError> {
        if !self.is_column_in_bounds(column) {
            return Err(ConnectFourBoardError::OutOfBounds);
        }
        let top = ConnectFourCoord::new(0, column);
        Ok(top.get(&self.grid, self.num_rows, self.num_columns).is_some())
    }

    /// Checks whether every column is full.
    pub fn is_full(&self) -> bool {
        (0..self.num_columns as i32).all(|column| {
            self.is_column_full(column)
                .expect("column index from board range should be in bounds")
        })
    }

    /// Returns the disc at the given position, or `None` if the cell is
    /// empty.
    pub fn get_disc(
        &self,
        pos: ConnectFourCoord,
    ) -> Result<Option<ConnectFourColor>, ConnectFourBoardError> {
        pos.try_get(&self.grid, self.num_rows, self.num_columns)
            .copied()
            .ok_or(ConnectFourBoardError::OutOfBounds)
    }

    /// Drops a disc into a column. The disc lands in the lowest empty cell;
    /// the landing row is returned.
    pub fn drop_disc(
        &mut self,
        color: ConnectFourColor,
        column: i32,
    ) -> Result<i32, ConnectFourBoardError> {
        if self.is_column_full(column)? {
            return Err(ConnectFourBoardError::ColumnFull);
        }
        let mut row = self.num_rows as i32 - 1;
        while ConnectFourCoord::new(row, column)
            .get(&self.grid, self.num_rows, self.num_columns)
            .is_some()
        {
            row -= 1;
        }
        *ConnectFourCoord::new(row, column).get_mut(
            &mut self.grid,
            self.num_rows,
            self.num_columns,
        ) = Some(color);
        Ok(row)
    }

    /// Finds every winning run that passes through `origin`, reading the
    /// disc actually placed there. Returns the union of all runs of length
    /// at least `num_to_win` along the four axes, or the empty set if no
    /// axis qualifies or `origin` holds no disc.
    pub fn get_winning_positions(&self, origin: ConnectFourCoord) -> HashSet<ConnectFourCoord> {
        match self.get_disc(origin) {
            Ok(Some(color)) => self.get_winning_positions_with(origin, color),
            _ => HashSet::new(),
        }
    }

    /// Finds every winning run through `origin` as if `color` were placed
    /// there, without touching the board. Lets a caller probe whether a
    /// column would win before actually playing it.
    pub fn get_winning_positions_with(
        &self,
        origin: ConnectFourCoord,
        color: ConnectFourColor,
    ) -> HashSet<ConnectFourCoord> {
        let mut winning_positions = HashSet::new();
        for axis in ConnectFourAxis::ALL {
            let matches = self.consecutive_matches_mirrored(origin, axis, color);
            if matches.len() >= self.num_to_win {
                winning_positions.extend(matches);
            }
        }
        winning_positions
    }

    /// Matching positions along one axis through `origin`: the walk in the
    /// axis step direction unioned with the walk in its 180-degree mirror.
    fn consecutive_matches_mirrored(
        &self,
        origin: ConnectFourCoord,
        axis: ConnectFourAxis,
        color: ConnectFourColor,
    ) -> HashSet<ConnectFourCoord> {
        let (d_row, d_column) = axis.step();
        let mut positions = self.consecutive_matches(origin, (d_row, d_column), color);
        positions.extend(self.consecutive_matches(origin, (-d_row, -d_column), color));
        positions
    }

    /// Walks outward from `origin` one step at a time, collecting positions
    /// while the cells hold `color`. The origin itself is always included.
    fn consecutive_matches(
        &self,
        origin: ConnectFourCoord,
        step: (i32, i32),
        color: ConnectFourColor,
    ) -> HashSet<ConnectFourCoord> {
        let mut positions = HashSet::from([origin]);
        let mut current = origin.offset(step.0, step.1);
        while self
            .get_disc(current)
            .is_ok_and(|disc| disc == Some(color))
        {
            positions.insert(current);
            current = current.offset(step.0, step.1);
        }
        positions
    }

    /// Renders the grid as a compact string: rows from top to bottom joined
    /// by `/`, cells joined by `,`, a color's digit for occupied cells and
    /// `x`/`xN` for runs of empty cells.
    pub fn to_grid_string(&self) -> String {
        let mut rows = Vec::with_capacity(self.num_rows);
        for row in 0..self.num_rows as i32 {
            let mut tokens: Vec<String> = Vec::new();
            let mut empty_count = 0;
            for column in 0..self.num_columns as i32 {
                let pos = ConnectFourCoord::new(row, column);
                match pos.get(&self.grid, self.num_rows, self.num_columns) {
                    Some(color) => {
                        match empty_count {
                            0 => {}
                            1 => tokens.push("x".to_string()),
                            n => tokens.push(format!("x{}", n)),
                        }
                        empty_count = 0;
                        tokens.push(color.index().to_string());
                    }
                    None => empty_count += 1,
                }
            }
            match empty_count {
                0 => {}
                1 => tokens.push("x".to_string()),
                n => tokens.push(format!("x{}", n)),
            }
            rows.push(tokens.join(","));
        }
        rows.join("/")
    }

    /// Attempts to parse a board from the `to_grid_string` format. The
    /// column count is taken from the first row and every row must match
    /// it. Does not check the gravity invariant; see `validate`.
    pub fn try_from_grid_string(s: &str, num_to_win: usize) -> Option<Self> {
        if num_to_win < 1 {
            return None;
        }
        let mut num_columns = None;
        let mut grid = Vec::new();
        let mut num_rows = 0;
        for line in s.split('/') {
            let mut width = 0;
            for token in line.split(',') {
                if let Some(rest) = token.strip_prefix('x') {
                    let empty_count = if rest.is_empty() {
                        1
                    } else {
                        rest.parse::<usize>().ok()?
                    };
                    for _ in 0..empty_count {
                        grid.push(None);
                    }
                    width += empty_count;
                } else {
                    let index = token.parse::<usize>().ok()?;
                    grid.push(Some(ConnectFourColor::try_from_index(index)?));
                    width += 1;
                }
            }
            match num_columns {
                None => num_columns = Some(width),
                Some(w) if w != width => return None,
                Some(_) => {}
            }
            num_rows += 1;
        }
        let num_columns = num_columns.filter(|&w| w > 0)?;
        Some(ConnectFourBoard {
            num_rows,
            num_columns,
            num_to_win,
            grid,
        })
    }

    /// Checks the board state for consistency: dimensions, grid length, and
    /// the gravity invariant that no disc sits above an empty cell.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_rows < 1 || self.num_columns < 1 || self.num_to_win < 1 {
            return Err("Board dimensions and number to win must be at least 1".to_string());
        }
        if self.grid.len() != self.num_rows * self.num_columns {
            return Err(format!(
                "Grid size mismatch: expected {}, got {}",
                self.num_rows * self.num_columns,
                self.grid.len()
            ));
        }
        for column in 0..self.num_columns as i32 {
            let mut seen_disc = false;
            for row in 0..self.num_rows as i32 {
                let pos = ConnectFourCoord::new(row, column);
                match pos.get(&self.grid, self.num_rows, self.num_columns) {
                    Some(_) => seen_disc = true,
                    None if seen_disc => {
                        return Err(format!("Column {} has a floating disc", column));
                    }
                    None => {}
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for ConnectFourBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows x {} columns ({} to win)",
            self.num_rows, self.num_columns, self.num_to_win
        )
    }
}
