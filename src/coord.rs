#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectFourCoord {
    pub row: i32,
    pub column: i32,
}

impl ConnectFourCoord {
    pub fn new(row: i32, column: i32) -> Self {
        ConnectFourCoord { row, column }
    }

    pub fn iter_board(
        num_rows: usize,
        num_columns: usize,
    ) -> impl Iterator<Item = ConnectFourCoord> {
        (0..num_rows).flat_map(move |row| {
            (0..num_columns).map(move |column| ConnectFourCoord::new(row as i32, column as i32))
        })
    }

    pub fn is_valid(&self, num_rows: usize, num_columns: usize) -> bool {
        self.row >= 0
            && self.column >= 0
            && (self.row as usize) < num_rows
            && (self.column as usize) < num_columns
    }

    pub fn offset(&self, d_row: i32, d_column: i32) -> Self {
        ConnectFourCoord {
            row: self.row + d_row,
            column: self.column + d_column,
        }
    }

    pub fn offset_axis(&self, axis: ConnectFourAxis, count: i32) -> Self {
        let (d_row, d_column) = axis.step();
        self.offset(d_row * count, d_column * count)
    }

    pub fn try_get<'a, T>(
        &self,
        grid: &'a [T],
        num_rows: usize,
        num_columns: usize,
    ) -> Option<&'a T> {
        if self.is_valid(num_rows, num_columns) {
            let index = (self.row as usize) * num_columns + (self.column as usize);
            grid.get(index)
        } else {
            None
        }
    }

    pub fn get<'a, T>(&self, grid: &'a [T], num_rows: usize, num_columns: usize) -> &'a T {
        self.try_get(grid, num_rows, num_columns)
            .expect("ConnectFourCoord should be valid")
    }

    pub fn try_get_mut<'a, T>(
        &self,
        grid: &'a mut [T],
        num_rows: usize,
        num_columns: usize,
    ) -> Option<&'a mut T> {
        if self.is_valid(num_rows, num_columns) {
            let index = (self.row as usize) * num_columns + (self.column as usize);
            grid.get_mut(index)
        } else {
            None
        }
    }

    pub fn get_mut<'a, T>(
        &self,
        grid: &'a mut [T],
        num_rows: usize,
        num_columns: usize,
    ) -> &'a mut T {
        self.try_get_mut(grid, num_rows, num_columns)
            .expect("ConnectFourCoord should be valid")
    }
}

/// One of the four straight lines a winning run can lie on. Each axis is
/// walked in its step direction and in the 180-degree mirror of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourAxis {
    Horizontal,
    Vertical,
    DiagonalDown,
    DiagonalUp,
}

impl ConnectFourAxis {
    pub const ALL: [ConnectFourAxis; 4] = [
        ConnectFourAxis::Horizontal,
        ConnectFourAxis::Vertical,
        ConnectFourAxis::DiagonalDown,
        ConnectFourAxis::DiagonalUp,
    ];

    /// The (row, column) step of this axis. Row 0 is the top of the board,
    /// so `DiagonalDown` descends to the right and `DiagonalUp` ascends.
    pub fn step(&self) -> (i32, i32) {
        match self {
            ConnectFourAxis::Horizontal => (0, 1),
            ConnectFourAxis::Vertical => (1, 0),
            ConnectFourAxis::DiagonalDown => (1, 1),
            ConnectFourAxis::DiagonalUp => (1, -1),
        }
    }
}
