mod board;
mod coord;
mod event;
mod logger;
mod session;

pub use board::*;
pub use coord::*;
pub use event::*;
pub use logger::*;
pub use session::*;

pub const DEFAULT_NUM_ROWS: usize = 6;
pub const DEFAULT_NUM_COLUMNS: usize = 7;
pub const DEFAULT_NUM_TO_WIN: usize = 4;

/// The color of a player's discs. Two discs match iff their colors are equal;
/// the board compares nothing else about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, fixed_map::Key)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourColor {
    Black,
    Red,
    Blue,
    Purple,
    Brown,
    DarkGreen,
    Pink,
    Gray,
    Orange,
    Green,
}

impl ConnectFourColor {
    pub const ALL: [ConnectFourColor; 10] = [
        ConnectFourColor::Black,
        ConnectFourColor::Red,
        ConnectFourColor::Blue,
        ConnectFourColor::Purple,
        ConnectFourColor::Brown,
        ConnectFourColor::DarkGreen,
        ConnectFourColor::Pink,
        ConnectFourColor::Gray,
        ConnectFourColor::Orange,
        ConnectFourColor::Green,
    ];

    /// Stable index of this color, also used as its grid string digit.
    pub fn index(&self) -> usize {
        match self {
            ConnectFourColor::Black => 0,
            ConnectFourColor::Red => 1,
            ConnectFourColor::Blue => 2,
            ConnectFourColor::Purple => 3,
            ConnectFourColor::Brown => 4,
            ConnectFourColor::DarkGreen => 5,
            ConnectFourColor::Pink => 6,
            ConnectFourColor::Gray => 7,
            ConnectFourColor::Orange => 8,
            ConnectFourColor::Green => 9,
        }
    }

    pub fn try_from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Why the current player must pick another column. Reported through the
/// `TryAgain` event, never as an error: an illegal column choice is part of
/// normal interactive play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourTryAgainReason {
    ColumnOutOfBounds,
    ColumnFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourBoardError {
    #[error("board dimensions and number to win must be at least 1")]
    InvalidDimension,
    #[error("position is out of bounds")]
    OutOfBounds,
    #[error("column is full")]
    ColumnFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourCreateBoardError {
    #[error("cannot create a board once the session has started")]
    SessionAlreadyStarted,
    #[error("board dimensions and number to win must be at least 1")]
    InvalidDimension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourAddPlayerError {
    #[error("cannot add a player once the session has started")]
    SessionAlreadyStarted,
    #[error("player name must be non-empty")]
    EmptyName,
    #[error("color is already used by another player")]
    ColorInUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourStartRoundError {
    #[error("cannot start a round with another in progress")]
    RoundAlreadyInProgress,
    #[error("cannot start a round with no board")]
    NoBoard,
    #[error("cannot start a round with no players")]
    NoPlayers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourPlayError {
    #[error("cannot play a disc before the round has started")]
    RoundNotInProgress,
}
