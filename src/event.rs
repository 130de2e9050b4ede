use std::collections::HashSet;

use crate::{ConnectFourColor, ConnectFourCoord, ConnectFourPlayer, ConnectFourTryAgainReason};

/// An outcome notification emitted by the session. Subscribers receive
/// every event of a command, in order, before the command returns.
///
/// Player payloads are snapshots taken at emission time, so `RoundWon`
/// already carries the winner's incremented win count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectFourEvent {
    BoardCreated {
        num_rows: usize,
        num_columns: usize,
        num_to_win: usize,
    },
    PlayerAdded {
        player: ConnectFourPlayer,
    },
    RoundStarted {
        round_number: usize,
    },
    NextPlayer {
        player: ConnectFourPlayer,
    },
    TryAgain {
        player: ConnectFourPlayer,
        reason: ConnectFourTryAgainReason,
    },
    DiscPlayed {
        player: ConnectFourPlayer,
        color: ConnectFourColor,
        pos: ConnectFourCoord,
    },
    RoundWon {
        player: ConnectFourPlayer,
        winning_positions: HashSet<ConnectFourCoord>,
    },
    RoundDraw,
}
