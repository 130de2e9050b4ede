use crate::{
    ConnectFourAddPlayerError, ConnectFourBoard, ConnectFourColor, ConnectFourCoord,
    ConnectFourCreateBoardError, ConnectFourEvent, ConnectFourPlayError,
    ConnectFourStartRoundError, ConnectFourTryAgainReason,
};

/// A Connect Four player. Identity (name and color) is fixed once added;
/// only the win count changes, one increment per round won.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectFourPlayer {
    pub name: String,
    pub color: ConnectFourColor,
    pub num_wins: usize,
}

impl ConnectFourPlayer {
    pub fn new(name: &str, color: ConnectFourColor) -> Self {
        ConnectFourPlayer {
            name: name.to_string(),
            color,
            num_wins: 0,
        }
    }
}

impl std::fmt::Display for ConnectFourPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.name, self.color)
    }
}

/// Owns the board, the player roster, and the round lifecycle.
///
/// Dependencies between the commands:
///
/// - `create_board` and `add_player` must both be called at least once
///   before `start_round`; neither can be called again once the first round
///   has started.
/// - If `create_board` is called more than once, the old board is replaced.
/// - `start_round` can only be called again after a win or draw.
/// - `play` can only be called while a round is in progress.
///
/// Every command validates first, then mutates, then emits its events to
/// the registered subscribers synchronously and in order. A failed command
/// leaves the session exactly as it was.
pub struct ConnectFourSession {
    board: Option<ConnectFourBoard>,
    players: Vec<ConnectFourPlayer>,
    used_colors: fixed_map::Set<ConnectFourColor>,
    session_started: bool,
    round_in_progress: bool,
    round_number: usize,
    first_player_index: usize,
    current_player_index: usize,
    subscribers: Vec<Box<dyn FnMut(&ConnectFourEvent)>>,
}

impl ConnectFourSession {
    pub fn new() -> Self {
        ConnectFourSession {
            board: None,
            players: Vec::new(),
            used_colors: fixed_map::Set::new(),
            session_started: false,
            round_in_progress: false,
            round_number: 0,
            first_player_index: 0,
            current_player_index: 0,
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber that is called for every emitted event.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&ConnectFourEvent) + 'static,
    {
        self.subscribers.push(Box::new(listener));
    }

    fn emit(&mut self, event: ConnectFourEvent) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }

    /// Creates a playing board, replacing any board installed before.
    /// Emits `BoardCreated`.
    pub fn create_board(
        &mut self,
        num_rows: usize,
        num_columns: usize,
        num_to_win: usize,
    ) -> Result<(), ConnectFourCreateBoardError> {
        if self.session_started {
            return Err(ConnectFourCreateBoardError::SessionAlreadyStarted);
        }
        let board = ConnectFourBoard::new(num_rows, num_columns, num_to_win)
            .map_err(|_| ConnectFourCreateBoardError::InvalidDimension)?;
        self.board = Some(board);
        self.emit(ConnectFourEvent::BoardCreated {
            num_rows,
            num_columns,
            num_to_win,
        });
        Ok(())
    }

    /// Adds a player to the end of the seating order. Names need not be
    /// unique (two Emilys are told apart by color); colors must be. Emits
    /// `PlayerAdded`.
    pub fn add_player(
        &mut self,
        name: &str,
        color: ConnectFourColor,
    ) -> Result<(), ConnectFourAddPlayerError> {
        if self.session_started {
            return Err(ConnectFourAddPlayerError::SessionAlreadyStarted);
        }
        if name.is_empty() {
            return Err(ConnectFourAddPlayerError::EmptyName);
        }
        if self.used_colors.contains(color) {
            return Err(ConnectFourAddPlayerError::ColorInUse);
        }
        self.used_colors.insert(color);
        let player = ConnectFourPlayer::new(name, color);
        self.players.push(player.clone());
        self.emit(ConnectFourEvent::PlayerAdded { player });
        Ok(())
    }

    /// Starts a new round: resets the board, rotates who goes first, and
    /// emits `RoundStarted` followed by `NextPlayer`.
    pub fn start_round(&mut self) -> Result<(), ConnectFourStartRoundError> {
        if self.round_in_progress {
            return Err(ConnectFourStartRoundError::RoundAlreadyInProgress);
        }
        if self.board.is_none() {
            return Err(ConnectFourStartRoundError::NoBoard);
        }
        if self.players.is_empty() {
            return Err(ConnectFourStartRoundError::NoPlayers);
        }

        self.board
            .as_mut()
            .expect("board presence checked above")
            .reset();
        self.session_started = true;
        self.round_in_progress = true;
        self.round_number += 1;
        self.current_player_index = self.first_player_index;
        // The next round starts with the player after this round's opener.
        self.first_player_index = (self.first_player_index + 1) % self.players.len();

        let round_number = self.round_number;
        self.emit(ConnectFourEvent::RoundStarted { round_number });
        let player = self.players[self.current_player_index].clone();
        self.emit(ConnectFourEvent::NextPlayer { player });
        Ok(())
    }

    /// Plays a disc for the current player.
    ///
    /// An illegal column is not an error: it is answered with a `TryAgain`
    /// event and the same player stays current. A legal play emits
    /// `DiscPlayed` and then exactly one of `RoundWon`, `RoundDraw`, or
    /// `NextPlayer`. The win check runs before the full-board check, so a
    /// winning disc in the last empty cell wins rather than draws.
    pub fn play(&mut self, column: i32) -> Result<(), ConnectFourPlayError> {
        if !self.round_in_progress {
            return Err(ConnectFourPlayError::RoundNotInProgress);
        }
        let board = self
            .board
            .as_ref()
            .expect("a round in progress requires a board");

        if !board.is_column_in_bounds(column) {
            let player = self.current_player_snapshot();
            self.emit(ConnectFourEvent::TryAgain {
                player,
                reason: ConnectFourTryAgainReason::ColumnOutOfBounds,
            });
            return Ok(());
        }
        if board
            .is_column_full(column)
            .expect("column bounds checked above")
        {
            let player = self.current_player_snapshot();
            self.emit(ConnectFourEvent::TryAgain {
                player,
                reason: ConnectFourTryAgainReason::ColumnFull,
            });
            return Ok(());
        }

        let color = self.players[self.current_player_index].color;
        let board = self
            .board
            .as_mut()
            .expect("a round in progress requires a board");
        let row = board
            .drop_disc(color, column)
            .expect("column checked playable above");
        let pos = ConnectFourCoord::new(row, column);
        let winning_positions = board.get_winning_positions(pos);
        let board_full = board.is_full();

        let player = self.current_player_snapshot();
        self.emit(ConnectFourEvent::DiscPlayed { player, color, pos });

        if !winning_positions.is_empty() {
            self.round_in_progress = false;
            self.players[self.current_player_index].num_wins += 1;
            let player = self.current_player_snapshot();
            self.emit(ConnectFourEvent::RoundWon {
                player,
                winning_positions,
            });
        } else if board_full {
            self.round_in_progress = false;
            self.emit(ConnectFourEvent::RoundDraw);
        } else {
            self.current_player_index = (self.current_player_index + 1) % self.players.len();
            let player = self.current_player_snapshot();
            self.emit(ConnectFourEvent::NextPlayer { player });
        }
        Ok(())
    }

    fn current_player_snapshot(&self) -> ConnectFourPlayer {
        self.players[self.current_player_index].clone()
    }

    pub fn current_player(&self) -> Option<&ConnectFourPlayer> {
        self.players.get(self.current_player_index)
    }

    pub fn players(&self) -> &[ConnectFourPlayer] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn board(&self) -> Option<&ConnectFourBoard> {
        self.board.as_ref()
    }

    pub fn board_dimensions(&self) -> Option<(usize, usize)> {
        self.board
            .as_ref()
            .map(|board| (board.num_rows, board.num_columns))
    }

    pub fn num_to_win(&self) -> Option<usize> {
        self.board.as_ref().map(|board| board.num_to_win)
    }

    /// The colors not yet claimed by any player.
    pub fn remaining_colors(&self) -> Vec<ConnectFourColor> {
        ConnectFourColor::ALL
            .iter()
            .copied()
            .filter(|&color| !self.used_colors.contains(color))
            .collect()
    }

    pub fn round_number(&self) -> usize {
        self.round_number
    }

    pub fn is_session_started(&self) -> bool {
        self.session_started
    }

    pub fn is_round_in_progress(&self) -> bool {
        self.round_in_progress
    }
}

impl Default for ConnectFourSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    const TEST_ROWS: usize = 4;
    const TEST_COLUMNS: usize = 6;
    const TEST_TO_WIN: usize = 4;

    const ALICE: &str = "Alice";
    const BOB: &str = "Bob";

    const BROWN: ConnectFourColor = ConnectFourColor::Brown;
    const GREEN: ConnectFourColor = ConnectFourColor::Green;
    const PINK: ConnectFourColor = ConnectFourColor::Pink;

    /// The moves of the diagonal-win game: Alice's final disc lands at
    /// (3, 5) and completes the down-right diagonal from (0, 2).
    const WINNING_GAME: [i32; 15] = [1, 2, 2, 2, 2, 3, 3, 0, 3, 4, 4, 3, 4, 4, 5];

    fn test_session() -> ConnectFourSession {
        let mut session = ConnectFourSession::new();
        session.add_player(ALICE, BROWN).expect("Failed to add player");
        session.add_player(BOB, PINK).expect("Failed to add player");
        session
            .create_board(TEST_ROWS, TEST_COLUMNS, TEST_TO_WIN)
            .expect("Failed to create board");
        session
    }

    fn record_events(session: &mut ConnectFourSession) -> Rc<RefCell<Vec<ConnectFourEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.add_listener(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    fn current_name(session: &ConnectFourSession) -> &str {
        &session.current_player().expect("Should have a player").name
    }

    #[test]
    fn test_flags_before_first_round() {
        let session = test_session();
        assert!(!session.is_session_started());
        assert!(!session.is_round_in_progress());
        assert_eq!(session.round_number(), 0);
    }

    #[test]
    fn test_queries_before_first_round() {
        let session = test_session();
        assert_eq!(session.board_dimensions(), Some((TEST_ROWS, TEST_COLUMNS)));
        assert_eq!(session.num_to_win(), Some(TEST_TO_WIN));
        assert_eq!(session.num_players(), 2);
        assert_eq!(current_name(&session), ALICE);

        let remaining = session.remaining_colors();
        assert_eq!(remaining.len(), ConnectFourColor::ALL.len() - 2);
        assert!(!remaining.contains(&BROWN));
        assert!(!remaining.contains(&PINK));
        assert!(remaining.contains(&GREEN));
    }

    #[test]
    fn test_queries_without_board_or_players() {
        let session = ConnectFourSession::new();
        assert_eq!(session.board_dimensions(), None);
        assert_eq!(session.num_to_win(), None);
        assert!(session.board().is_none());
        assert_eq!(session.num_players(), 0);
        assert!(session.current_player().is_none());
        assert_eq!(session.remaining_colors().len(), ConnectFourColor::ALL.len());
    }

    #[test]
    fn test_create_board_replaces_previous() {
        let mut session = test_session();
        session.create_board(9, 9, 5).expect("Failed to replace board");
        assert_eq!(session.board_dimensions(), Some((9, 9)));
        assert_eq!(session.num_to_win(), Some(5));
    }

    #[test]
    fn test_create_board_invalid_dimension() {
        let mut session = ConnectFourSession::new();
        assert_eq!(
            session.create_board(0, 6, 4),
            Err(ConnectFourCreateBoardError::InvalidDimension)
        );
        assert!(session.board().is_none());
    }

    #[test]
    fn test_add_player_empty_name() {
        let mut session = ConnectFourSession::new();
        assert_eq!(
            session.add_player("", BROWN),
            Err(ConnectFourAddPlayerError::EmptyName)
        );
        assert_eq!(session.num_players(), 0);
    }

    #[test]
    fn test_add_player_duplicate_color() {
        let mut session = ConnectFourSession::new();
        session.add_player(ALICE, BROWN).unwrap();
        assert_eq!(
            session.add_player(BOB, BROWN),
            Err(ConnectFourAddPlayerError::ColorInUse)
        );
        assert_eq!(session.num_players(), 1);
        // A freed name with a fresh color is fine.
        assert!(session.add_player(ALICE, PINK).is_ok());
    }

    #[test]
    fn test_setup_rejected_after_session_started() {
        let mut session = test_session();
        session.start_round().unwrap();
        assert_eq!(
            session.add_player("Carol", GREEN),
            Err(ConnectFourAddPlayerError::SessionAlreadyStarted)
        );
        assert_eq!(
            session.create_board(TEST_ROWS, TEST_COLUMNS, TEST_TO_WIN),
            Err(ConnectFourCreateBoardError::SessionAlreadyStarted)
        );
        // Still rejected between rounds: the roster is fixed for the session.
        for column in WINNING_GAME {
            session.play(column).unwrap();
        }
        assert!(!session.is_round_in_progress());
        assert_eq!(
            session.add_player("Carol", GREEN),
            Err(ConnectFourAddPlayerError::SessionAlreadyStarted)
        );
    }

    #[test]
    fn test_start_round_requires_board_and_players() {
        let mut session = ConnectFourSession::new();
        session.add_player(ALICE, BROWN).unwrap();
        assert_eq!(
            session.start_round(),
            Err(ConnectFourStartRoundError::NoBoard)
        );

        let mut session = ConnectFourSession::new();
        session.create_board(TEST_ROWS, TEST_COLUMNS, TEST_TO_WIN).unwrap();
        assert_eq!(
            session.start_round(),
            Err(ConnectFourStartRoundError::NoPlayers)
        );
    }

    #[test]
    fn test_start_round_twice() {
        let mut session = test_session();
        session.start_round().unwrap();
        assert_eq!(
            session.start_round(),
            Err(ConnectFourStartRoundError::RoundAlreadyInProgress)
        );
    }

    #[test]
    fn test_play_before_round_started() {
        let mut session = test_session();
        assert_eq!(session.play(0), Err(ConnectFourPlayError::RoundNotInProgress));
    }

    #[test]
    fn test_setup_events() {
        let mut session = ConnectFourSession::new();
        let events = record_events(&mut session);
        session.add_player(ALICE, BROWN).unwrap();
        session.create_board(TEST_ROWS, TEST_COLUMNS, TEST_TO_WIN).unwrap();
        assert_eq!(
            *events.borrow(),
            vec![
                ConnectFourEvent::PlayerAdded {
                    player: ConnectFourPlayer::new(ALICE, BROWN),
                },
                ConnectFourEvent::BoardCreated {
                    num_rows: TEST_ROWS,
                    num_columns: TEST_COLUMNS,
                    num_to_win: TEST_TO_WIN,
                },
            ]
        );
    }

    #[test]
    fn test_start_round_events() {
        let mut session = test_session();
        let events = record_events(&mut session);
        session.start_round().unwrap();
        assert!(session.is_session_started());
        assert!(session.is_round_in_progress());
        assert_eq!(session.round_number(), 1);
        assert_eq!(
            *events.borrow(),
            vec![
                ConnectFourEvent::RoundStarted { round_number: 1 },
                ConnectFourEvent::NextPlayer {
                    player: ConnectFourPlayer::new(ALICE, BROWN),
                },
            ]
        );
    }

    #[test]
    fn test_play_advances_to_next_player() {
        let mut session = test_session();
        session.start_round().unwrap();
        let events = record_events(&mut session);
        session.play(1).unwrap();
        assert_eq!(current_name(&session), BOB);
        assert_eq!(
            *events.borrow(),
            vec![
                ConnectFourEvent::DiscPlayed {
                    player: ConnectFourPlayer::new(ALICE, BROWN),
                    color: BROWN,
                    pos: ConnectFourCoord::new(3, 1),
                },
                ConnectFourEvent::NextPlayer {
                    player: ConnectFourPlayer::new(BOB, PINK),
                },
            ]
        );
    }

    #[test]
    fn test_try_again_column_out_of_bounds() {
        let mut session = test_session();
        session.start_round().unwrap();
        let events = record_events(&mut session);
        session.play(-1).unwrap();
        session.play(TEST_COLUMNS as i32).unwrap();
        assert_eq!(current_name(&session), ALICE);
        assert_eq!(
            *events.borrow(),
            vec![
                ConnectFourEvent::TryAgain {
                    player: ConnectFourPlayer::new(ALICE, BROWN),
                    reason: ConnectFourTryAgainReason::ColumnOutOfBounds,
                };
                2
            ]
        );
    }

    #[test]
    fn test_try_again_column_full() {
        let mut session = test_session();
        session.start_round().unwrap();
        for _ in 0..TEST_ROWS {
            session.play(0).unwrap();
        }
        let current_before = session.current_player().unwrap().clone();
        let events = record_events(&mut session);
        session.play(0).unwrap();
        // The rejected move changes nothing: same player is still current.
        assert_eq!(session.current_player(), Some(&current_before));
        assert_eq!(
            *events.borrow(),
            vec![ConnectFourEvent::TryAgain {
                player: current_before,
                reason: ConnectFourTryAgainReason::ColumnFull,
            }]
        );
    }

    #[test]
    fn test_winning_game() {
        let mut session = test_session();
        session.start_round().unwrap();
        let events = record_events(&mut session);
        for column in WINNING_GAME {
            session.play(column).unwrap();
        }
        assert!(!session.is_round_in_progress());
        assert!(session.is_session_started());

        let alice = &session.players()[0];
        let bob = &session.players()[1];
        assert_eq!(alice.name, ALICE);
        assert_eq!(alice.num_wins, 1);
        assert_eq!(bob.num_wins, 0);

        let mut winner = ConnectFourPlayer::new(ALICE, BROWN);
        winner.num_wins = 1;
        let expected_positions: HashSet<ConnectFourCoord> = [(0, 2), (1, 3), (2, 4), (3, 5)]
            .into_iter()
            .map(|(row, column)| ConnectFourCoord::new(row, column))
            .collect();
        assert_eq!(
            events.borrow().last(),
            Some(&ConnectFourEvent::RoundWon {
                player: winner,
                winning_positions: expected_positions,
            })
        );
    }

    #[test]
    fn test_first_player_rotates_across_rounds() {
        let mut session = test_session();
        session.start_round().unwrap();
        assert_eq!(current_name(&session), ALICE);
        for column in WINNING_GAME {
            session.play(column).unwrap();
        }
        session.start_round().unwrap();
        assert_eq!(session.round_number(), 2);
        assert_eq!(current_name(&session), BOB);
        for column in WINNING_GAME {
            session.play(column).unwrap();
        }
        session.start_round().unwrap();
        assert_eq!(current_name(&session), ALICE);
    }

    #[test]
    fn test_turn_rotation_returns_to_first() {
        let mut session = ConnectFourSession::new();
        session.add_player(ALICE, BROWN).unwrap();
        session.add_player(BOB, PINK).unwrap();
        session.add_player("Carol", GREEN).unwrap();
        session.create_board(TEST_ROWS, TEST_COLUMNS, TEST_TO_WIN).unwrap();
        session.start_round().unwrap();

        assert_eq!(current_name(&session), ALICE);
        for column in 0..3 {
            session.play(column).unwrap();
        }
        assert_eq!(current_name(&session), ALICE);
    }

    #[test]
    fn test_draw_on_full_board() {
        // On a 2x2 board with three to win, four discs always draw.
        let mut session = ConnectFourSession::new();
        session.add_player(ALICE, BROWN).unwrap();
        session.add_player(BOB, PINK).unwrap();
        session.create_board(2, 2, 3).unwrap();
        session.start_round().unwrap();
        let events = record_events(&mut session);
        for column in [0, 0, 1, 1] {
            session.play(column).unwrap();
        }
        assert!(!session.is_round_in_progress());
        assert_eq!(events.borrow().last(), Some(&ConnectFourEvent::RoundDraw));
        assert_eq!(session.players()[0].num_wins, 0);
        assert_eq!(session.players()[1].num_wins, 0);
    }

    #[test]
    fn test_win_on_last_cell_is_win_not_draw() {
        let mut session = ConnectFourSession::new();
        session.add_player(ALICE, BROWN).unwrap();
        session.create_board(1, 3, 3).unwrap();
        session.start_round().unwrap();
        let events = record_events(&mut session);
        for column in [0, 1, 2] {
            session.play(column).unwrap();
        }
        assert!(!session.is_round_in_progress());
        match events.borrow().last() {
            Some(ConnectFourEvent::RoundWon {
                player,
                winning_positions,
            }) => {
                assert_eq!(player.name, ALICE);
                assert_eq!(winning_positions.len(), 3);
            }
            other => panic!("Expected RoundWon, got {:?}", other),
        }
    }
}
