use crate::{ConnectFourEvent, ConnectFourSession};

/// Registers a subscriber that writes one log line per game event, for
/// hosts that want a running record of a session without building a view.
/// Rejected moves are logged at warn level, everything else at info.
pub fn attach_event_logger(session: &mut ConnectFourSession) {
    session.add_listener(log_event);
}

fn log_event(event: &ConnectFourEvent) {
    match event {
        ConnectFourEvent::BoardCreated {
            num_rows,
            num_columns,
            num_to_win,
        } => log::info!(
            "board created: {} rows x {} columns ({} to win)",
            num_rows,
            num_columns,
            num_to_win
        ),
        ConnectFourEvent::PlayerAdded { player } => log::info!("player added: {}", player),
        ConnectFourEvent::RoundStarted { round_number } => {
            log::info!("round {} started", round_number)
        }
        ConnectFourEvent::NextPlayer { player } => log::info!("next turn: {}", player),
        ConnectFourEvent::TryAgain { player, reason } => {
            log::warn!("try again: {} ({:?})", player, reason)
        }
        ConnectFourEvent::DiscPlayed { player, pos, .. } => {
            log::info!("{} played at ({}, {})", player, pos.row, pos.column)
        }
        ConnectFourEvent::RoundWon {
            player,
            winning_positions,
        } => log::info!(
            "round won by {} with {} connected discs",
            player,
            winning_positions.len()
        ),
        ConnectFourEvent::RoundDraw => log::info!("round ended in a draw"),
    }
}
