use connectfour_core::{
    ConnectFourColor, ConnectFourSession, DEFAULT_NUM_COLUMNS, DEFAULT_NUM_ROWS,
    DEFAULT_NUM_TO_WIN, attach_event_logger,
};
use rand::Rng;

const NUM_ROUNDS: usize = 5;

fn main() {
    let _logger = flexi_logger::Logger::try_with_str("info")
        .expect("Failed to build logger spec")
        .start()
        .expect("Failed to start logger");

    let mut session = ConnectFourSession::new();
    attach_event_logger(&mut session);
    session
        .add_player("Robo One", ConnectFourColor::Red)
        .expect("Failed to add player");
    session
        .add_player("Robo Two", ConnectFourColor::Blue)
        .expect("Failed to add player");
    session
        .create_board(DEFAULT_NUM_ROWS, DEFAULT_NUM_COLUMNS, DEFAULT_NUM_TO_WIN)
        .expect("Failed to create board");

    let mut rng = rand::thread_rng();
    for _ in 0..NUM_ROUNDS {
        session.start_round().expect("Failed to start round");
        while session.is_round_in_progress() {
            // Full columns are answered with a try-again event and the same
            // player rolls a new column, so the loop always fills the board.
            let column = rng.gen_range(0..DEFAULT_NUM_COLUMNS as i32);
            session.play(column).expect("A round is in progress");
        }
    }

    for player in session.players() {
        println!("{}: {} wins", player, player.num_wins);
    }
}
