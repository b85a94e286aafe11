mod board;
mod bot_controller;
mod game_state;
mod stats;
mod types;
mod win_detector;

pub use board::{get_available_moves, is_valid_move};
pub use bot_controller::{BotInput, calculate_move};
pub use game_state::TicTacToeGameState;
pub use stats::{
    AnalyticsSummary, DifficultyRecord, GameRecord, ResultDistribution, SessionStats, record_game,
};
pub use types::{BOARD_SIZE, Board, COMPUTER_MARK, Difficulty, LINES, Line, Mark, Opponent, Outcome};
pub use win_detector::{check_win, check_win_with_line, evaluate};
