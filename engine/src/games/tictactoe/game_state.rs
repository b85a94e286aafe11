use crate::error::{EngineError, Result};
use crate::games::SessionRng;
use crate::{debug_log, log};
use super::board::is_valid_move;
use super::bot_controller::{BotInput, calculate_move};
use super::stats::GameRecord;
use super::types::{BOARD_SIZE, Board, COMPUTER_MARK, Mark, Opponent, Outcome};
use super::win_detector::evaluate;

/// Authoritative state of one game: board, turn, move counter and the latch
/// that releases the finished game's record once.
#[derive(Debug)]
pub struct TicTacToeGameState {
    board: Board,
    opponent: Opponent,
    current_mark: Mark,
    moves_played: u32,
    status: Outcome,
    last_move: Option<usize>,
    record_taken: bool,
}

impl TicTacToeGameState {
    pub fn new(opponent: Opponent) -> Self {
        Self {
            board: Board::new(),
            opponent,
            current_mark: Mark::X,
            moves_played: 0,
            status: Outcome::InProgress,
            last_move: None,
            record_taken: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn opponent(&self) -> Opponent {
        self.opponent
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn status(&self) -> Outcome {
        self.status
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Rejected moves leave the state untouched.
    pub fn place_mark(&mut self, index: usize) -> std::result::Result<Outcome, String> {
        if self.status.is_terminal() {
            return Err("Game is already over".to_string());
        }

        if index >= BOARD_SIZE {
            return Err("Position out of bounds".to_string());
        }

        if !is_valid_move(&self.board, index) {
            return Err("Cell is already marked".to_string());
        }

        self.board.set(index, self.current_mark);
        self.last_move = Some(index);
        self.moves_played += 1;
        self.status = evaluate(&self.board);

        match self.status {
            Outcome::InProgress => self.switch_turn(),
            Outcome::Win { mark, line } => {
                log!("{} won on line {} after {} moves", mark, line, self.moves_played);
            }
            Outcome::Draw => {
                log!("Draw after {} moves", self.moves_played);
            }
        }

        Ok(self.status)
    }

    fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == Mark::X {
            Mark::O
        } else {
            Mark::X
        };
    }

    pub fn is_computer_turn(&self) -> bool {
        matches!(self.opponent, Opponent::Computer(_))
            && self.current_mark == COMPUTER_MARK
            && !self.status.is_terminal()
    }

    /// Plays the computer's move when it is the computer's turn; otherwise
    /// does nothing and returns `None`.
    pub fn play_computer_turn(&mut self, rng: &mut SessionRng) -> Result<Option<usize>> {
        let Opponent::Computer(difficulty) = self.opponent else {
            return Ok(None);
        };
        if !self.is_computer_turn() {
            return Ok(None);
        }

        let index = calculate_move(difficulty, BotInput::from_game_state(self), rng)?;
        self.place_mark(index)
            .map_err(EngineError::PreconditionViolation)?;
        Ok(Some(index))
    }

    /// Yields the record of a finished game exactly once.
    pub fn take_record(&mut self) -> Option<GameRecord> {
        if self.record_taken {
            return None;
        }
        let record = GameRecord::from_outcome(
            &self.status,
            self.moves_played,
            self.opponent.difficulty(),
        )?;
        self.record_taken = true;
        Some(record)
    }

    pub fn restart(&mut self) {
        debug_log!("Restarting game after {} moves", self.moves_played);
        *self = Self::new(self.opponent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::{Difficulty, LINES};

    fn play_all(state: &mut TicTacToeGameState, moves: &[usize]) {
        for &index in moves {
            state.place_mark(index).unwrap();
        }
    }

    #[test]
    fn test_new_game_starts_with_x() {
        let state = TicTacToeGameState::new(Opponent::Human);
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(state.moves_played(), 0);
        assert_eq!(state.status(), Outcome::InProgress);
        assert_eq!(state.last_move(), None);
    }

    #[test]
    fn test_place_mark_alternates_turns() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        state.place_mark(4).unwrap();
        assert_eq!(state.board().cell(4), Mark::X);
        assert_eq!(state.current_mark(), Mark::O);
        state.place_mark(0).unwrap();
        assert_eq!(state.board().cell(0), Mark::O);
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(state.moves_played(), 2);
        assert_eq!(state.last_move(), Some(0));
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_side_effects() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        state.place_mark(4).unwrap();
        assert!(state.place_mark(4).is_err());
        assert_eq!(state.board().cell(4), Mark::X);
        assert_eq!(state.current_mark(), Mark::O);
        assert_eq!(state.moves_played(), 1);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        assert!(state.place_mark(9).is_err());
        assert_eq!(state.moves_played(), 0);
    }

    #[test]
    fn test_moves_after_win_are_rejected() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        play_all(&mut state, &[0, 3, 1, 4, 2]);
        assert_eq!(state.status(), Outcome::Win { mark: Mark::X, line: LINES[0] });
        assert!(state.place_mark(8).is_err());
        assert_eq!(state.moves_played(), 5);
    }

    #[test]
    fn test_full_game_draw() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        play_all(&mut state, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(state.status(), Outcome::Draw);
        assert_eq!(state.moves_played(), 9);
    }

    #[test]
    fn test_record_is_released_once() {
        let mut state = TicTacToeGameState::new(Opponent::Computer(Difficulty::Easy));
        play_all(&mut state, &[0, 3, 1, 4, 2]);

        let record = state.take_record().unwrap();
        assert_eq!(record.winner(), Some(Mark::X));
        assert_eq!(record.moves_played(), 5);
        assert_eq!(record.difficulty(), Some(Difficulty::Easy));
        assert!(state.take_record().is_none());
    }

    #[test]
    fn test_no_record_while_in_progress() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        state.place_mark(0).unwrap();
        assert!(state.take_record().is_none());
    }

    #[test]
    fn test_restart_rearms_latch_and_keeps_opponent() {
        let opponent = Opponent::Computer(Difficulty::Hard);
        let mut state = TicTacToeGameState::new(opponent);
        play_all(&mut state, &[0, 3, 1, 4, 2]);
        assert!(state.take_record().is_some());

        state.restart();
        assert_eq!(state.opponent(), opponent);
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.moves_played(), 0);
        assert_eq!(state.current_mark(), Mark::X);

        play_all(&mut state, &[0, 3, 1, 4, 2]);
        assert!(state.take_record().is_some());
    }

    #[test]
    fn test_computer_plays_only_on_its_turn() {
        let mut state = TicTacToeGameState::new(Opponent::Computer(Difficulty::Hard));
        let mut rng = SessionRng::new(8);
        assert!(!state.is_computer_turn());
        assert_eq!(state.play_computer_turn(&mut rng).unwrap(), None);

        state.place_mark(0).unwrap();
        assert!(state.is_computer_turn());
        let index = state.play_computer_turn(&mut rng).unwrap();
        assert_eq!(index, Some(4));
        assert_eq!(state.board().cell(4), Mark::O);
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(state.moves_played(), 2);
    }

    #[test]
    fn test_human_opponent_never_plays() {
        let mut state = TicTacToeGameState::new(Opponent::Human);
        state.place_mark(0).unwrap();
        assert!(!state.is_computer_turn());
        assert_eq!(state.play_computer_turn(&mut SessionRng::new(1)).unwrap(), None);
    }
}
