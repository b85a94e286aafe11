use crate::debug_log;
use crate::error::{EngineError, Result};
use crate::games::SessionRng;
use super::board::get_available_moves;
use super::game_state::TicTacToeGameState;
use super::types::{BOARD_SIZE, Board, Difficulty, LINES, Mark, Outcome};
use super::win_detector::evaluate;

const WIN_SCORE: i32 = 10;

pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, bot_mark: Mark) -> Self {
        Self { board, bot_mark }
    }

    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            bot_mark: state.current_mark(),
        }
    }
}

/// Picks a cell for `input.bot_mark`. The returned index is always an empty
/// cell of `input.board`.
pub fn calculate_move(
    difficulty: Difficulty,
    input: BotInput,
    rng: &mut SessionRng,
) -> Result<usize> {
    let opponent_mark = check_preconditions(&input)?;

    let chosen = match difficulty {
        Difficulty::Easy => calculate_random_move(&input.board, rng),
        Difficulty::Medium => calculate_medium_move(&input.board, input.bot_mark, opponent_mark, rng),
        Difficulty::Hard => calculate_minimax_move(&input.board, input.bot_mark, opponent_mark),
    };

    let index = chosen.ok_or_else(|| {
        EngineError::PreconditionViolation("no empty cell to play".to_string())
    })?;
    debug_log!("{} bot ({}) picked cell {}", difficulty, input.bot_mark, index);
    Ok(index)
}

fn check_preconditions(input: &BotInput) -> Result<Mark> {
    let opponent_mark = input.bot_mark.opponent().ok_or_else(|| {
        EngineError::PreconditionViolation("bot mark must be X or O".to_string())
    })?;

    match evaluate(&input.board) {
        Outcome::InProgress => Ok(opponent_mark),
        Outcome::Draw => Err(EngineError::PreconditionViolation(
            "board is full".to_string(),
        )),
        Outcome::Win { mark, line } => Err(EngineError::PreconditionViolation(format!(
            "game already won by {} on line {}",
            mark, line
        ))),
    }
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = get_available_moves(board);
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..available_moves.len());
    Some(available_moves[idx])
}

fn calculate_medium_move(
    board: &Board,
    bot_mark: Mark,
    opponent_mark: Mark,
    rng: &mut SessionRng,
) -> Option<usize> {
    find_line_completion(board, bot_mark)
        .or_else(|| find_line_completion(board, opponent_mark))
        .or_else(|| calculate_random_move(board, rng))
}

/// Empty cell of the first line holding exactly two `mark`s and one gap.
fn find_line_completion(board: &Board, mark: Mark) -> Option<usize> {
    LINES.iter().find_map(|line| {
        let cells = line.cells();
        let owned = cells.iter().filter(|&&i| board.cell(i) == mark).count();
        if owned != 2 {
            return None;
        }
        cells.into_iter().find(|&i| board.cell(i) == Mark::Empty)
    })
}

fn calculate_minimax_move(board: &Board, bot_mark: Mark, opponent_mark: Mark) -> Option<usize> {
    let mut scratch = *board;

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in get_available_moves(board) {
        scratch.set(index, bot_mark);
        let score = minimax(&mut scratch, 0, false, bot_mark, opponent_mark);
        scratch.set(index, Mark::Empty);

        // Strict comparison keeps the lowest index among equal scores.
        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
) -> i32 {
    match evaluate(board) {
        Outcome::Win { mark, .. } => {
            return if mark == bot_mark {
                WIN_SCORE - depth
            } else {
                depth - WIN_SCORE
            };
        }
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    let (mark, mut best) = if is_maximizing {
        (bot_mark, i32::MIN)
    } else {
        (opponent_mark, i32::MAX)
    };

    for index in 0..BOARD_SIZE {
        if board.cell(index) != Mark::Empty {
            continue;
        }

        board.set(index, mark);
        let score = minimax(board, depth + 1, !is_maximizing, bot_mark, opponent_mark);
        board.set(index, Mark::Empty);

        best = if is_maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}
