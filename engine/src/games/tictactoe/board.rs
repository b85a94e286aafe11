use super::types::{BOARD_SIZE, Board, Mark};

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    if index >= BOARD_SIZE {
        return false;
    }
    board.cell(index) == Mark::Empty
}
