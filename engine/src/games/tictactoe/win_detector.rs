use super::types::{Board, LINES, Line, Mark, Outcome};

pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = check_win_with_line(board) {
        return Outcome::Win { mark, line };
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|(mark, _)| mark)
}

/// First completed line in `LINES` order.
pub fn check_win_with_line(board: &Board) -> Option<(Mark, Line)> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells();
        let mark = board.cell(a);
        if mark != Mark::Empty && board.cell(b) == mark && board.cell(c) == mark {
            Some((mark, *line))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in LINES {
            let mut b = Board::new();
            for index in line.cells() {
                b = b.with_mark(index, Mark::O);
            }
            assert_eq!(evaluate(&b), Outcome::Win { mark: Mark::O, line });
        }
    }

    #[test]
    fn test_win_with_other_marks_present() {
        let outcome = evaluate(&board("OXO.X..X."));
        assert_eq!(outcome, Outcome::Win { mark: Mark::X, line: LINES[4] });
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        assert_eq!(evaluate(&board("XOXXOOOXX")), Outcome::Draw);
    }

    #[test]
    fn test_winning_move_on_full_board_is_win_not_draw() {
        let outcome = evaluate(&board("XXXOOXOXO"));
        assert_eq!(outcome, Outcome::Win { mark: Mark::X, line: LINES[0] });
    }

    #[test]
    fn test_open_board_is_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
        assert_eq!(evaluate(&board("XO.......")), Outcome::InProgress);
    }

    #[test]
    fn test_multiple_lines_report_first_in_order() {
        // Column 0 and the main diagonal are both X; column comes first.
        let outcome = evaluate(&board("XOOXX.X.X"));
        assert_eq!(outcome, Outcome::Win { mark: Mark::X, line: LINES[3] });
    }

    #[test]
    fn test_both_marks_winning_reports_first_line() {
        let outcome = evaluate(&board("XXXOOO..."));
        assert_eq!(outcome, Outcome::Win { mark: Mark::X, line: LINES[0] });
        assert_eq!(check_win(&board("...OOOXXX")), Some(Mark::O));
    }
}
