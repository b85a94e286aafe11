use std::fmt;

use tictactoe_engine::games::tictactoe::{AnalyticsSummary, Difficulty, Mark, Outcome, TicTacToeGameState};

/// Empty cells show their 1-based number; the winning line is bracketed.
pub fn render_board(state: &TicTacToeGameState) -> String {
    let winning_line = match state.status() {
        Outcome::Win { line, .. } => Some(line),
        _ => None,
    };

    let mut out = String::new();
    for row in 0..3 {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                let symbol = match state.board().cell(index) {
                    Mark::Empty => char::from_digit(index as u32 + 1, 10).unwrap_or('?'),
                    mark => mark.symbol(),
                };
                if winning_line.is_some_and(|line| line.contains(index)) {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
    }
    out
}

pub fn render_result(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win { mark, .. } => format!("Winner: {}", mark),
        Outcome::Draw => "Game draw!".to_string(),
        Outcome::InProgress => "Game in progress".to_string(),
    }
}

pub fn render_summary(summary: &AnalyticsSummary) -> String {
    SummaryView(summary).to_string()
}

struct SummaryView<'a>(&'a AnalyticsSummary);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        let wins = |mark: Mark| summary.wins_by_mark.get(&mark).copied().unwrap_or(0);
        let distribution = &summary.distribution;

        writeln!(f, "=== Game Analytics ===")?;
        writeln!(f, "Games played: {}", summary.total_games)?;
        writeln!(f, "X wins: {} ({:.0}%)", wins(Mark::X), distribution.x_wins * 100.0)?;
        writeln!(f, "O wins: {} ({:.0}%)", wins(Mark::O), distribution.o_wins * 100.0)?;
        writeln!(f, "Draws:  {} ({:.0}%)", summary.draws, distribution.draws * 100.0)?;
        writeln!(f, "Average moves: {:.1}", summary.average_moves)?;

        for difficulty in Difficulty::ALL {
            if let Some(record) = summary.per_difficulty.get(&difficulty) {
                writeln!(
                    f,
                    "Computer ({}): {} wins / {} losses",
                    difficulty, record.wins, record.losses
                )?;
            }
        }

        if !summary.moves_per_game.is_empty() {
            let trend: Vec<String> = summary.moves_per_game.iter().map(u32::to_string).collect();
            writeln!(f, "Moves per game: {}", trend.join(" "))?;
        }
        Ok(())
    }
}
