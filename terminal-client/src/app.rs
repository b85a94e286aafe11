use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use tictactoe_engine::games::tictactoe::{BOARD_SIZE, Opponent, SessionStats, TicTacToeGameState};
use tictactoe_engine::{SessionRng, log};

use crate::render::{render_board, render_result, render_summary};

#[derive(Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Place(usize),
    Restart,
    Stats,
    Quit,
}

/// Cells are typed 1-based.
pub fn parse_command(line: &str) -> Option<PlayerCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" => Some(PlayerCommand::Quit),
        "r" | "restart" => Some(PlayerCommand::Restart),
        "s" | "stats" => Some(PlayerCommand::Stats),
        other => match other.parse::<usize>() {
            Ok(cell) if (1..=BOARD_SIZE).contains(&cell) => Some(PlayerCommand::Place(cell - 1)),
            _ => None,
        },
    }
}

pub struct PlayApp {
    state: TicTacToeGameState,
    stats: SessionStats,
    rng: SessionRng,
    computer_move_delay: Duration,
    show_analytics_after_game: bool,
}

impl PlayApp {
    pub fn new(
        opponent: Opponent,
        rng: SessionRng,
        computer_move_delay: Duration,
        show_analytics_after_game: bool,
    ) -> Self {
        Self {
            state: TicTacToeGameState::new(opponent),
            stats: SessionStats::new(),
            rng,
            computer_move_delay,
            show_analytics_after_game,
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "Tic Tac Toe: type 1-9 to play, r to restart, s for stats, q to quit.")?;
        write!(out, "{}", render_board(&self.state))?;

        let mut lines = input.lines();
        loop {
            if self.state.is_computer_turn() {
                self.play_computer(out)?;
                continue;
            }

            if !self.state.status().is_terminal() {
                write!(out, "{} > ", self.state.current_mark())?;
            } else {
                write!(out, "> ")?;
            }
            out.flush()?;

            let Some(line) = lines.next() else {
                break;
            };

            match parse_command(&line?) {
                Some(PlayerCommand::Quit) => break,
                Some(PlayerCommand::Restart) => {
                    self.state.restart();
                    write!(out, "{}", render_board(&self.state))?;
                }
                Some(PlayerCommand::Stats) => {
                    write!(out, "{}", render_summary(&self.stats.summary()))?;
                }
                Some(PlayerCommand::Place(index)) => match self.state.place_mark(index) {
                    Ok(_) => self.after_move(out)?,
                    Err(reason) => writeln!(out, "{}", reason)?,
                },
                None => writeln!(out, "Unknown command")?,
            }
        }

        log!("Session over after {} games", self.stats.total_games());
        Ok(())
    }

    fn play_computer<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.computer_move_delay.is_zero() {
            thread::sleep(self.computer_move_delay);
        }

        match self.state.play_computer_turn(&mut self.rng) {
            Ok(Some(index)) => {
                writeln!(out, "Computer plays {}", index + 1)?;
                self.after_move(out)
            }
            Ok(None) => Ok(()),
            Err(e) => {
                log!("Computer move failed: {}", e);
                Err(io::Error::other(e))
            }
        }
    }

    fn after_move<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", render_board(&self.state))?;

        if let Some(record) = self.state.take_record() {
            writeln!(out, "{}", render_result(self.state.status()))?;
            self.stats.record(record);
            if self.show_analytics_after_game {
                write!(out, "{}", render_summary(&self.stats.summary()))?;
            }
            writeln!(out, "Type r to play again or q to quit.")?;
        }
        Ok(())
    }
}
