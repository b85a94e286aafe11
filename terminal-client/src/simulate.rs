use tictactoe_engine::games::tictactoe::{
    BotInput, Difficulty, Opponent, SessionStats, TicTacToeGameState, calculate_move,
};
use tictactoe_engine::{EngineError, Result, SessionRng, debug_log};

/// Plays `games` games: X picks random cells, O is the computer at `difficulty`.
pub fn run_simulation(games: u32, difficulty: Difficulty, rng: &mut SessionRng) -> Result<SessionStats> {
    let mut state = TicTacToeGameState::new(Opponent::Computer(difficulty));
    let mut stats = SessionStats::new();

    for game in 0..games {
        while !state.status().is_terminal() {
            if state.is_computer_turn() {
                state.play_computer_turn(rng)?;
            } else {
                play_random_turn(&mut state, rng)?;
            }
        }

        if let Some(record) = state.take_record() {
            debug_log!("Simulated game {} finished: {:?}", game + 1, state.status());
            stats.record(record);
        }
        state.restart();
    }

    Ok(stats)
}

fn play_random_turn(state: &mut TicTacToeGameState, rng: &mut SessionRng) -> Result<usize> {
    let index = calculate_move(Difficulty::Easy, BotInput::from_game_state(state), rng)?;
    state
        .place_mark(index)
        .map_err(EngineError::PreconditionViolation)?;
    Ok(index)
}
