use std::collections::BTreeMap;

use serde::Serialize;

use crate::debug_log;
use crate::error::{EngineError, Result};
use super::types::{COMPUTER_MARK, Difficulty, Mark, Outcome};

/// Final result of one finished game. Deliberately not `Clone`: a record is
/// moved into the aggregator and cannot be counted twice.
#[derive(Debug, PartialEq, Eq)]
pub struct GameRecord {
    winner: Option<Mark>,
    moves_played: u32,
    difficulty: Option<Difficulty>,
}

impl GameRecord {
    /// `winner == None` records a draw.
    pub fn new(
        winner: Option<Mark>,
        moves_played: u32,
        difficulty: Option<Difficulty>,
    ) -> Result<Self> {
        if winner == Some(Mark::Empty) {
            return Err(EngineError::PreconditionViolation(
                "winner must be X or O".to_string(),
            ));
        }
        Ok(Self {
            winner,
            moves_played,
            difficulty,
        })
    }

    /// `None` for games still in progress.
    pub fn from_outcome(
        outcome: &Outcome,
        moves_played: u32,
        difficulty: Option<Difficulty>,
    ) -> Option<Self> {
        let winner = match outcome {
            Outcome::InProgress => return None,
            Outcome::Draw => None,
            Outcome::Win { mark, .. } => Some(*mark),
        };
        Self::new(winner, moves_played, difficulty).ok()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

/// Results against one difficulty tier, seen from the computer's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyRecord {
    pub wins: u32,
    pub losses: u32,
}

/// Share of finished games per result, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResultDistribution {
    pub x_wins: f64,
    pub o_wins: f64,
    pub draws: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_games: u32,
    pub wins_by_mark: BTreeMap<Mark, u32>,
    pub draws: u32,
    pub average_moves: f64,
    pub moves_per_game: Vec<u32>,
    pub per_difficulty: BTreeMap<Difficulty, DifficultyRecord>,
    pub distribution: ResultDistribution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    total_games: u32,
    wins_by_mark: BTreeMap<Mark, u32>,
    draws: u32,
    moves_per_game: Vec<u32>,
    per_difficulty: BTreeMap<Difficulty, DifficultyRecord>,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            total_games: 0,
            wins_by_mark: [(Mark::X, 0), (Mark::O, 0)].into_iter().collect(),
            draws: 0,
            moves_per_game: Vec::new(),
            per_difficulty: Difficulty::ALL
                .into_iter()
                .map(|difficulty| (difficulty, DifficultyRecord::default()))
                .collect(),
        }
    }

    pub fn record(&mut self, record: GameRecord) {
        self.total_games += 1;
        self.moves_per_game.push(record.moves_played);

        match record.winner {
            Some(mark) => *self.wins_by_mark.entry(mark).or_insert(0) += 1,
            None => self.draws += 1,
        }

        if let (Some(difficulty), Some(winner)) = (record.difficulty, record.winner) {
            let entry = self.per_difficulty.entry(difficulty).or_default();
            if winner == COMPUTER_MARK {
                entry.wins += 1;
            } else {
                entry.losses += 1;
            }
        }

        debug_log!(
            "Recorded game #{}: winner {:?}, {} moves",
            self.total_games,
            record.winner,
            record.moves_played
        );
    }

    pub fn total_games(&self) -> u32 {
        self.total_games
    }

    pub fn wins_for(&self, mark: Mark) -> u32 {
        self.wins_by_mark.get(&mark).copied().unwrap_or(0)
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn moves_per_game(&self) -> &[u32] {
        &self.moves_per_game
    }

    pub fn difficulty_record(&self, difficulty: Difficulty) -> DifficultyRecord {
        self.per_difficulty
            .get(&difficulty)
            .copied()
            .unwrap_or_default()
    }

    /// Zero when no game has been recorded.
    pub fn average_moves(&self) -> f64 {
        if self.moves_per_game.is_empty() {
            return 0.0;
        }
        let total: u64 = self.moves_per_game.iter().map(|&m| u64::from(m)).sum();
        total as f64 / self.moves_per_game.len() as f64
    }

    pub fn distribution(&self) -> ResultDistribution {
        if self.total_games == 0 {
            return ResultDistribution::default();
        }
        let total = f64::from(self.total_games);
        ResultDistribution {
            x_wins: f64::from(self.wins_for(Mark::X)) / total,
            o_wins: f64::from(self.wins_for(Mark::O)) / total,
            draws: f64::from(self.draws) / total,
        }
    }

    pub fn summary(&self) -> AnalyticsSummary {
        AnalyticsSummary {
            total_games: self.total_games,
            wins_by_mark: self.wins_by_mark.clone(),
            draws: self.draws,
            average_moves: self.average_moves(),
            moves_per_game: self.moves_per_game.clone(),
            per_difficulty: self.per_difficulty.clone(),
            distribution: self.distribution(),
        }
    }
}

/// Folds one finished game into the session totals.
pub fn record_game(mut stats: SessionStats, record: GameRecord) -> SessionStats {
    stats.record(record);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::LINES;

    fn win(mark: Mark, moves: u32, difficulty: Option<Difficulty>) -> GameRecord {
        GameRecord::new(Some(mark), moves, difficulty).unwrap()
    }

    fn draw(moves: u32, difficulty: Option<Difficulty>) -> GameRecord {
        GameRecord::new(None, moves, difficulty).unwrap()
    }

    #[test]
    fn test_new_stats_are_zeroed() {
        let stats = SessionStats::new();
        assert_eq!(stats.total_games(), 0);
        assert_eq!(stats.wins_for(Mark::X), 0);
        assert_eq!(stats.wins_for(Mark::O), 0);
        assert_eq!(stats.draws(), 0);
        assert!(stats.moves_per_game().is_empty());
        for difficulty in Difficulty::ALL {
            assert_eq!(stats.difficulty_record(difficulty), DifficultyRecord::default());
        }
    }

    #[test]
    fn test_average_of_no_games_is_zero() {
        assert_eq!(SessionStats::new().average_moves(), 0.0);
        assert_eq!(SessionStats::new().distribution(), ResultDistribution::default());
    }

    #[test]
    fn test_counts_after_mixed_results() {
        let records = vec![
            win(Mark::X, 5, None),
            draw(9, None),
            win(Mark::O, 6, None),
            win(Mark::X, 7, None),
            draw(9, None),
            draw(9, None),
        ];

        let stats = records.into_iter().fold(SessionStats::new(), record_game);

        assert_eq!(stats.total_games(), 6);
        assert_eq!(stats.wins_for(Mark::X), 2);
        assert_eq!(stats.wins_for(Mark::O), 1);
        assert_eq!(stats.draws(), 3);
        assert_eq!(stats.moves_per_game(), &[5, 9, 6, 7, 9, 9]);
        assert_eq!(
            stats.total_games(),
            stats.wins_for(Mark::X) + stats.wins_for(Mark::O) + stats.draws()
        );
    }

    #[test]
    fn test_average_moves() {
        let stats = record_game(record_game(SessionStats::new(), win(Mark::X, 5, None)), draw(8, None));
        assert_eq!(stats.average_moves(), 6.5);
    }

    #[test]
    fn test_per_difficulty_from_computer_side() {
        let mut stats = SessionStats::new();
        stats.record(win(Mark::O, 6, Some(Difficulty::Hard)));
        stats.record(win(Mark::X, 5, Some(Difficulty::Easy)));
        stats.record(win(Mark::X, 7, Some(Difficulty::Easy)));
        stats.record(draw(9, Some(Difficulty::Hard)));
        stats.record(win(Mark::O, 6, None));

        assert_eq!(stats.difficulty_record(Difficulty::Hard), DifficultyRecord { wins: 1, losses: 0 });
        assert_eq!(stats.difficulty_record(Difficulty::Easy), DifficultyRecord { wins: 0, losses: 2 });
        assert_eq!(stats.difficulty_record(Difficulty::Medium), DifficultyRecord::default());
        assert_eq!(stats.draws(), 1);
    }

    #[test]
    fn test_distribution() {
        let mut stats = SessionStats::new();
        stats.record(win(Mark::X, 5, None));
        stats.record(win(Mark::O, 6, None));
        stats.record(draw(9, None));
        stats.record(draw(9, None));

        let distribution = stats.distribution();
        assert_eq!(distribution.x_wins, 0.25);
        assert_eq!(distribution.o_wins, 0.25);
        assert_eq!(distribution.draws, 0.5);
    }

    #[test]
    fn test_summary_matches_stats() {
        let mut stats = SessionStats::new();
        stats.record(win(Mark::O, 6, Some(Difficulty::Medium)));
        let summary = stats.summary();
        assert_eq!(summary.total_games, 1);
        assert_eq!(summary.wins_by_mark[&Mark::O], 1);
        assert_eq!(summary.average_moves, 6.0);
        assert_eq!(summary.per_difficulty[&Difficulty::Medium].wins, 1);
        assert_eq!(summary.moves_per_game, vec![6]);
    }

    #[test]
    fn test_summary_serializes_to_yaml() {
        let mut stats = SessionStats::new();
        stats.record(draw(9, Some(Difficulty::Easy)));
        let yaml = serde_yaml_ng::to_string(&stats.summary()).unwrap();
        assert!(yaml.contains("total_games: 1"));
        assert!(yaml.contains("easy:"));
    }

    #[test]
    fn test_record_rejects_empty_winner() {
        let result = GameRecord::new(Some(Mark::Empty), 3, None);
        assert!(matches!(result, Err(EngineError::PreconditionViolation(_))));
    }

    #[test]
    fn test_record_from_outcome() {
        assert!(GameRecord::from_outcome(&Outcome::InProgress, 3, None).is_none());

        let draw = GameRecord::from_outcome(&Outcome::Draw, 9, None).unwrap();
        assert!(draw.is_draw());

        let outcome = Outcome::Win { mark: Mark::O, line: LINES[6] };
        let win = GameRecord::from_outcome(&outcome, 6, Some(Difficulty::Hard)).unwrap();
        assert_eq!(win.winner(), Some(Mark::O));
        assert!(!win.is_draw());
    }
}
