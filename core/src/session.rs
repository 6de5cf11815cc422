use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardConfig,
    pub difficulty: Difficulty,
    pub flag_trust: FlagTrust,
}

/// What happened on one player reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub player: RevealOutcome,
    /// The automatic player's answer, if it took a turn.
    pub solver: Option<Turn>,
}

/// One game from first click to win or loss.
///
/// The board is generated on the first reveal, around the revealed cell, so that cell and its neighbors
/// never hold a mine.
#[derive(Clone, Debug)]
pub struct GameSession {
    settings: Settings,
    board: Option<Board>,
    rng: SmallRng,
    solver: Solver,
}

impl GameSession {
    /// Fails when the board cannot fit its mines next to a first click anywhere on it.
    pub fn new(settings: Settings, seed: u64) -> Result<Self> {
        let (width, height) = settings.board.size;
        settings.board.validate(Some((width / 2, height / 2)))?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let solver = Solver::new(rng.next_u64()).with_flag_trust(settings.flag_trust);
        Ok(Self {
            settings,
            board: None,
            rng,
            solver,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
    }

    /// `None` until the first reveal.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn first_click_pending(&self) -> bool {
        self.board.is_none()
    }

    pub fn status(&self) -> GameStatus {
        self.board.as_ref().map_or(GameStatus::Playing, Board::status)
    }

    pub fn mines_left(&self) -> isize {
        self.board
            .as_ref()
            .map_or(self.settings.board.mines as isize, Board::mines_left)
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self
            .board
            .as_ref()
            .map_or(CellView::Hidden, |board| board.view_at(coords)))
    }

    /// Player reveal. After a reveal that shows a number, the automatic player answers with one turn.
    pub fn reveal(&mut self, coords: Coord2) -> Result<MoveReport> {
        let first_click = self.board.is_none();
        let board = match self.board.take() {
            Some(board) => board,
            None => {
                log::debug!("First reveal at {:?}, generating board", coords);
                generate_board(&self.settings.board, Some(coords), &mut self.rng)?
            }
        };
        let board = self.board.insert(board);

        let player = board.reveal(coords)?;
        let answers = !first_click
            && player == RevealOutcome::Number
            && self.settings.difficulty.is_enabled()
            && !board.status().is_finished();
        let solver = if answers {
            Some(self.solver.take_turn(board, self.settings.difficulty)?)
        } else {
            None
        };

        Ok(MoveReport { player, solver })
    }

    /// Flags are only accepted once the board exists.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        match self.board.as_mut() {
            Some(board) => board.toggle_flag(coords),
            None => Ok(FlagOutcome::NoChange),
        }
    }

    /// Lets the automatic player move without a player move first.
    pub fn solver_turn(&mut self) -> Result<Option<Turn>> {
        match self.board.as_mut() {
            Some(board) => self
                .solver
                .take_turn(board, self.settings.difficulty)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Drops the board, the next reveal generates a fresh one.
    pub fn restart(&mut self) {
        log::debug!("Restarting session");
        self.board = None;
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.settings.board.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords { coords })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(mines: CellCount, difficulty: Difficulty) -> Settings {
        Settings {
            board: BoardConfig::new_unchecked((10, 10), mines),
            difficulty,
            ..Default::default()
        }
    }

    #[test]
    fn first_click_never_loses() {
        for seed in 0..100 {
            let mut session = GameSession::new(settings(20, Difficulty::None), seed).unwrap();
            let coords = ((seed % 10) as Coord, (seed / 10) as Coord);

            let report = session.reveal(coords).unwrap();

            assert_eq!(report.player, RevealOutcome::Empty);
            assert_ne!(session.status(), GameStatus::Loss);
            assert!(!session.first_click_pending());
        }
    }

    #[test]
    fn rejects_mines_that_cannot_avoid_first_click() {
        let crowded = Settings {
            board: BoardConfig::new_unchecked((4, 4), 7),
            ..Default::default()
        };

        assert_eq!(
            GameSession::new(crowded, 0).unwrap_err(),
            GameError::InvalidMineCount {
                mines: 7,
                eligible: 7
            }
        );
    }

    #[test]
    fn flags_wait_for_the_board() {
        let mut session = GameSession::new(settings(10, Difficulty::None), 3).unwrap();

        assert_eq!(session.toggle_flag((2, 2)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(session.view_at((2, 2)).unwrap(), CellView::Hidden);
        assert_eq!(session.mines_left(), 10);
        assert!(session.toggle_flag((10, 2)).is_err());
        assert_eq!(session.solver_turn().unwrap(), None);
    }

    #[test]
    fn solver_answers_numbered_reveals_only() {
        for seed in 0..30 {
            let mut session = GameSession::new(settings(15, Difficulty::Easy), seed).unwrap();
            let first = session.reveal((5, 5)).unwrap();
            assert_eq!(first.solver, None);
            if session.status().is_finished() {
                continue;
            }

            let board = session.board().unwrap();
            let Some(numbered) = board.iter_hidden().find(|&coords| {
                matches!(board.cell_at(coords).adjacent_count(), Some(1..))
            }) else {
                continue;
            };

            let report = session.reveal(numbered).unwrap();
            assert_eq!(report.player, RevealOutcome::Number);
            let won_by_player = session.board().unwrap().check_win()
                && report.solver.is_none();
            assert!(report.solver.is_some() || won_by_player);
            if let Some(turn) = report.solver {
                assert_eq!(turn.decision.reason, Reason::Guess);
            }
        }
    }

    #[test]
    fn disabled_solver_stays_quiet() {
        let mut session = GameSession::new(settings(15, Difficulty::Hard), 8).unwrap();
        session.set_difficulty(Difficulty::None);
        session.reveal((0, 0)).unwrap();

        let board = session.board().unwrap();
        let numbered = board
            .iter_hidden()
            .find(|&coords| matches!(board.cell_at(coords).adjacent_count(), Some(1..)));
        if let Some(numbered) = numbered {
            assert_eq!(session.reveal(numbered).unwrap().solver, None);
        }
        assert_eq!(session.difficulty(), Difficulty::None);
    }

    #[test]
    fn restart_clears_board() {
        let mut session = GameSession::new(settings(10, Difficulty::None), 1).unwrap();
        session.reveal((3, 3)).unwrap();

        session.restart();

        assert!(session.first_click_pending());
        assert_eq!(session.status(), GameStatus::Playing);
        assert!(session.board().is_none());
    }

    #[test]
    fn settings_read_partial_json() {
        let parsed: Settings =
            serde_json::from_str(r#"{"difficulty": "Hard", "board": {"mines": 12}}"#).unwrap();

        assert_eq!(parsed.difficulty, Difficulty::Hard);
        assert_eq!(parsed.board, BoardConfig::new_unchecked((10, 10), 12));
        assert_eq!(parsed.flag_trust, FlagTrust::Verified);
    }
}
