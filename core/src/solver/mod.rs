use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

mod inference;
mod pattern;

/// How much the automatic player is allowed to reason. Each tier adds to the one before.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Automatic player disabled.
    #[default]
    None,
    /// Random reveals only.
    Easy,
    /// Flags and reveals what single numbers force, otherwise guesses.
    Medium,
    /// Medium plus the 1-2-1 line pattern.
    Hard,
}

impl Difficulty {
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }

    const fn uses_counts(self) -> bool {
        matches!(self, Self::Medium | Self::Hard)
    }

    const fn uses_patterns(self) -> bool {
        matches!(self, Self::Hard)
    }
}

/// Which flags the solver believes when matching numbers against flagged neighbors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagTrust {
    /// Only flags that sit on actual mines, wrong flags are treated as unknown cells that cannot be
    /// revealed. Deductions stay correct however the player flags.
    #[default]
    Verified,
    /// Every flag is a mine. Pure reasoning from what is visible, wrong flags lead to wrong deductions.
    Counted,
}

impl FlagTrust {
    fn counts(self, cell: &Cell) -> bool {
        match self {
            Self::Verified => cell.is_mine(),
            Self::Counted => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    FlagCell(Coord2),
    RevealCell(Coord2),
    None,
}

impl Action {
    pub const fn coords(self) -> Option<Coord2> {
        match self {
            Self::FlagCell(coords) | Self::RevealCell(coords) => Some(coords),
            Self::None => None,
        }
    }

    /// Performs the action, returning the reveal outcome for reveals.
    pub fn apply(self, board: &mut Board) -> Result<Option<RevealOutcome>> {
        match self {
            Self::FlagCell(coords) => board.toggle_flag(coords).map(|_| None),
            Self::RevealCell(coords) => board.reveal(coords).map(Some),
            Self::None => Ok(None),
        }
    }
}

/// Why the solver picked an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    /// A number has exactly as many hidden neighbors as missing mines.
    MinesSaturated,
    /// A number already has all its mines flagged.
    QuotaMet,
    /// A 1-2-1 line against a settled side.
    OneTwoOne,
    /// Nothing could be deduced.
    Guess,
    /// Nothing to do: disabled, game over, or no hidden cells.
    Idle,
}

impl Reason {
    /// Whether the action follows from the board instead of chance.
    pub const fn is_deduced(self) -> bool {
        matches!(self, Self::MinesSaturated | Self::QuotaMet | Self::OneTwoOne)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub reason: Reason,
}

impl Decision {
    pub const fn new(action: Action, reason: Reason) -> Self {
        Self { action, reason }
    }

    pub const fn idle() -> Self {
        Self::new(Action::None, Reason::Idle)
    }
}

/// A decision that was carried out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub decision: Decision,
    /// Set when the action was a reveal.
    pub revealed: Option<RevealOutcome>,
}

impl Turn {
    pub const fn action(&self) -> Action {
        self.decision.action
    }
}

/// Automatic player. Looks only at the board it is handed, the random source is its only state.
#[derive(Clone, Debug)]
pub struct Solver {
    rng: SmallRng,
    flag_trust: FlagTrust,
}

impl Solver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            flag_trust: FlagTrust::default(),
        }
    }

    pub fn with_flag_trust(mut self, flag_trust: FlagTrust) -> Self {
        self.flag_trust = flag_trust;
        self
    }

    pub fn flag_trust(&self) -> FlagTrust {
        self.flag_trust
    }

    /// Picks exactly one action without touching the board.
    pub fn decide(&mut self, board: &Board, difficulty: Difficulty) -> Decision {
        if !difficulty.is_enabled() || board.status().is_finished() {
            return Decision::idle();
        }

        let deduced = if difficulty.uses_counts() {
            inference::find_forced_mine(board, self.flag_trust)
                .or_else(|| inference::find_safe_cell(board, self.flag_trust))
        } else {
            None
        };
        let deduced = deduced.or_else(|| {
            difficulty
                .uses_patterns()
                .then(|| pattern::find_one_two_one(board))
                .flatten()
        });

        deduced.unwrap_or_else(|| self.guess(board))
    }

    /// The action [`Solver::decide`] would take, without its reason.
    pub fn next_action(&mut self, board: &Board, difficulty: Difficulty) -> Action {
        self.decide(board, difficulty).action
    }

    /// Decides and carries out one action.
    pub fn take_turn(&mut self, board: &mut Board, difficulty: Difficulty) -> Result<Turn> {
        let decision = self.decide(board, difficulty);
        let revealed = decision.action.apply(board)?;
        log::debug!(
            "{:?} solver: {:?} ({:?}) -> {:?}",
            difficulty,
            decision.action,
            decision.reason,
            revealed
        );
        Ok(Turn { decision, revealed })
    }

    fn guess(&mut self, board: &Board) -> Decision {
        let hidden: Vec<Coord2> = board.iter_hidden().collect();
        if hidden.is_empty() {
            return Decision::idle();
        }

        let pick = hidden[self.rng.random_range(0..hidden.len())];
        Decision::new(Action::RevealCell(pick), Reason::Guess)
    }
}
