use std::fmt;

use serde::Serialize;
use sweeper_core::{Action, Difficulty, GameSession, GameStatus, Settings};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub difficulty: Difficulty,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Games that hit the turn limit or left the solver with nothing to do.
    pub stalled: u32,
    pub turns: u64,
    pub deduced: u64,
    pub guessed: u64,
}

impl Summary {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games)
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub seed: u64,
    pub settings: Settings,
    pub summaries: Vec<Summary>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.settings.board.size;
        writeln!(
            f,
            "{}x{} board, {} mines, seed {}",
            width, height, self.settings.board.mines, self.seed
        )?;
        for summary in &self.summaries {
            let difficulty = format!("{:?}", summary.difficulty);
            writeln!(
                f,
                "{:>8}: {:>5.1}% won ({} won, {} lost, {} stalled), {} turns, {} deduced, {} guessed",
                difficulty,
                summary.win_rate() * 100.0,
                summary.wins,
                summary.losses,
                summary.stalled,
                summary.turns,
                summary.deduced,
                summary.guessed,
            )?;
        }
        Ok(())
    }
}

/// Plays `games` games, each opened in the middle of the board and finished by the solver alone.
pub fn run(
    settings: &Settings,
    games: u32,
    max_turns: u32,
    seed: u64,
) -> sweeper_core::Result<Summary> {
    let mut summary = Summary {
        difficulty: settings.difficulty,
        games,
        ..Default::default()
    };

    for game in 0..games {
        let mut session = GameSession::new(*settings, seed.wrapping_add(u64::from(game)))?;
        let (width, height) = settings.board.size;
        session.reveal((width / 2, height / 2))?;

        for _ in 0..max_turns {
            if session.status().is_finished() {
                break;
            }
            let Some(turn) = session.solver_turn()? else {
                break;
            };
            if turn.action() == Action::None {
                break;
            }
            summary.turns += 1;
            if turn.decision.reason.is_deduced() {
                summary.deduced += 1;
            } else {
                summary.guessed += 1;
            }
        }

        match session.status() {
            GameStatus::Win => summary.wins += 1,
            GameStatus::Loss => summary.losses += 1,
            GameStatus::Playing => summary.stalled += 1,
        }
    }

    Ok(summary)
}
