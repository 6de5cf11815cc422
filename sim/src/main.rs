use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use sweeper_core::{CellCount, Coord, Difficulty, FlagTrust, Settings};
use tracing_subscriber::filter::LevelFilter;

mod report;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FlagTrustArg {
    Verified,
    Counted,
}

impl From<FlagTrustArg> for FlagTrust {
    fn from(arg: FlagTrustArg) -> Self {
        match arg {
            FlagTrustArg::Verified => FlagTrust::Verified,
            FlagTrustArg::Counted => FlagTrust::Counted,
        }
    }
}

/// Plays whole games with the automatic player and reports how they ended
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML settings file, flags given on the command line take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of games per difficulty
    #[arg(short, long, default_value_t = 100)]
    games: u32,

    #[arg(long)]
    width: Option<Coord>,

    #[arg(long)]
    height: Option<Coord>,

    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Only play this difficulty instead of all three
    #[arg(short, long, value_enum)]
    difficulty: Option<DifficultyArg>,

    #[arg(long, value_enum)]
    flag_trust: Option<FlagTrustArg>,

    /// Force a seed instead of one taken from the clock
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop a game that takes more solver turns than this
    #[arg(long, default_value_t = 1000)]
    max_turns: u32,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => Settings::default(),
        };

        if let Some(width) = self.width {
            settings.board.size.0 = width;
        }
        if let Some(height) = self.height {
            settings.board.size.1 = height;
        }
        if let Some(mines) = self.mines {
            settings.board.mines = mines;
        }
        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty.into();
        }
        if let Some(flag_trust) = self.flag_trust {
            settings.flag_trust = flag_trust.into();
        }
        Ok(settings)
    }

    fn difficulties(&self, settings: &Settings) -> Vec<Difficulty> {
        if self.difficulty.is_some() || settings.difficulty.is_enabled() {
            vec![settings.difficulty]
        } else {
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        }
    }
}

/// Level for the stderr subscriber, `None` when logging is silenced.
fn log_filter(verbose: &clap_verbosity_flag::Verbosity) -> Option<LevelFilter> {
    verbose.log_level().map(|level| match level {
        log::Level::Error => LevelFilter::ERROR,
        log::Level::Warn => LevelFilter::WARN,
        log::Level::Info => LevelFilter::INFO,
        log::Level::Debug => LevelFilter::DEBUG,
        log::Level::Trace => LevelFilter::TRACE,
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(filter) = log_filter(&args.verbose) {
        // core logs through `log`, the subscriber picks those records up
        tracing_subscriber::fmt()
            .with_max_level(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    log::debug!("{:?}", args);
    ensure!(args.games > 0, "at least one game is needed");

    let settings = args.settings()?;
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut summaries = Vec::new();
    for difficulty in args.difficulties(&settings) {
        let settings = Settings {
            difficulty,
            ..settings
        };
        let summary = report::run(&settings, args.games, args.max_turns, seed)
            .with_context(|| format!("playing {difficulty:?} games"))?;
        summaries.push(summary);
    }

    let report = report::Report {
        seed,
        settings,
        summaries,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sweeper-sim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verbosity_flags_pick_log_level() {
        assert_eq!(log_filter(&parse(&[]).verbose), Some(LevelFilter::ERROR));
        assert_eq!(log_filter(&parse(&["-vvv"]).verbose), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(&parse(&["-vvvv"]).verbose), Some(LevelFilter::TRACE));
        assert_eq!(log_filter(&parse(&["-q"]).verbose), None);
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["--width", "16", "--mines", "40", "-d", "hard"]);

        let settings = args.settings().unwrap();

        assert_eq!(settings.board.size, (16, 10));
        assert_eq!(settings.board.mines, 40);
        assert_eq!(args.difficulties(&settings), [Difficulty::Hard]);
    }

    #[test]
    fn all_tiers_without_difficulty() {
        let args = parse(&[]);

        let settings = args.settings().unwrap();

        assert_eq!(
            args.difficulties(&settings),
            [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        );
    }
}
