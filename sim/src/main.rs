use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use haunted_core::{
    BoardSnapshot, CellCount, CellState, Game, GameEvent, HazardOutcome, LossCause,
    MinefieldGenerator, SuspenseMeter,
};
use serde::Serialize;

use crate::player::{AutoPlayer, Move};

mod config;
mod logger;
mod player;

#[derive(Parser, Debug)]
#[command(version, about = "Plays haunted minesweeper rounds without a screen", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with board and hazard settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured mine count
    #[arg(long)]
    mines: Option<CellCount>,

    /// Rounds to play
    #[arg(short, long, default_value_t = 10)]
    rounds: u32,

    /// Simulated time per host-loop step, in milliseconds
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Give up on a round after this many steps
    #[arg(long, default_value_t = 5_000)]
    max_steps: u32,

    /// Print the board snapshot at the end of every round
    #[arg(long)]
    snapshots: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
enum RoundResult {
    Won,
    Lost(LossCause),
    Abandoned,
}

#[derive(Debug, Serialize)]
struct RoundReport {
    round: u32,
    result: RoundResult,
    steps: u32,
    /// Player moves that left the board untouched.
    idle_moves: u32,
    hazard_moves: u32,
    peak_suspense: f32,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    won: usize,
    lost_to_mines: usize,
    lost_to_hazard: usize,
    rounds: Vec<RoundReport>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter()).context("Error initializing logger")?;

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::info!("seed: {}", seed);

    let config = config::load(args.config.as_deref())?;
    let config = config::apply_overrides(config, args.mines)?;
    let tick = Duration::from_millis(args.tick_ms);

    let mut game = Game::new(config, seed)?;
    let mut player = AutoPlayer::new(seed.rotate_left(32));
    let mut rounds = Vec::new();

    for round in 1..=args.rounds {
        let report = play_round(&mut game, &mut player, round, tick, args.max_steps);
        log::info!("round {}: {:?} after {} steps", round, report.result, report.steps);
        if args.snapshots {
            let snapshot = BoardSnapshot::from_game(&game);
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        rounds.push(report);
        game.reset();
    }

    let summary = Summary {
        seed,
        won: count(&rounds, |result| matches!(result, RoundResult::Won)),
        lost_to_mines: count(&rounds, |result| {
            matches!(result, RoundResult::Lost(LossCause::Mine(_)))
        }),
        lost_to_hazard: count(&rounds, |result| {
            matches!(result, RoundResult::Lost(LossCause::Hazard(_)))
        }),
        rounds,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

fn count(rounds: &[RoundReport], pred: impl Fn(RoundResult) -> bool) -> usize {
    rounds.iter().filter(|report| pred(report.result)).count()
}

/// One host-loop round: input step, time step, then drain notifications.
fn play_round(
    game: &mut Game,
    player: &mut AutoPlayer,
    round: u32,
    tick: Duration,
    max_steps: u32,
) -> RoundReport {
    let mut suspense = SuspenseMeter::default();
    let mut report = RoundReport {
        round,
        result: RoundResult::Abandoned,
        steps: 0,
        idle_moves: 0,
        hazard_moves: 0,
        peak_suspense: 0.0,
    };

    while report.steps < max_steps {
        report.steps += 1;

        let changed = match player.next_move(game) {
            Some(Move::Reveal(coords)) => {
                log::trace!("reveal {:?}", coords);
                game.reveal(coords).has_update()
            }
            Some(Move::Flag(coords)) => {
                log::trace!("flag {:?}", coords);
                game.toggle_flag(coords).has_update()
            }
            None => false,
        };
        if !changed {
            report.idle_moves += 1;
        }

        if let HazardOutcome::Relocated { to, .. } = game.tick(tick) {
            report.hazard_moves += 1;
            log::trace!("hazard moved to {:?}", to);
        }
        let level = suspense.update(game.distance_to_player(), tick);
        report.peak_suspense = report.peak_suspense.max(level);

        for event in game.drain_events() {
            log::debug!("event: {:?}", event);
            match event {
                GameEvent::Win => report.result = RoundResult::Won,
                GameEvent::Lose(cause) => report.result = RoundResult::Lost(cause),
                GameEvent::PostWin { hazard_at_win } => {
                    log::debug!("win acknowledged, hazard was at {:?}", hazard_at_win);
                }
            }
        }

        match report.result {
            RoundResult::Won => {
                acknowledge_win(game);
                break;
            }
            RoundResult::Lost(_) => break,
            RoundResult::Abandoned => {}
        }
    }

    report
}

/// Touches a still-blocked mine so presentation would run its closing sequence.
fn acknowledge_win<G: MinefieldGenerator>(game: &mut Game<G>) {
    let Some(mine) = game
        .field()
        .mine_layout()
        .and_then(|layout| layout.iter_mines().next())
    else {
        return;
    };
    if game.cell_at(mine) == Some(CellState::Flagged) {
        game.toggle_flag(mine);
    }
    if !game.reveal(mine).has_update() {
        log::warn!("win at {:?} was not acknowledged", mine);
    }
    game.drain_events().for_each(|event| log::debug!("event: {:?}", event));
}

#[cfg(test)]
mod tests {
    use super::*;
    use haunted_core::{GameConfig, PresetMinefieldGenerator, RevealOutcome, RoundPhase};

    #[test]
    fn win_is_acknowledged_on_flagged_mine() {
        let config = GameConfig::new((3, 1), 1).with_safe_radius(1);
        let generator = PresetMinefieldGenerator::from_mine_coords((3, 1), &[(0, 0)]).unwrap();
        let mut game = Game::with_generator(config, generator, 0).unwrap();
        game.toggle_flag((0, 0));
        assert_eq!(game.reveal((2, 0)), RevealOutcome::Won);
        assert_eq!(game.reveal((2, 0)), RevealOutcome::NoChange);

        acknowledge_win(&mut game);

        assert_eq!(game.phase(), RoundPhase::Acknowledged);
        assert!(game.drain_events().next().is_none());
    }
}
