mod archive;
mod game;
mod global;
mod hands;
mod repl;
mod report;
mod rules;
mod scorecard;
mod simulation;
mod stats;
mod strategy;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use global::*;
use stats::{CategoryStats, Summary};
use strategy::Strategy;

/// Simulate Yahtzee under competing heuristic strategies
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    /// Seed for reproducible dice
    #[clap(long, global = true)]
    seed: Option<u64>,
    #[clap(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Action {
    /// Play a single game and show the scorecard
    Play { strategy: String },
    /// Simulate every strategy and compare them
    Simulate {
        #[clap(short = 'n', long, default_value_t = DEFAULT_SIMULATIONS)]
        games: usize,
        /// Save results to this file
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Play two strategies against each other
    #[clap(alias = "h2h")]
    HeadToHead {
        first: Strategy,
        second: Strategy,
        #[clap(short = 'n', long, default_value_t = DEFAULT_HEAD_TO_HEAD_GAMES)]
        games: usize,
    },
    /// Analyze the spread of scores of a strategy
    Consistency {
        strategy: Strategy,
        #[clap(short = 'n', long, default_value_t = DEFAULT_CONSISTENCY_GAMES)]
        games: usize,
    },
    /// Play every strategy against every other
    Tournament {
        #[clap(short = 'n', long, default_value_t = DEFAULT_TOURNAMENT_GAMES)]
        games: usize,
    },
    /// Compare strategies from saved results
    Summarize { path: PathBuf },
    /// List available strategies
    List,
    /// Interactive analysis
    Repl,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.action.unwrap_or(Action::Repl) {
        Action::Repl => Ok(repl::run(cli.seed)?),
        action => {
            println!("{}", execute(action, cli.seed)?);
            Ok(())
        }
    }
}

/// Run an action
/// # Returns
/// Report to show the user
pub fn execute(action: Action, seed: Option<u64>) -> Result<String> {
    Ok(match action {
        Action::Play { strategy } => {
            let result = game::run_game(&strategy, &mut simulation::dice_for(seed, 0))?;
            report::game(&strategy, &result)
        }
        Action::Simulate { games, output } => {
            let runs = simulation::simulate_all(games, seed)?;
            let out = compare(&runs)?;
            if let Some(path) = output {
                archive::dump_results(
                    &path,
                    runs.into_iter()
                        .map(|(strategy, results)| archive::Run { strategy, results })
                        .collect(),
                )?;
            }
            out
        }
        Action::HeadToHead {
            first,
            second,
            games,
        } => report::head_to_head(&simulation::head_to_head(first, second, games, seed)?),
        Action::Consistency { strategy, games } => {
            let analysis = simulation::consistency(strategy, games, seed)?
                .ok_or_else(|| anyhow!("Must play at least one game"))?;
            report::consistency(&analysis)
        }
        Action::Tournament { games } => report::tournament(&simulation::tournament(games, seed)?),
        Action::Summarize { path } => {
            let runs: Vec<(Strategy, Vec<game::GameResult>)> = archive::restore_results(&path)?
                .into_iter()
                .map(|run| (run.strategy, run.results))
                .collect();
            compare(&runs)?
        }
        Action::List => report::strategies(),
        Action::Repl => return Err(anyhow!("Already running interactively")),
    })
}

/// Per-strategy analysis followed by a ranking
fn compare(runs: &[(Strategy, Vec<game::GameResult>)]) -> Result<String> {
    let mut sections = Vec::with_capacity(runs.len() + 1);
    let mut summaries = Vec::with_capacity(runs.len());
    for (strategy, results) in runs {
        let summary = Summary::from_results(results)
            .ok_or_else(|| anyhow!("No games were played for {}", strategy))?;
        sections.push(report::summary(
            *strategy,
            &summary,
            &CategoryStats::from_results(results),
        ));
        summaries.push((*strategy, summary));
    }
    sections.push(report::comparison(&summaries));
    Ok(sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        let cli = Cli::try_parse_from(["yahtzee", "--seed", "3", "h2h", "adaptive", "greedy-upper"])
            .unwrap();
        assert_eq!(cli.seed, Some(3));
        assert_eq!(
            cli.action,
            Some(Action::HeadToHead {
                first: Strategy::Adaptive,
                second: Strategy::GreedyUpper,
                games: DEFAULT_HEAD_TO_HEAD_GAMES,
            })
        );

        let cli = Cli::try_parse_from(["yahtzee", "simulate", "-n", "10"]).unwrap();
        assert_eq!(
            cli.action,
            Some(Action::Simulate {
                games: 10,
                output: None
            })
        );

        assert_eq!(Cli::try_parse_from(["yahtzee"]).unwrap().action, None);
        assert!(Cli::try_parse_from(["yahtzee", "head-to-head", "optimal", "adaptive"]).is_err());
    }

    #[test]
    fn test_execute() {
        let out = execute(
            Action::Play {
                strategy: String::from("lower-priority"),
            },
            Some(1),
        )
        .unwrap();
        assert!(out.starts_with("lower-priority scored"));
        assert!(execute(
            Action::Play {
                strategy: String::from("optimal")
            },
            None
        )
        .is_err());

        let out = execute(Action::Simulate { games: 5, output: None }, Some(1)).unwrap();
        assert!(out.contains("strategy comparison summary"));
        for strategy in Strategy::ALL {
            assert!(out.contains(&format!("analysis for strategy: {}", strategy)));
        }

        assert!(execute(
            Action::Consistency {
                strategy: Strategy::Adaptive,
                games: 0
            },
            None
        )
        .is_err());
        assert!(execute(Action::Repl, None).is_err());
    }

    #[test]
    fn test_simulate_and_summarize() {
        let path = std::env::temp_dir().join(format!("yahtzee-main-{}.json.deflate", std::process::id()));
        let simulated = execute(
            Action::Simulate {
                games: 4,
                output: Some(path.clone()),
            },
            Some(8),
        )
        .unwrap();
        let summarized = execute(Action::Summarize { path: path.clone() }, None).unwrap();
        assert_eq!(simulated, summarized);
        std::fs::remove_file(&path).unwrap();
    }
}
