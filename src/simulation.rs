use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::{self, GameError, GameResult, RandomDice};
use crate::stats::{mean, CategoryStats, Summary};
use crate::strategy::Strategy;

/// Dice for the `index`th game of a batch
/// Seeded batches give every game its own reproducible stream.
pub fn dice_for(seed: Option<u64>, index: u64) -> RandomDice<StdRng> {
    RandomDice(match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index)),
        None => StdRng::from_entropy(),
    })
}

/// Play independent games in parallel
/// # Returns
/// Results ordered by game index
pub fn simulate(
    strategy: Strategy,
    games: usize,
    seed: Option<u64>,
) -> Result<Vec<GameResult>, GameError> {
    log::info!("simulating {} games of {}", games, strategy);
    (0..games as u64)
        .into_par_iter()
        .map(|index| game::play(strategy, &mut dice_for(seed, index)))
        .collect()
}

/// Results of all strategies in registry order
pub fn simulate_all(
    games: usize,
    seed: Option<u64>,
) -> Result<Vec<(Strategy, Vec<GameResult>)>, GameError> {
    Strategy::ALL
        .iter()
        .map(|&strategy| Ok((strategy, simulate(strategy, games, seed)?)))
        .collect()
}

/// Two strategies playing the same number of games against each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub first: Strategy,
    pub second: Strategy,
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub ties: usize,
    /// Mean of first score minus second score
    pub mean_difference: f64,
}

impl HeadToHead {
    fn percent(&self, count: usize) -> f64 {
        match self.games {
            0 => 0.0,
            games => count as f64 / games as f64 * 100.0,
        }
    }

    pub fn first_win_rate(&self) -> f64 {
        self.percent(self.first_wins)
    }

    pub fn second_win_rate(&self) -> f64 {
        self.percent(self.second_wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.percent(self.ties)
    }
}

/// Each round plays one game per strategy and compares final scores
pub fn head_to_head(
    first: Strategy,
    second: Strategy,
    games: usize,
    seed: Option<u64>,
) -> Result<HeadToHead, GameError> {
    log::info!("running head-to-head: {} vs {}", first, second);
    let differences: Vec<i32> = (0..games as u64)
        .into_par_iter()
        .map(|round| -> Result<i32, GameError> {
            let first_score = game::play(first, &mut dice_for(seed, 2 * round))?.score;
            let second_score = game::play(second, &mut dice_for(seed, 2 * round + 1))?.score;
            Ok(first_score as i32 - second_score as i32)
        })
        .collect::<Result<_, _>>()?;

    let count = |predicate: fn(i32) -> bool| {
        differences
            .iter()
            .filter(|&&difference| predicate(difference))
            .count()
    };
    Ok(HeadToHead {
        first,
        second,
        games,
        first_wins: count(|difference| difference > 0),
        second_wins: count(|difference| difference < 0),
        ties: count(|difference| difference == 0),
        mean_difference: mean(
            &differences
                .iter()
                .map(|&difference| difference as f64)
                .collect::<Vec<_>>(),
        )
        .unwrap_or(0.0),
    })
}

/// Round robin over all strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Participants in registry order
    pub strategies: Vec<Strategy>,
    /// Win percentage of row strategy against column strategy, zero on the diagonal
    pub win_rates: Vec<Vec<f64>>,
}

impl Tournament {
    /// Average win rate of each participant against all others
    pub fn average_win_rates(&self) -> Vec<f64> {
        let opponents = self.strategies.len().saturating_sub(1).max(1) as f64;
        self.win_rates
            .iter()
            .map(|row| row.iter().sum::<f64>() / opponents)
            .collect()
    }

    /// Participants with their average win rate, best first
    pub fn ranking(&self) -> Vec<(Strategy, f64)> {
        let mut ranking: Vec<(Strategy, f64)> = self
            .strategies
            .iter()
            .copied()
            .zip(self.average_win_rates())
            .collect();
        ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranking
    }
}

/// Head-to-head between every pair of strategies
pub fn tournament(games: usize, seed: Option<u64>) -> Result<Tournament, GameError> {
    let strategies = Strategy::ALL.to_vec();
    let n = strategies.len();
    let mut win_rates = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            // Distinct seed space per pairing
            let pairing_seed = seed.map(|seed| seed.wrapping_add(((i * n + j) * 2 * games) as u64));
            let result = head_to_head(strategies[i], strategies[j], games, pairing_seed)?;
            win_rates[i][j] = result.first_win_rate();
            win_rates[j][i] = result.second_win_rate();
        }
    }
    Ok(Tournament {
        strategies,
        win_rates,
    })
}

/// Spread of scores and category habits of a single strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consistency {
    pub strategy: Strategy,
    pub summary: Summary,
    pub categories: CategoryStats,
}

pub fn consistency(
    strategy: Strategy,
    games: usize,
    seed: Option<u64>,
) -> Result<Option<Consistency>, GameError> {
    log::info!("analyzing consistency for {}", strategy);
    let results = simulate(strategy, games, seed)?;
    Ok(Summary::from_results(&results).map(|summary| Consistency {
        strategy,
        summary,
        categories: CategoryStats::from_results(&results),
    }))
}
