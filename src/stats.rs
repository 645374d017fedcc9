use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::GameResult;
use crate::global::*;
use crate::rules::Category;

/// Roll-up of final scores over many games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: Score,
    pub max: Score,
    /// 25th percentile
    pub q1: f64,
    /// 75th percentile
    pub q3: f64,
    /// Coefficient of variation in percent
    pub cv: f64,
    /// Share of games earning the upper section bonus in percent
    pub bonus_rate: f64,
    /// Share of games scoring the Yahtzee field in percent
    pub yahtzee_rate: f64,
}

impl Summary {
    /// Summarize results, `None` when there are none
    pub fn from_results(results: &[GameResult]) -> Option<Summary> {
        let mut scores: Vec<f64> = results.iter().map(|result| result.score as f64).collect();
        scores.sort_by(f64::total_cmp);

        let games = results.len();
        let mean = mean(&scores)?;
        let std_dev = (scores.iter().map(|score| (score - mean).powi(2)).sum::<f64>()
            / games as f64)
            .sqrt();
        let share = |predicate: fn(&GameResult) -> bool| {
            results.iter().filter(|&result| predicate(result)).count() as f64 / games as f64 * 100.0
        };

        Some(Summary {
            games,
            mean,
            median: percentile(&scores, 50.0)?,
            std_dev,
            min: results.iter().map(|result| result.score).min()?,
            max: results.iter().map(|result| result.score).max()?,
            q1: percentile(&scores, LOWER_QUARTILE)?,
            q3: percentile(&scores, UPPER_QUARTILE)?,
            cv: if mean > 0.0 { std_dev / mean * 100.0 } else { 0.0 },
            bonus_rate: share(|result| result.bonus),
            yahtzee_rate: share(|result| result.yahtzee > 0),
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// How a strategy fills the scorecard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Share of all turns spent on each category in percent
    pub usage: BTreeMap<Category, f64>,
    /// Mean score recorded in each category
    pub mean_score: BTreeMap<Category, f64>,
}

impl CategoryStats {
    pub fn from_results(results: &[GameResult]) -> CategoryStats {
        let mut chosen: BTreeMap<Category, usize> = BTreeMap::new();
        let mut recorded: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
        for result in results {
            for &category in &result.categories {
                *chosen.entry(category).or_insert(0) += 1;
            }
            for (&category, &score) in &result.scores {
                recorded.entry(category).or_default().push(score as f64);
            }
        }

        let turns: usize = chosen.values().sum();
        CategoryStats {
            usage: chosen
                .into_iter()
                .map(|(category, count)| (category, count as f64 / turns as f64 * 100.0))
                .collect(),
            mean_score: recorded
                .into_iter()
                .filter_map(|(category, scores)| Some((category, mean(&scores)?)))
                .collect(),
        }
    }
}

/// Arithmetic mean, `None` for no values
pub fn mean(values: &[f64]) -> Option<f64> {
    match values.len() {
        0 => None,
        len => Some(values.iter().sum::<f64>() / len as f64),
    }
}

/// Percentile by linear interpolation between closest ranks
/// # Arguments
/// * `sorted` - ascending
/// * `percent` - 0 to 100
pub fn percentile(sorted: &[f64], percent: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = percent.clamp(0.0, 100.0) / 100.0 * last as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    Some(sorted[below] + (sorted[above] - sorted[below]) * (rank - below as f64))
}
