use std::fmt::Write;

use crate::game::GameResult;
use crate::rules::{Category, Section};
use crate::simulation::{Consistency, HeadToHead, Tournament};
use crate::stats::{CategoryStats, Summary};
use crate::strategy::Strategy;

pub fn game(name: &str, result: &GameResult) -> String {
    let mut out = format!("{} scored {}\n", name, result.score);
    for (turn, category) in result.categories.iter().enumerate() {
        let score = result.scores.get(category).copied().unwrap_or(0);
        let _ = writeln!(out, "\tturn {:>2}: {:<16}{:>4}", turn + 1, category.name(), score);
    }
    let _ = write!(
        out,
        "\tupper section: {}{}",
        result.upper,
        if result.bonus { " (bonus)" } else { "" }
    );
    out
}

pub fn summary(strategy: Strategy, summary: &Summary, categories: &CategoryStats) -> String {
    let mut out = format!("analysis for strategy: {}\n", strategy);
    let _ = writeln!(out, "basic statistics:");
    let _ = writeln!(out, "\taverage score: {:.2}", summary.mean);
    let _ = writeln!(out, "\tmedian score: {:.2}", summary.median);
    let _ = writeln!(out, "\tstandard deviation: {:.2}", summary.std_dev);
    let _ = writeln!(out, "\tmin score: {}/max score: {}", summary.min, summary.max);
    let _ = writeln!(out, "\tupper section bonus rate: {:.2}%", summary.bonus_rate);
    let _ = writeln!(out, "\tyahtzee success rate: {:.2}%", summary.yahtzee_rate);
    let _ = write!(out, "category usage patterns:");
    for (section, label) in [(Section::Upper, "upper"), (Section::Lower, "lower")] {
        let _ = write!(out, "\n\t{} section:", label);
        for category in Category::ALL.iter().filter(|category| category.section() == section) {
            let _ = write!(
                out,
                "\n\t\t{}: {:.2}% usage, avg score: {:.2}",
                category,
                categories.usage.get(category).copied().unwrap_or(0.0),
                categories.mean_score.get(category).copied().unwrap_or(0.0),
            );
        }
    }
    out
}

/// Strategies ranked by average score
pub fn comparison(summaries: &[(Strategy, Summary)]) -> String {
    let mut ranked: Vec<&(Strategy, Summary)> = summaries.iter().collect();
    ranked.sort_by(|a, b| b.1.mean.total_cmp(&a.1.mean));
    let mut out = String::from("strategy comparison summary");
    for (rank, (strategy, summary)) in ranked.into_iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {}:\n\taverage: {:.2} ± {:.2}\n\tmedian: {:.2}\n\tbonus rate: {:.2}%\
             \n\tyahtzee rate: {:.2}%\n\trange: {} - {}",
            rank + 1,
            strategy,
            summary.mean,
            summary.std_dev,
            summary.median,
            summary.bonus_rate,
            summary.yahtzee_rate,
            summary.min,
            summary.max,
        );
    }
    out
}

pub fn head_to_head(result: &HeadToHead) -> String {
    format!(
        "results after {} games:\n{} wins: {} ({:.2}%)\n{} wins: {} ({:.2}%)\nties: {} ({:.2}%)\
         \naverage score difference: {:.2}",
        result.games,
        result.first,
        result.first_wins,
        result.first_win_rate(),
        result.second,
        result.second_wins,
        result.second_win_rate(),
        result.ties,
        result.tie_rate(),
        result.mean_difference,
    )
}

pub fn consistency(analysis: &Consistency) -> String {
    let summary = &analysis.summary;
    let mut out = format!("consistency analysis for {}:\n", analysis.strategy);
    let _ = writeln!(out, "interquartile range (iqr): {:.2}", summary.iqr());
    let _ = writeln!(out, "25th percentile: {:.2}", summary.q1);
    let _ = writeln!(out, "75th percentile: {:.2}", summary.q3);
    let _ = writeln!(out, "coefficient of variation: {:.2}%", summary.cv);
    let _ = write!(out, "category usage patterns:");
    let mut usage: Vec<(&Category, &f64)> = analysis.categories.usage.iter().collect();
    usage.sort_by(|a, b| b.1.total_cmp(a.1));
    for (category, share) in usage {
        let _ = write!(out, "\n\t{}: {:.2}%", category, share);
    }
    out
}

pub fn tournament(tournament: &Tournament) -> String {
    let mut out = String::from("tournament results:");
    for (rank, (strategy, rate)) in tournament.ranking().into_iter().enumerate() {
        let _ = write!(out, "\n{}. {}: {:.2}% average win rate", rank + 1, strategy, rate);
    }
    out
}

pub fn strategies() -> String {
    Strategy::ALL
        .iter()
        .enumerate()
        .map(|(i, strategy)| format!("{}. {} ({})", i + 1, strategy.id(), strategy))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Category::*;

    #[test]
    fn test_head_to_head() {
        let result = HeadToHead {
            first: Strategy::Adaptive,
            second: Strategy::GreedyUpper,
            games: 4,
            first_wins: 3,
            second_wins: 1,
            ties: 0,
            mean_difference: 12.5,
        };
        assert_eq!(
            head_to_head(&result),
            "results after 4 games:\nadaptive strategy wins: 3 (75.00%)\n\
             greedy upper section wins: 1 (25.00%)\nties: 0 (0.00%)\n\
             average score difference: 12.50"
        );
    }

    #[test]
    fn test_tournament() {
        let tournament = Tournament {
            strategies: vec![Strategy::GreedyUpper, Strategy::Adaptive],
            win_rates: vec![vec![0.0, 40.0], vec![55.0, 0.0]],
        };
        assert_eq!(
            super::tournament(&tournament),
            "tournament results:\n1. adaptive strategy: 55.00% average win rate\n\
             2. greedy upper section: 40.00% average win rate"
        );
    }

    #[test]
    fn test_game() {
        let result = GameResult {
            score: 50,
            upper: 0,
            bonus: false,
            yahtzee: 50,
            categories: vec![Yahtzee],
            scores: [(Yahtzee, 50)].into_iter().collect(),
        };
        let out = game("yahtzee or bust", &result);
        assert!(out.starts_with("yahtzee or bust scored 50\n"));
        assert!(out.contains("turn  1: Yahtzee"));
    }

    #[test]
    fn test_strategies() {
        let listing = strategies();
        assert_eq!(listing.lines().count(), Strategy::ALL.len());
        assert!(listing.starts_with("1. greedy-upper (greedy upper section)"));
    }
}
