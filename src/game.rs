use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::global::*;
use crate::rules::Category;
use crate::scorecard::{RecordError, Scorecard};
use crate::strategy::{self, Strategy};

/// Source of dice rolls
pub trait DiceSource {
    /// Roll `count` fresh dice
    fn roll(&mut self, count: usize) -> PartialHand;
}

/// Uniform d6 rolls from any random number generator
pub struct RandomDice<R>(pub R);

impl<R: Rng> DiceSource for RandomDice<R> {
    fn roll(&mut self, count: usize) -> PartialHand {
        let (min, max) = D6;
        (0..count).map(|_| self.0.gen_range(min..=max)).collect()
    }
}

/// Repeats a fixed sequence of pips forever
#[cfg(test)]
pub struct ScriptedDice {
    pips: Vec<Pip>,
    position: usize,
}

#[cfg(test)]
impl ScriptedDice {
    pub fn new(pips: Vec<Pip>) -> Self {
        assert!(!pips.is_empty(), "script must not be empty");
        ScriptedDice { pips, position: 0 }
    }
}

#[cfg(test)]
impl DiceSource for ScriptedDice {
    fn roll(&mut self, count: usize) -> PartialHand {
        (0..count)
            .map(|_| {
                let pip = self.pips[self.position];
                self.position = (self.position + 1) % self.pips.len();
                pip
            })
            .collect()
    }
}

/// Broken contract between engine and strategy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("{strategy} kept {keep:?}, which is not part of {hand:?}")]
    IllegalKeep {
        strategy: Strategy,
        hand: PartialHand,
        keep: PartialHand,
    },
    #[error("{strategy} chose {category}, which is not available")]
    UnavailableCategory { strategy: Strategy, category: Category },
    #[error("{0} found no category left to score")]
    NoCategoryLeft(Strategy),
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Outcome of a single game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Final score including upper section bonus
    pub score: Score,
    /// Upper section subtotal, without bonus
    pub upper: Score,
    /// Whether the upper section bonus was earned
    pub bonus: bool,
    /// Score in the Yahtzee field
    pub yahtzee: Score,
    /// Category chosen in each turn, in turn order
    pub categories: Vec<Category>,
    /// Score recorded per category
    pub scores: BTreeMap<Category, Score>,
}

impl GameResult {
    fn from_card(card: &Scorecard, categories: Vec<Category>) -> Self {
        GameResult {
            score: card.total(),
            upper: card.upper_total(),
            bonus: card.has_bonus(),
            yahtzee: card.score(Category::Yahtzee).unwrap_or(0),
            categories,
            scores: Category::ALL
                .iter()
                .filter_map(|&category| card.score(category).map(|score| (category, score)))
                .collect(),
        }
    }
}

/// Play a full game with the strategy of the given name
pub fn run_game(name: &str, dice: &mut impl DiceSource) -> Result<GameResult, GameError> {
    let strategy =
        strategy::by_name(name).ok_or_else(|| GameError::UnknownStrategy(name.to_string()))?;
    play(strategy, dice)
}

/// Play a full game: one turn per category
pub fn play(strategy: Strategy, dice: &mut impl DiceSource) -> Result<GameResult, GameError> {
    let mut card = Scorecard::new();
    let mut categories = Vec::with_capacity(TURNS);
    while !card.is_complete() {
        let hand = play_turn(strategy, &card, dice)?;
        let category = strategy
            .choose_category(&hand, &card)
            .ok_or(GameError::NoCategoryLeft(strategy))?;
        if card.is_used(category) {
            return Err(GameError::UnavailableCategory { strategy, category });
        }
        let score = card.record(category, &hand)?;
        log::trace!(
            "{}: turn {} scored {} as {} with {:?}",
            strategy,
            categories.len() + 1,
            score,
            category,
            hand
        );
        categories.push(category);
    }
    let result = GameResult::from_card(&card, categories);
    log::debug!("{}: game over with {}", strategy, result.score);
    Ok(result)
}

/// Roll and reroll within a turn
/// # Returns
/// Final hand of the turn
fn play_turn(
    strategy: Strategy,
    card: &Scorecard,
    dice: &mut impl DiceSource,
) -> Result<PartialHand, GameError> {
    let mut hand = dice.roll(DICE);
    for _ in 1..THROWS {
        let mut keep = strategy.reroll(&hand, card);
        if !drawn_from(&keep, &hand) {
            return Err(GameError::IllegalKeep {
                strategy,
                hand,
                keep,
            });
        }
        let rerolls = DICE - keep.len();
        if rerolls == 0 {
            break;
        }
        keep.extend(dice.roll(rerolls));
        hand = keep;
    }
    Ok(hand)
}

/// Whether `keep` can be picked out of `hand`, respecting multiplicity
fn drawn_from(keep: &Hand, hand: &Hand) -> bool {
    let mut left = hand.to_vec();
    keep.iter().all(|pip| match left.iter().position(|die| die == pip) {
        Some(index) => {
            left.swap_remove(index);
            true
        }
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::rules::Category::*;

    #[test]
    fn test_drawn_from() {
        assert!(drawn_from(&[], &[1, 2, 3, 4, 5]));
        assert!(drawn_from(&[5, 1, 3, 2, 4], &[1, 2, 3, 4, 5]));
        assert!(drawn_from(&[2, 2], &[2, 3, 2, 4, 5]));
        assert!(!drawn_from(&[2, 2], &[2, 3, 1, 4, 5]));
        assert!(!drawn_from(&[6], &[2, 3, 1, 4, 5]));
        assert!(!drawn_from(&[1, 1, 1, 1, 1, 1], &[1, 1, 1, 1, 1]));
    }

    #[test]
    fn test_random_dice() {
        let mut dice = RandomDice(StdRng::seed_from_u64(7));
        let rolled = dice.roll(1000);
        assert_eq!(rolled.len(), 1000);
        assert!(rolled.iter().all(|pip| (1..=6).contains(pip)));
        for pip in 1..=6 {
            assert!(rolled.contains(&pip));
        }
    }

    #[test]
    fn test_scripted_dice() {
        let mut dice = ScriptedDice::new(vec![1, 2, 3]);
        assert_eq!(dice.roll(5), vec![1, 2, 3, 1, 2]);
        assert_eq!(dice.roll(2), vec![3, 1]);
    }

    #[test]
    fn test_all_fives() {
        for strategy in Strategy::ALL {
            let mut dice = ScriptedDice::new(vec![5]);
            let result = play(strategy, &mut dice).unwrap();
            assert_eq!(result.yahtzee, YAHTZEE_SCORE, "{}", strategy);
            for category in Category::UPPER {
                let expected = if category == Fives { 25 } else { 0 };
                assert_eq!(result.scores[&category], expected, "{} {}", strategy, category);
            }
            assert_eq!(result.upper, 25);
            assert!(!result.bonus);
        }
    }

    #[test]
    fn test_categories_cover_card() {
        for strategy in Strategy::ALL {
            for seed in 0..20 {
                let mut dice = RandomDice(StdRng::seed_from_u64(seed));
                let result = play(strategy, &mut dice).unwrap();
                assert_eq!(result.categories.len(), TURNS);
                let mut sorted = result.categories.clone();
                sorted.sort();
                assert_eq!(sorted, Category::ALL.to_vec());
                assert_eq!(result.scores.len(), TURNS);

                let upper: Score = Category::UPPER.iter().map(|c| result.scores[c]).sum();
                let lower: Score = Category::ALL[US_LENGTH..]
                    .iter()
                    .map(|c| result.scores[c])
                    .sum();
                assert_eq!(result.upper, upper);
                assert_eq!(result.bonus, upper >= US_BONUS_THRESHOLD);
                let bonus = if result.bonus { US_BONUS } else { 0 };
                assert_eq!(result.score, upper + bonus + lower);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        for strategy in Strategy::ALL {
            let first = run_game(strategy.id(), &mut RandomDice(StdRng::seed_from_u64(42)));
            let second = run_game(strategy.id(), &mut RandomDice(StdRng::seed_from_u64(42)));
            assert_eq!(first, second);
            assert!(first.is_ok());
        }
        let mut first = ScriptedDice::new(vec![3, 1, 4, 1, 5, 6, 2, 6, 5, 3]);
        let mut second = ScriptedDice::new(vec![3, 1, 4, 1, 5, 6, 2, 6, 5, 3]);
        assert_eq!(
            run_game("adaptive", &mut first),
            run_game("adaptive", &mut second)
        );
    }

    #[test]
    fn test_unknown_strategy() {
        let mut dice = ScriptedDice::new(vec![1]);
        assert_eq!(
            run_game("optimal", &mut dice),
            Err(GameError::UnknownStrategy(String::from("optimal")))
        );
    }

    #[test]
    fn test_turn_stops_when_keeping_all() {
        // A large straight is kept by the hybrid strategy, so only five dice are rolled
        let mut dice = ScriptedDice::new(vec![1, 2, 3, 4, 5, 6]);
        let hand = play_turn(Strategy::HybridProbability, &Scorecard::new(), &mut dice).unwrap();
        assert_eq!(hand, vec![1, 2, 3, 4, 5]);
        assert_eq!(dice.roll(1), vec![6]);
    }

    #[test]
    fn test_turn_rerolls_twice() {
        // Yahtzee or bust keeps the 6, then the pair of 6s
        let mut dice = ScriptedDice::new(vec![1, 2, 3, 4, 6, 6, 1, 2, 3, 5, 5, 5]);
        let hand = play_turn(Strategy::YahtzeeOrBust, &Scorecard::new(), &mut dice).unwrap();
        assert_eq!(hand, vec![6, 6, 5, 5, 5]);
    }

    #[test]
    fn test_game_over_full_house_and_chance() {
        let mut dice = ScriptedDice::new(vec![2, 2, 3, 3, 3]);
        let result = play(Strategy::LowerPriority, &mut dice).unwrap();
        assert_eq!(result.categories[0], FullHouse);
        assert_eq!(result.scores[&FullHouse], FULL_HOUSE_SCORE);
        assert_eq!(result.scores[&Yahtzee], 0);
    }
}
