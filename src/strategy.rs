use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::global::*;
use crate::hands::*;
use crate::rules::Category::{self, *};
use crate::scorecard::Scorecard;

/// Heuristic player, deciding which dice to keep and where to score
/// Stateless across turns, decisions depend only on the hand and the scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Chase the highest open upper section field
    GreedyUpper,
    /// Keep whatever is closest to a scoring hand
    HybridProbability,
    /// Chase the most frequent pip
    YahtzeeOrBust,
    /// Fill the lower section first
    LowerPriority,
    /// Change plans with game progress
    Adaptive,
}

/// Lower section fields from most to least valuable pattern
const LOWER_PRIORITY: [Category; 6] = [
    Yahtzee,
    LargeStraight,
    SmallStraight,
    FullHouse,
    FourOfAKind,
    ThreeOfAKind,
];

/// Lookup by identifier or display name
static REGISTRY: Lazy<HashMap<&'static str, Strategy>> = Lazy::new(|| {
    Strategy::ALL
        .iter()
        .flat_map(|&strategy| [(strategy.id(), strategy), (strategy.name(), strategy)])
        .collect()
});

/// Resolve a strategy from its identifier or display name
pub fn by_name(name: &str) -> Option<Strategy> {
    REGISTRY.get(name.trim()).copied()
}

impl Strategy {
    /// Registry order, from the simplest to the most involved
    pub const ALL: [Strategy; 5] = [
        Strategy::GreedyUpper,
        Strategy::HybridProbability,
        Strategy::YahtzeeOrBust,
        Strategy::LowerPriority,
        Strategy::Adaptive,
    ];

    /// Identifier for the command line
    pub fn id(self) -> &'static str {
        match self {
            Strategy::GreedyUpper => "greedy-upper",
            Strategy::HybridProbability => "hybrid-probability",
            Strategy::YahtzeeOrBust => "yahtzee-or-bust",
            Strategy::LowerPriority => "lower-priority",
            Strategy::Adaptive => "adaptive",
        }
    }

    /// Name for reports
    pub fn name(self) -> &'static str {
        match self {
            Strategy::GreedyUpper => "greedy upper section",
            Strategy::HybridProbability => "hybrid probability",
            Strategy::YahtzeeOrBust => "yahtzee or bust",
            Strategy::LowerPriority => "lower section priority",
            Strategy::Adaptive => "adaptive strategy",
        }
    }

    /// Choose dice to keep for rerolling
    /// # Arguments
    /// * `hand` - non-empty
    /// * `card` - scorecard of the ongoing game
    /// # Returns
    /// Dice out of `hand` to keep, all others are rerolled
    pub fn reroll(self, hand: &Hand, card: &Scorecard) -> PartialHand {
        match self {
            Strategy::GreedyUpper => greedy_upper_reroll(hand, card),
            Strategy::HybridProbability => hybrid_reroll(hand),
            Strategy::YahtzeeOrBust => yahtzee_or_bust_reroll(hand),
            Strategy::LowerPriority => lower_priority_reroll(hand),
            Strategy::Adaptive => match Phase::of(card) {
                Phase::Early => early_reroll(hand),
                Phase::Mid => mid_reroll(hand, card),
                Phase::Late => late_reroll(hand, card),
            },
        }
    }

    /// Choose category to score at end of turn
    /// # Returns
    /// An available category, `None` only if the card is full
    pub fn choose_category(self, hand: &Hand, card: &Scorecard) -> Option<Category> {
        let available = card.available_categories();
        let choice = match self {
            Strategy::GreedyUpper => greedy_upper_category(hand, &available),
            Strategy::HybridProbability => hybrid_category(hand, &available),
            Strategy::YahtzeeOrBust => yahtzee_or_bust_category(hand, &available),
            Strategy::LowerPriority => lower_priority_category(hand, &available),
            Strategy::Adaptive => adaptive_category(hand, card, &available),
        };
        choice.or_else(|| available.first().copied())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        by_name(name).ok_or_else(|| format!("Unknown strategy: {}", name))
    }
}

/// Keep all dice showing one of `pips`
fn keep_pips(hand: &Hand, pips: &[Pip]) -> PartialHand {
    hand.iter().copied().filter(|pip| pips.contains(pip)).collect()
}

/// Keep dice of the first pip appearing exactly `count` times
fn keep_exactly(hand: &Hand, count: Frequency) -> Option<PartialHand> {
    tally(hand)
        .into_iter()
        .find(|&(_, frequency)| frequency == count)
        .map(|(pip, _)| keep_pips(hand, &[pip]))
}

/// Keep dice of the lowest run of `length` consecutive pips, duplicates included
fn keep_run(hand: &Hand, length: usize) -> Option<PartialHand> {
    runs(&distinct(hand), length).next().map(|run| keep_pips(hand, run))
}

/// Keep the whole hand if it is a full house
fn keep_full_house(hand: &Hand) -> Option<PartialHand> {
    (full_house(hand) > 0).then(|| hand.to_vec())
}

/// Keep the higher of two pairs
fn keep_higher_pair(hand: &Hand) -> Option<PartialHand> {
    let pairs: Vec<Pip> = tally(hand)
        .into_iter()
        .filter(|&(_, frequency)| frequency == 2)
        .map(|(pip, _)| pip)
        .collect();
    match pairs.as_slice() {
        &[first, second] => Some(keep_pips(hand, &[first.max(second)])),
        _ => None,
    }
}

/// Keep the most frequent pip
fn keep_most_common(hand: &Hand) -> PartialHand {
    most_common(hand)
        .map(|(pip, _)| keep_pips(hand, &[pip]))
        .unwrap_or_default()
}

/// Keep the single highest die
fn keep_highest(hand: &Hand) -> PartialHand {
    hand.iter().max().map(|&pip| vec![pip]).unwrap_or_default()
}

/// First candidate with the highest score
fn best(candidates: impl IntoIterator<Item = (Category, Score)>) -> Option<(Category, Score)> {
    candidates
        .into_iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
}

/// First candidate with the lowest score
fn worst(candidates: impl IntoIterator<Item = (Category, Score)>) -> Option<(Category, Score)> {
    candidates
        .into_iter()
        .reduce(|worst, candidate| if candidate.1 < worst.1 { candidate } else { worst })
}

/// Score `hand` in each of `categories` that is still available
fn candidates<'a>(
    hand: &'a Hand,
    available: &'a [Category],
    categories: &'a [Category],
) -> impl Iterator<Item = (Category, Score)> + 'a {
    categories
        .iter()
        .filter(move |category| available.contains(category))
        .map(move |&category| (category, category.score(hand)))
}

/// Best-scoring available upper section field, if it scores anything
fn best_upper(hand: &Hand, available: &[Category]) -> Option<Category> {
    best(candidates(hand, available, &Category::UPPER))
        .filter(|&(_, score)| score > 0)
        .map(|(category, _)| category)
}

fn greedy_upper_reroll(hand: &Hand, card: &Scorecard) -> PartialHand {
    match Category::UPPER
        .iter()
        .rev()
        .find(|&&category| !card.is_used(category))
        .and_then(|category| category.pip())
    {
        Some(pip) => keep_pips(hand, &[pip]),
        None => keep_most_common(hand),
    }
}

fn greedy_upper_category(hand: &Hand, available: &[Category]) -> Option<Category> {
    // Any open upper field is taken, even for nothing
    best(candidates(hand, available, &Category::UPPER))
        .map(|(category, _)| category)
        .or_else(|| (available.contains(&Yahtzee) && yahtzee(hand) > 0).then(|| Yahtzee))
        .or_else(|| available.contains(&Chance).then(|| Chance))
}

fn hybrid_reroll(hand: &Hand) -> PartialHand {
    keep_exactly(hand, 5)
        .or_else(|| keep_exactly(hand, 4))
        .or_else(|| keep_run(hand, 5))
        .or_else(|| keep_run(hand, 4))
        .or_else(|| keep_full_house(hand))
        .or_else(|| keep_exactly(hand, 3))
        .or_else(|| keep_higher_pair(hand))
        .or_else(|| keep_exactly(hand, 2))
        .unwrap_or_else(|| keep_highest(hand))
}

fn hybrid_category(hand: &Hand, available: &[Category]) -> Option<Category> {
    best(candidates(hand, available, &LOWER_PRIORITY))
        .filter(|&(_, score)| score > 0)
        .map(|(category, _)| category)
        .or_else(|| best_upper(hand, available))
        .or_else(|| {
            [Aces, Twos, Chance]
                .into_iter()
                .find(|category| available.contains(category))
        })
}

fn yahtzee_or_bust_reroll(hand: &Hand) -> PartialHand {
    match most_common(hand) {
        Some((pip, frequency)) if frequency >= 2 => keep_pips(hand, &[pip]),
        _ => keep_highest(hand),
    }
}

fn yahtzee_or_bust_category(hand: &Hand, available: &[Category]) -> Option<Category> {
    [Yahtzee, FourOfAKind, ThreeOfAKind]
        .into_iter()
        .find(|&category| available.contains(&category) && category.score(hand) > 0)
        .or_else(|| {
            // Highest pip in hand with its upper field open
            Category::UPPER
                .into_iter()
                .rev()
                .find(|&category| available.contains(&category) && category.score(hand) > 0)
        })
        .or_else(|| available.contains(&Chance).then(|| Chance))
}

fn lower_priority_reroll(hand: &Hand) -> PartialHand {
    keep_exactly(hand, 5)
        .or_else(|| keep_exactly(hand, 4))
        .or_else(|| keep_run(hand, 5))
        .or_else(|| keep_run(hand, 4))
        .or_else(|| keep_full_house(hand))
        .or_else(|| keep_exactly(hand, 3))
        .or_else(|| keep_run(hand, 3))
        .or_else(|| keep_exactly(hand, 2))
        .unwrap_or_else(|| keep_highest(hand))
}

fn lower_priority_category(hand: &Hand, available: &[Category]) -> Option<Category> {
    candidates(hand, available, &LOWER_PRIORITY)
        .find(|&(_, score)| score > 0)
        .map(|(category, _)| category)
        .or_else(|| best_upper(hand, available))
        .or_else(|| available.contains(&Chance).then(|| Chance))
}

/// Progress of a game as seen by the adaptive strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Early,
    Mid,
    Late,
}

impl Phase {
    fn of(card: &Scorecard) -> Phase {
        match card.filled() {
            filled if filled < EARLY_GAME_END => Phase::Early,
            filled if filled < MID_GAME_END => Phase::Mid,
            _ => Phase::Late,
        }
    }
}

/// Points still needed for the upper section bonus and the open upper slots to get them in
/// `None` once the bonus is secured or no upper slots are left
fn bonus_pace(card: &Scorecard) -> Option<(Score, Score)> {
    let slots_left = (US_LENGTH - card.upper_filled()) as Score;
    let upper = card.upper_total();
    (slots_left > 0 && upper < US_BONUS_THRESHOLD)
        .then(|| (US_BONUS_THRESHOLD - upper, slots_left))
}

fn early_reroll(hand: &Hand) -> PartialHand {
    let groups = tally(hand);
    if groups.iter().any(|&(_, frequency)| frequency >= 4) {
        return hand.to_vec();
    }
    if let Some(keep) = keep_run(hand, 5)
        .or_else(|| keep_full_house(hand))
        .or_else(|| keep_run(hand, 4))
    {
        return keep;
    }
    if let Some(&(pip, _)) = groups.iter().find(|&&(_, frequency)| frequency == 3) {
        if pip >= 4 {
            return keep_pips(hand, &[pip]);
        }
    }
    let high_pairs: Vec<Pip> = groups
        .iter()
        .filter(|&&(pip, frequency)| frequency == 2 && pip >= 4)
        .map(|&(pip, _)| pip)
        .collect();
    if !high_pairs.is_empty() {
        return keep_pips(hand, &high_pairs);
    }
    let duplicated: Vec<Pip> = groups
        .iter()
        .filter(|&&(_, frequency)| frequency > 1)
        .map(|&(pip, _)| pip)
        .collect();
    match duplicated.is_empty() {
        true => keep_highest(hand),
        _ => keep_pips(hand, &duplicated),
    }
}

fn mid_reroll(hand: &Hand, card: &Scorecard) -> PartialHand {
    if let Some((needed, slots_left)) = bonus_pace(card) {
        if needed > BONUS_PACE_PER_SLOT * slots_left {
            let high: PartialHand = hand.iter().copied().filter(|&pip| pip >= 4).collect();
            if !high.is_empty() {
                return high;
            }
        }
    }
    keep_exactly(hand, 5)
        .or_else(|| keep_exactly(hand, 4))
        .or_else(|| keep_run(hand, 5))
        .or_else(|| keep_run(hand, 4))
        .or_else(|| keep_full_house(hand))
        .or_else(|| keep_exactly(hand, 3))
        .or_else(|| keep_exactly(hand, 2))
        .unwrap_or_else(|| keep_highest(hand))
}

fn late_reroll(hand: &Hand, card: &Scorecard) -> PartialHand {
    let groups = tally(hand);
    let has = |frequencies: &[Frequency]| {
        groups
            .iter()
            .any(|(_, frequency)| frequencies.contains(frequency))
    };

    for category in card.available_categories() {
        let keep = match category {
            Aces | Twos | Threes | Fours | Fives | Sixes => category
                .pip()
                .filter(|pip| hand.contains(pip))
                .map(|pip| keep_pips(hand, &[pip])),
            Yahtzee => has(&[3, 4, 5]).then(|| keep_most_common(hand)),
            SmallStraight | LargeStraight => (distinct(hand).len() >= 4).then(|| hand.to_vec()),
            FullHouse => {
                let pairs = groups.iter().filter(|&&(_, frequency)| frequency == 2).count();
                (has(&[3]) || pairs == 2).then(|| hand.to_vec())
            }
            ThreeOfAKind | FourOfAKind => has(&[2, 3, 4]).then(|| keep_most_common(hand)),
            Chance => None,
        };
        if let Some(keep) = keep {
            return keep;
        }
    }

    let mut highest = hand.to_vec();
    highest.sort_unstable_by(|a, b| b.cmp(a));
    highest.truncate(3);
    highest
}

fn adaptive_category(hand: &Hand, card: &Scorecard, available: &[Category]) -> Option<Category> {
    let scored: Vec<(Category, Score)> = candidates(hand, available, &LOWER_PRIORITY)
        .chain(candidates(hand, available, &[Chance]))
        .chain(candidates(hand, available, &Category::UPPER))
        .collect();
    let best_nonzero = |scored: &[(Category, Score)]| {
        best(scored.iter().copied().filter(|&(_, score)| score > 0))
    };

    let choice = match Phase::of(card) {
        Phase::Mid => bonus_pace(card)
            .and_then(|(needed, slots_left)| {
                // Take an upper field if it keeps the bonus on pace
                best_nonzero(
                    &scored
                        .iter()
                        .copied()
                        .filter(|(category, _)| category.pip().is_some())
                        .collect::<Vec<_>>(),
                )
                .filter(|&(_, score)| score * slots_left >= needed)
            })
            .or_else(|| best_nonzero(&scored)),
        Phase::Early | Phase::Late => best_nonzero(&scored),
    };

    // Sacrifice the least valuable field when nothing scores
    choice
        .or_else(|| worst(scored.iter().copied()))
        .map(|(category, _)| category)
}
