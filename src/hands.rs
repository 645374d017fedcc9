use crate::global::*;

/// Upper section fields
/// # Arguments
/// * `field` - required field, e.g. `3` for Count Threes
/// * `hand` - in any order
pub fn generic_upper_section(field: Pip, hand: &Hand) -> Score {
    hand.iter().filter(|&&pip| pip == field).count() as Score * field as Score
}

/// Calculate sum of hand
#[inline]
pub fn total(hand: &Hand) -> Score {
    hand.iter().map(|&pip| pip as Score).sum()
}

/// Frequency analysis over hand
/// # Returns
/// Pips with their frequencies, in order of first appearance in the hand
pub fn tally(hand: &Hand) -> Vec<(Pip, Frequency)> {
    let mut groups: Vec<(Pip, Frequency)> = Vec::with_capacity(hand.len());
    for &pip in hand {
        match groups.iter_mut().find(|(seen, _)| *seen == pip) {
            Some((_, count)) => *count += 1,
            None => groups.push((pip, 1)),
        }
    }
    groups
}

/// Frequencies of a hand, sorted, without pips
fn frequencies(hand: &Hand) -> Vec<Frequency> {
    let mut groups: Vec<Frequency> = tally(hand).into_iter().map(|(_, count)| count).collect();
    groups.sort_unstable();
    groups
}

/// Distinct pips of a hand, sorted ascending
pub fn distinct(hand: &Hand) -> Vec<Pip> {
    let mut pips = hand.to_vec();
    pips.sort_unstable();
    pips.dedup();
    pips
}

/// Most frequent pip, the earliest appearing one on ties
pub fn most_common(hand: &Hand) -> Option<(Pip, Frequency)> {
    tally(hand)
        .into_iter()
        .reduce(|best, group| if group.1 > best.1 { group } else { best })
}

/// Three and Four of a Kind
/// # Arguments
/// * `required` - minimum frequency of a single pip
/// * `hand` - in any order
/// # Returns
/// Sum of *all* dice when met
pub fn generic_identical(required: Frequency, hand: &Hand) -> Score {
    match tally(hand).iter().any(|&(_, count)| count >= required) {
        true => total(hand),
        _ => 0,
    }
}

/// Exactly one pair and one triple; five alike do not count
pub fn full_house(hand: &Hand) -> Score {
    match frequencies(hand).as_slice() {
        [2, 3] => FULL_HOUSE_SCORE,
        _ => 0,
    }
}

/// Lower section straights
/// # Arguments
/// * `length` - desired length, e.g. `5` for Large Straight
/// * `score` - score if the hand is a straight, e.g. `40` for Large Straight
/// * `hand` - in any order
pub fn generic_straight(length: usize, score: Score, hand: &Hand) -> Score {
    // Distinct pips are strictly increasing, so a window spanning exactly
    // `length - 1` is a consecutive run
    match runs(&distinct(hand), length).next() {
        Some(_) => score,
        None => 0,
    }
}

/// Windows of consecutive pips of a given length
/// # Arguments
/// * `distinct` - sorted, without duplicates
pub fn runs(distinct: &[Pip], length: usize) -> impl Iterator<Item = &[Pip]> {
    distinct
        .windows(length.max(1))
        .filter(move |window| (window[window.len() - 1] - window[0]) as usize == length - 1)
}

/// All five dice alike
pub fn yahtzee(hand: &Hand) -> Score {
    match distinct(hand).len() {
        1 => YAHTZEE_SCORE,
        _ => 0,
    }
}
