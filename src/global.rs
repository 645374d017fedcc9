/// Global types and constants

/// Number on a die (1-6 for d6)
pub type Pip = u8;
/// Die with minimum and maximum, e.g. (1, 6) for d6
pub type Die = (Pip, Pip);
/// Dice held at some point of a turn, order insignificant for scoring
pub type Hand = [Pip];
/// Dice picked out of a hand, e.g. the ones kept for a reroll
pub type PartialHand = Vec<Pip>;
/// Absolute frequency of a pip in a hand
pub type Frequency = u8;
/// Score on the card, both individual categories and end results
pub type Score = i16;

/// The only die in play
pub const D6: Die = (1, 6);
/// Dice rolled per hand
pub const DICE: usize = 5;
/// Rolls per turn, including the initial one
pub const THROWS: usize = 3;
/// Turns per game, one per category
pub const TURNS: usize = 13;

/// Field count in upper section
pub const US_LENGTH: usize = 6;
/// Field count in lower section
pub const LS_LENGTH: usize = 7;

/// Scores of various hands
pub const FULL_HOUSE_SCORE: Score = 25;
pub const SMALL_STRAIGHT_SCORE: Score = 30;
pub const LARGE_STRAIGHT_SCORE: Score = 40;
pub const YAHTZEE_SCORE: Score = 50;

/// Score required to receive upper section bonus
pub const US_BONUS_THRESHOLD: Score = 63;
/// Bonus score granted when requirement was met
pub const US_BONUS: Score = 35;

/// Categories filled before the adaptive strategy leaves its early game
pub const EARLY_GAME_END: usize = 4;
/// Categories filled before the adaptive strategy enters its late game
pub const MID_GAME_END: usize = 9;
/// Points per open upper slot beyond which the bonus counts as out of pace
pub const BONUS_PACE_PER_SLOT: Score = 10;

/// Default game counts for the analyses
pub const DEFAULT_SIMULATIONS: usize = 10_000;
pub const DEFAULT_HEAD_TO_HEAD_GAMES: usize = 1_000;
pub const DEFAULT_TOURNAMENT_GAMES: usize = 1_000;
pub const DEFAULT_CONSISTENCY_GAMES: usize = 1_000;

/// Percentiles reported as quartiles
pub const LOWER_QUARTILE: f64 = 25.0;
pub const UPPER_QUARTILE: f64 = 75.0;
