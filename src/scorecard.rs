use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::global::*;
use crate::rules::{Category, Section};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("category {0} already used")]
    CategoryUsed(Category),
}

/// Scorecard for player
/// One optional score per category in enumeration order, `None` until used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    scores: [Option<Score>; US_LENGTH + LS_LENGTH],
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, category: Category) -> bool {
        self.scores[category.index()].is_some()
    }

    /// Recorded score of a category, if used
    pub fn score(&self, category: Category) -> Option<Score> {
        self.scores[category.index()]
    }

    /// Score `hand` in `category`
    /// # Returns
    /// The recorded score, or an error leaving the card untouched if the category was used before
    pub fn record(&mut self, category: Category, hand: &Hand) -> Result<Score, RecordError> {
        if self.is_used(category) {
            log::warn!("category {} already used", category);
            return Err(RecordError::CategoryUsed(category));
        }
        let score = category.score(hand);
        self.scores[category.index()] = Some(score);
        Ok(score)
    }

    fn section_total(&self, section: Section) -> Score {
        Category::ALL
            .iter()
            .filter(|category| category.section() == section)
            .filter_map(|&category| self.score(category))
            .sum()
    }

    pub fn upper_total(&self) -> Score {
        self.section_total(Section::Upper)
    }

    pub fn lower_total(&self) -> Score {
        self.section_total(Section::Lower)
    }

    pub fn has_bonus(&self) -> bool {
        self.upper_total() >= US_BONUS_THRESHOLD
    }

    pub fn bonus(&self) -> Score {
        match self.has_bonus() {
            true => US_BONUS,
            _ => 0,
        }
    }

    pub fn total(&self) -> Score {
        self.upper_total() + self.bonus() + self.lower_total()
    }

    /// Unused categories in enumeration order
    pub fn available_categories(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|&category| !self.is_used(category))
            .collect()
    }

    /// Number of used categories
    pub fn filled(&self) -> usize {
        self.scores.iter().filter(|score| score.is_some()).count()
    }

    /// Number of used upper section categories
    pub fn upper_filled(&self) -> usize {
        Category::UPPER
            .iter()
            .filter(|&&category| self.is_used(category))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == Category::ALL.len()
    }
}
