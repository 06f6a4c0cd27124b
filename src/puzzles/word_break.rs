//! Word break
//!
//! Split a string into a sequence of dictionary words. An edit takes the next
//! word starting at the cursor and consumes its length from the budget, so the
//! remaining budget is always the number of unsegmented characters. The
//! sub-problem depends on the cursor alone, which makes it memoizable.

use super::{Puzzle, PuzzleError, PuzzleKind, PuzzleShape};
use crate::engine::{search, CostFn, Problem, SearchMode, Workspace};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBreak {
    text: Vec<char>,
    dictionary: BTreeSet<String>,
    longest_word: usize,
}

/// Words chosen so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    words: Vec<String>,
    cursor: usize,
}

/// Take the characters `start..end` as the next word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Take {
    pub start: usize,
    pub end: usize,
    pub word: String,
}

impl Segmentation {
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Workspace for Segmentation {
    type Edit = Take;

    fn apply(&mut self, take: &Take) {
        self.words.push(take.word.clone());
        self.cursor = take.end;
    }

    fn undo(&mut self, take: &Take) {
        self.words.pop();
        self.cursor = take.start;
    }
}

impl WordBreak {
    pub fn new<I, S>(text: &str, dictionary: I) -> Result<Self, PuzzleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dictionary: BTreeSet<String> = dictionary.into_iter().map(Into::into).collect();
        if dictionary.iter().any(|word| word.is_empty()) {
            return Err(PuzzleError::EmptyInput { what: "dictionary word" });
        }
        let longest_word = dictionary.iter().map(|word| word.chars().count()).max().unwrap_or(0);

        Ok(Self {
            text: text.chars().collect(),
            dictionary,
            longest_word,
        })
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn dictionary(&self) -> &BTreeSet<String> {
        &self.dictionary
    }

    /// Every segmentation, words separated by single spaces
    pub fn segmentations(&self) -> Vec<String> {
        let (mut segmentation, budget) = self.initial();
        search(self, &mut segmentation, budget, SearchMode::All, None, true)
            .solutions()
            .iter()
            .map(|s| s.words.join(" "))
            .collect()
    }

    /// Number of segmentations
    pub fn count(&self) -> u64 {
        let (mut segmentation, budget) = self.initial();
        search(self, &mut segmentation, budget, SearchMode::Count, None, true).count()
    }
}

impl Problem for WordBreak {
    type Workspace = Segmentation;
    type Key = usize;

    fn moves(&self, segmentation: &Segmentation, budget: u32) -> Vec<Take> {
        let start = segmentation.cursor;
        let last = self.text.len().min(start + self.longest_word).min(start + budget as usize);
        (start + 1..=last)
            .map(|end| Take {
                start,
                end,
                word: self.text[start..end].iter().collect(),
            })
            .collect()
    }

    fn feasible(&self, _segmentation: &Segmentation, take: &Take) -> bool {
        self.dictionary.contains(&take.word)
    }

    fn is_goal(&self, segmentation: &Segmentation, _budget: u32) -> bool {
        segmentation.cursor == self.text.len()
    }

    fn consumes(&self, take: &Take) -> u32 {
        (take.end - take.start) as u32
    }

    fn memo_key(&self, segmentation: &Segmentation, _budget: u32) -> Option<usize> {
        Some(segmentation.cursor)
    }
}

impl Puzzle for WordBreak {
    const KIND: PuzzleKind = PuzzleKind::WordBreak;

    fn initial(&self) -> (Segmentation, u32) {
        let segmentation = Segmentation {
            words: Vec::new(),
            cursor: 0,
        };
        (segmentation, self.text.len() as u32)
    }

    fn render(&self, segmentation: &Segmentation) -> String {
        segmentation.words.join(" ")
    }

    /// Longest word first
    fn heuristic(&self) -> Option<Box<CostFn<'_, Self>>> {
        let longest = self.longest_word as u64;
        Some(Box::new(move |_: &Segmentation, take: &Take| {
            longest.saturating_sub((take.end - take.start) as u64)
        }))
    }

    fn shape(&self) -> PuzzleShape {
        PuzzleShape {
            size: self.text.len(),
            max_branching: self.longest_word,
            depth_bound: self.text.len(),
            memoizable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SearchEngine;

    fn puzzle(text: &str, words: &[&str]) -> WordBreak {
        WordBreak::new(text, words.iter().copied()).unwrap()
    }

    #[test]
    fn test_repeated_letters_count() {
        let wb = puzzle("aaaa", &["a", "aa"]);
        assert_eq!(wb.count(), 5);
        assert_eq!(wb.segmentations().len(), 5);
        assert_eq!(wb.segmentations()[0], "a a a a");
    }

    #[test]
    fn test_cats_and_dog() {
        let wb = puzzle("catsanddog", &["cat", "cats", "and", "sand", "dog"]);
        assert_eq!(wb.segmentations(), vec!["cat sand dog", "cats and dog"]);
    }

    #[test]
    fn test_unsegmentable_text() {
        let wb = puzzle("catsandog", &["cats", "dog", "sand", "and", "cat"]);
        assert_eq!(wb.count(), 0);
        assert!(wb.segmentations().is_empty());
    }

    #[test]
    fn test_empty_text_has_one_segmentation() {
        let wb = puzzle("", &["a"]);
        assert_eq!(wb.segmentations(), vec![String::new()]);
    }

    #[test]
    fn test_memoization_skips_repeated_suffixes() {
        let wb = puzzle("aaaaaaaaaaaaaaaaaaaa", &["a", "aa", "aaa"]);
        let (mut segmentation, budget) = wb.initial();
        let plain = SearchEngine::new(&wb)
            .with_mode(SearchMode::Count)
            .search(&mut segmentation, budget);
        let cached = SearchEngine::new(&wb)
            .with_mode(SearchMode::Count)
            .with_memoization(true)
            .search(&mut segmentation, budget);
        assert_eq!(plain.outcome, cached.outcome);
        assert!(cached.statistics.nodes * 100 < plain.statistics.nodes);
    }

    #[test]
    fn test_longest_word_first() {
        let wb = puzzle("catsanddog", &["cat", "cats", "and", "sand", "dog"]);
        let heuristic = wb.heuristic();
        let (mut segmentation, budget) = wb.initial();
        let first = search(&wb, &mut segmentation, budget, SearchMode::First, heuristic.as_deref(), false);
        assert_eq!(first.solutions()[0].words(), ["cats", "and", "dog"]);
    }

    #[test]
    fn test_empty_dictionary_word_rejected() {
        assert!(WordBreak::new("a", ["a", ""]).is_err());
    }
}
