use std::collections::{BTreeSet, HashMap};

use rand::Rng;

use crate::model::{GameImage, LeafTreePair};
use crate::rounds::{RoundListener, RoundOutcome};
use crate::shuffle::shuffled;

/// A clickable card in the matching round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchItem {
    Leaf(u32),
    Tree(u32),
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing changed: the round is submitted, the item is already matched or not in the pool.
    Ignored,
    Held(MatchItem),
    Released(MatchItem),
    Matched { leaf_id: u32, tree_id: u32, correct: bool },
}

/// Review classification of a single leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Unanswered,
    Correct,
    Incorrect,
}

/// One line of the post-submission review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewRow {
    pub leaf_id: u32,
    pub chosen_tree_id: Option<u32>,
    pub correct_tree_id: u32,
    pub result: MatchResult,
}

#[derive(Debug, Clone)]
pub struct MatchingEngine {
    pairs: Vec<LeafTreePair>,
    leaves: Vec<GameImage>,
    trees: Vec<GameImage>,
    held: Option<MatchItem>,
    matches: HashMap<u32, u32>,
    submitted: bool,
    completed: bool,
}

impl MatchingEngine {
    /// Builds the pool from the full image list and every pair.
    ///
    /// The pair list, the leaf column and the tree column are shuffled independently so that
    /// card positions reveal nothing about the pairing.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, images: &[GameImage], pairs: &[LeafTreePair]) -> Self {
        let pairs = shuffled(rng, pairs);

        let leaf_ids: BTreeSet<u32> = pairs.iter().map(|pair| pair.leaf_id).collect();
        let tree_ids: BTreeSet<u32> = pairs.iter().map(|pair| pair.tree_id).collect();

        let leaves: Vec<GameImage> = images
            .iter()
            .filter(|image| leaf_ids.contains(&image.id))
            .cloned()
            .collect();
        let trees: Vec<GameImage> = images
            .iter()
            .filter(|image| tree_ids.contains(&image.id))
            .cloned()
            .collect();

        Self {
            leaves: shuffled(rng, &leaves),
            trees: shuffled(rng, &trees),
            pairs,
            held: None,
            matches: HashMap::new(),
            submitted: false,
            completed: false,
        }
    }

    /// Pairs in play, in shuffled order.
    pub fn pairs(&self) -> &[LeafTreePair] {
        &self.pairs
    }

    /// Leaf cards in display order.
    pub fn leaves(&self) -> &[GameImage] {
        &self.leaves
    }

    /// Tree cards in display order.
    pub fn trees(&self) -> &[GameImage] {
        &self.trees
    }

    pub fn held(&self) -> Option<MatchItem> {
        self.held
    }

    /// Tree chosen for `leaf_id`, if any.
    pub fn matched_tree(&self, leaf_id: u32) -> Option<u32> {
        self.matches.get(&leaf_id).copied()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn is_matched(&self, item: MatchItem) -> bool {
        match item {
            MatchItem::Leaf(id) => self.matches.contains_key(&id),
            MatchItem::Tree(id) => self.matches.values().any(|tree| *tree == id),
        }
    }

    fn in_pool(&self, item: MatchItem) -> bool {
        match item {
            MatchItem::Leaf(id) => self.leaves.iter().any(|leaf| leaf.id == id),
            MatchItem::Tree(id) => self.trees.iter().any(|tree| tree.id == id),
        }
    }

    /// Whether `leaf_id -> tree_id` is one of the pairs in play.
    ///
    /// Instant feedback and the review classification both read this, and [`score`](Self::score)
    /// walks the same list, so the three always agree.
    fn is_correct_pair(&self, leaf_id: u32, tree_id: u32) -> bool {
        self.pairs
            .iter()
            .any(|pair| pair.leaf_id == leaf_id && pair.tree_id == tree_id)
    }

    /// Handles a click on `item`.
    pub fn select(&mut self, item: MatchItem, listener: &mut dyn RoundListener) -> SelectOutcome {
        if self.submitted || self.is_matched(item) {
            return SelectOutcome::Ignored;
        }
        if !self.in_pool(item) {
            log::warn!("ignoring click on {item:?} which is not part of this round");
            return SelectOutcome::Ignored;
        }

        let Some(held) = self.held else {
            self.held = Some(item);
            return SelectOutcome::Held(item);
        };

        if held == item {
            self.held = None;
            return SelectOutcome::Released(item);
        }

        let (leaf_id, tree_id) = match (held, item) {
            (MatchItem::Leaf(leaf), MatchItem::Tree(tree))
            | (MatchItem::Tree(tree), MatchItem::Leaf(leaf)) => (leaf, tree),
            // same side: move the hold
            _ => {
                self.held = Some(item);
                return SelectOutcome::Held(item);
            }
        };

        self.matches.insert(leaf_id, tree_id);
        self.held = None;

        let correct = self.is_correct_pair(leaf_id, tree_id);
        if correct {
            listener.on_correct_answer();
        }
        log::debug!("matched leaf {leaf_id} with tree {tree_id} (correct: {correct})");

        SelectOutcome::Matched {
            leaf_id,
            tree_id,
            correct,
        }
    }

    /// True once every leaf in the pool has been matched.
    pub fn can_submit(&self) -> bool {
        !self.submitted
            && !self.pairs.is_empty()
            && self
                .pairs
                .iter()
                .all(|pair| self.matches.contains_key(&pair.leaf_id))
    }

    /// Freezes the board and returns the score. `None` when submission is not yet allowed.
    pub fn submit(&mut self) -> Option<u32> {
        if !self.can_submit() {
            return None;
        }
        self.submitted = true;
        self.held = None;
        Some(self.score())
    }

    /// Number of pairs the player matched correctly.
    pub fn score(&self) -> u32 {
        self.pairs
            .iter()
            .filter(|pair| self.matched_tree(pair.leaf_id) == Some(pair.tree_id))
            .count() as u32
    }

    pub fn result_for(&self, leaf_id: u32) -> MatchResult {
        if !self.submitted {
            return MatchResult::Unanswered;
        }
        match self.matched_tree(leaf_id) {
            None => MatchResult::Unanswered,
            Some(tree_id) if self.is_correct_pair(leaf_id, tree_id) => MatchResult::Correct,
            Some(_) => MatchResult::Incorrect,
        }
    }

    /// Review rows for every pair in play, in pool order.
    pub fn review(&self) -> Vec<ReviewRow> {
        self.pairs
            .iter()
            .map(|pair| ReviewRow {
                leaf_id: pair.leaf_id,
                chosen_tree_id: self.matched_tree(pair.leaf_id),
                correct_tree_id: pair.tree_id,
                result: self.result_for(pair.leaf_id),
            })
            .collect()
    }

    /// Reports the submitted score to the listener. Only allowed once, after submission.
    pub fn complete(&mut self, listener: &mut dyn RoundListener) -> Option<RoundOutcome> {
        if !self.submitted || self.completed {
            return None;
        }
        self.completed = true;
        let outcome = RoundOutcome::new(self.score(), self.pairs.len() as u32);
        listener.on_complete(outcome);
        Some(outcome)
    }

    /// Completes an empty round with `(0, 0)`.
    pub fn skip(&mut self, listener: &mut dyn RoundListener) -> bool {
        if self.completed || !self.pairs.is_empty() {
            return false;
        }
        self.completed = true;
        listener.on_complete(RoundOutcome::SKIPPED);
        true
    }
}
