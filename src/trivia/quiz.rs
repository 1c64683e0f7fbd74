use std::collections::HashSet;
use std::fmt;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::db::Question;
use crate::error::{Result, TriviaError};

/// The category type the web client sends when "All" is picked.
const ALL_CATEGORIES_TYPE: &str = "click";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelector {
    All,
    Category(i64),
}

impl CategorySelector {
    /// Interprets the `{id, type}` pair sent with a quiz request.
    ///
    /// Id 0 or the `click` type selects every category; any other id must be
    /// positive.
    pub fn from_wire(id: Option<i64>, kind: Option<&str>) -> Result<Self> {
        if kind == Some(ALL_CATEGORIES_TYPE) {
            return Ok(CategorySelector::All);
        }
        match id {
            Some(0) => Ok(CategorySelector::All),
            Some(id) if id > 0 => Ok(CategorySelector::Category(id)),
            Some(id) => Err(TriviaError::InvalidArgument(format!(
                "quiz category id must not be negative, got {id}"
            ))),
            None => Err(TriviaError::InvalidArgument(
                "quiz category has no id".to_owned(),
            )),
        }
    }

    pub fn admits(&self, question: &Question) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Category(id) => question.category == *id,
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelector::All => f.write_str("all"),
            CategorySelector::Category(id) => write!(f, "{id}"),
        }
    }
}

/// Picks one eligible question uniformly at random, or `None` once the
/// eligible set is empty.
pub fn next_question<'a, R: Rng + ?Sized>(
    questions: &'a [Question],
    selector: CategorySelector,
    seen: &HashSet<i64>,
    rng: &mut R,
) -> Option<&'a Question> {
    questions
        .iter()
        .filter(|q| selector.admits(q) && !seen.contains(&q.id))
        .choose(rng)
}

/// Caller-side quiz loop: tracks seen ids across rounds.
#[derive(Debug)]
pub struct QuizSession {
    selector: CategorySelector,
    seen: HashSet<i64>,
    limit: Option<usize>,
    complete: bool,
}

impl QuizSession {
    pub fn new(selector: CategorySelector) -> Self {
        QuizSession {
            selector,
            seen: HashSet::new(),
            limit: None,
            complete: false,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn next<'a, R: Rng + ?Sized>(
        &mut self,
        questions: &'a [Question],
        rng: &mut R,
    ) -> Option<&'a Question> {
        if self.complete {
            return None;
        }
        if self.limit.is_some_and(|limit| self.seen.len() >= limit) {
            self.complete = true;
            return None;
        }
        match next_question(questions, self.selector, &self.seen, rng) {
            Some(question) => {
                self.seen.insert(question.id);
                Some(question)
            }
            None => {
                self.complete = true;
                None
            }
        }
    }

    pub fn stop(&mut self) {
        self.complete = true;
    }

    pub fn selector(&self) -> CategorySelector {
        self.selector
    }

    pub fn asked(&self) -> usize {
        self.seen.len()
    }

    #[cfg(test)]
    fn is_complete(&self) -> bool {
        self.complete
    }
}
