//! Pagination, search and quiz selection over questions loaded from the store.
//!
//! Everything here is synchronous and free of side effects.

pub mod pagination;
pub mod quiz;
pub mod search;

pub use pagination::{page_count, paginate, DEFAULT_PAGE_SIZE};
pub use quiz::{next_question, CategorySelector, QuizSession};
pub use search::{filter_by_category, search_by_substring, Matches};
