use crate::db::Question;
use crate::error::{Result, TriviaError};

/// Questions matched by a search or filter, in store order.
#[derive(Debug)]
pub struct Matches<'a> {
    pub questions: Vec<&'a Question>,
    pub total: usize,
}

impl<'a> Matches<'a> {
    fn gather(questions: impl Iterator<Item = &'a Question>) -> Self {
        let questions: Vec<&Question> = questions.collect();
        let total = questions.len();
        Matches { questions, total }
    }

    #[cfg(test)]
    fn ids(&self) -> Vec<i64> {
        self.questions.iter().map(|q| q.id).collect()
    }

    pub fn to_owned_questions(&self) -> Vec<Question> {
        self.questions.iter().map(|&q| q.clone()).collect()
    }
}

/// Case-insensitive substring search over the question text.
///
/// A missing or blank term is `NotFound`; a term that matches nothing is an
/// empty `Ok`.
pub fn search_by_substring<'a>(questions: &'a [Question], term: Option<&str>) -> Result<Matches<'a>> {
    let term = match term {
        Some(term) if !term.trim().is_empty() => term.to_lowercase(),
        _ => return Err(TriviaError::NotFound("search term is empty".to_owned())),
    };
    Ok(Matches::gather(
        questions
            .iter()
            .filter(|q| q.question.to_lowercase().contains(&term)),
    ))
}

pub fn filter_by_category(questions: &[Question], category_id: i64) -> Matches<'_> {
    Matches::gather(questions.iter().filter(|q| q.category == category_id))
}
