use crate::error::{Result, TriviaError};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Returns the 1-based `page` of `items`, `page_size` items per page.
///
/// A page past the end is an empty slice, not an error. `page <= 0` and a
/// zero `page_size` are rejected.
pub fn paginate<T>(items: &[T], page: i64, page_size: usize) -> Result<&[T]> {
    if page <= 0 {
        return Err(TriviaError::InvalidArgument(format!(
            "page must be 1 or greater, got {page}"
        )));
    }
    if page_size == 0 {
        return Err(TriviaError::InvalidArgument(
            "page size must be greater than zero".to_owned(),
        ));
    }

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size));
    match start {
        Some(start) if start < items.len() => {
            let end = start.saturating_add(page_size).min(items.len());
            Ok(&items[start..end])
        }
        _ => Ok(&[]),
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
