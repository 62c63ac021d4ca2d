use crate::domain::model::PageEnvelope;

/// Slice one 1-based page out of `data`. Pages past the end are empty, not errors.
pub fn paginate<E>(data: Vec<E>, page: u64, page_size: u32) -> PageEnvelope<E> {
    let count = data.len();
    let page_size = page_size as usize;
    let skipped_pages = usize::try_from(page.saturating_sub(1)).unwrap_or(usize::MAX);
    let start = skipped_pages.saturating_mul(page_size);

    let results: Vec<E> = data.into_iter().skip(start).take(page_size).collect();

    PageEnvelope {
        count,
        page,
        results_count: results.len(),
        results,
    }
}
