//! Client-side search over the public snapshot.
//!
//! Reproduces what `GET /properties` does on the server: filtering, the
//! sort contract and paging. The sort half also runs over authenticated
//! results, since the server's own ordering is not trusted.

pub mod filter;
pub mod sort;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use filter::filter_properties;
pub use sort::sort_properties;
pub use types::{PropertyFilters, SortKey, SortOrder};

use crate::models::Property;

/// Filter, sort and page `properties` the way the authenticated endpoint
/// would
pub fn search(properties: &[Property], filters: &PropertyFilters) -> Vec<Property> {
    let mut results = filter_properties(properties, filters);
    sort_properties(&mut results, filters.sort_key(), filters.sort_order());
    paginate(results, filters.page, filters.limit)
}

/// Cut one page out of sorted results. `page` is 1-based; without a
/// `limit` everything is returned.
pub fn paginate(results: Vec<Property>, page: Option<u32>, limit: Option<u32>) -> Vec<Property> {
    let Some(limit) = limit.filter(|l| *l > 0) else {
        return results;
    };
    let page = page.unwrap_or(1).max(1);
    let skip = (page as usize - 1).saturating_mul(limit as usize);

    results.into_iter().skip(skip).take(limit as usize).collect()
}
