use crate::models::Property;
use crate::query::types::{SortKey, SortOrder};
use std::cmp::Ordering;

fn compare(key: SortKey, a: &Property, b: &Property) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Price => numeric(a.listed_price()).total_cmp(&numeric(b.listed_price())),
        SortKey::Size => numeric(a.listed_size()).total_cmp(&numeric(b.listed_size())),
        SortKey::CreatedAt => a.created_at_millis().cmp(&b.created_at_millis()),
    }
}

fn numeric(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Stable in-place sort. Ties keep their input order in both directions,
/// so repeated renders of the same page stay consistent.
pub fn sort_properties(properties: &mut [Property], key: SortKey, order: SortOrder) {
    properties.sort_by(|a, b| {
        let ordering = compare(key, a, b);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
