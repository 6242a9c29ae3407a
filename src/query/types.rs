use crate::models::PropertyType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction; the backend defaults to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[default]
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Sort key resolved from the free-form `sortBy` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    Size,
    CreatedAt,
}

impl SortKey {
    pub const DEFAULT_PARAM: &'static str = "createdAt";

    /// Unrecognised or missing keys sort by creation time.
    pub fn resolve(sort_by: Option<&str>) -> Self {
        match sort_by.map(str::trim) {
            Some("name") => SortKey::Name,
            Some("price") | Some("priceFrom") => SortKey::Price,
            Some("size") | Some("sizeFrom") => SortKey::Size,
            _ => SortKey::CreatedAt,
        }
    }
}

/// Query descriptor for property searches
///
/// `price_from`/`price_to` are sent as USD on the authenticated endpoint but
/// compared against AED fields when the search runs over the public snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    pub property_type: Option<PropertyType>,
    pub developer_id: Option<String>,
    pub city_id: Option<String>,
    pub area_id: Option<String>,
    #[serde(default)]
    pub area_ids: Vec<String>,
    /// Comma-separated bedroom counts, e.g. "1,2,3"
    pub bedrooms: Option<String>,
    pub size_from: Option<f64>,
    pub size_to: Option<f64>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PropertyFilters {
    pub fn sort_key(&self) -> SortKey {
        SortKey::resolve(self.sort_by.as_deref())
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order.unwrap_or_default()
    }

    /// All requested area ids, `area_id` first, blanks dropped
    pub fn requested_area_ids(&self) -> Vec<&str> {
        self.area_id
            .iter()
            .chain(self.area_ids.iter())
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// Parsed `bedrooms` list; items that are not integers are skipped
    pub fn requested_bedrooms(&self) -> Vec<u32> {
        self.bedrooms
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|item| item.trim().parse::<u32>().ok())
            .collect()
    }

    /// Query string for `GET /properties`. `sortBy`/`sortOrder` are always
    /// present.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = Vec::new();
        let mut push = |key: &str, value: String| query.push((key.to_string(), value));

        if let Some(kind) = self.property_type {
            push("propertyType", kind.as_str().to_string());
        }
        if let Some(id) = non_blank(&self.developer_id) {
            push("developerId", id.to_string());
        }
        if let Some(id) = non_blank(&self.city_id) {
            push("cityId", id.to_string());
        }
        let areas = self.requested_area_ids();
        if !areas.is_empty() {
            push("areaId", areas.join(","));
        }
        if let Some(bedrooms) = non_blank(&self.bedrooms) {
            push("bedrooms", bedrooms.to_string());
        }
        for (key, value) in [
            ("sizeFrom", self.size_from),
            ("sizeTo", self.size_to),
            ("priceFrom", self.price_from),
            ("priceTo", self.price_to),
        ] {
            if let Some(value) = value {
                push(key, value.to_string());
            }
        }
        if let Some(search) = non_blank(&self.search) {
            push("search", search.to_string());
        }
        push(
            "sortBy",
            non_blank(&self.sort_by)
                .unwrap_or(SortKey::DEFAULT_PARAM)
                .to_string(),
        );
        push("sortOrder", self.sort_order().as_str().to_string());
        if let Some(page) = self.page {
            push("page", page.to_string());
        }
        if let Some(limit) = self.limit {
            push("limit", limit.to_string());
        }

        query
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn empty_filters_still_send_sort_defaults() {
        let query = PropertyFilters::default().to_query();
        assert_eq!(
            query,
            vec![
                ("sortBy".to_string(), "createdAt".to_string()),
                ("sortOrder".to_string(), "DESC".to_string()),
            ]
        );
    }

    #[test]
    fn populated_filters_map_to_query_contract() {
        let filters = PropertyFilters {
            property_type: Some(PropertyType::OffPlan),
            developer_id: Some("emaar".into()),
            city_id: Some("  ".into()),
            area_id: Some("marina".into()),
            area_ids: vec!["jvc".into()],
            bedrooms: Some("2,3".into()),
            price_from: Some(100_000.0),
            price_to: Some(250_000.5),
            search: Some("tower".into()),
            sort_by: Some("price".into()),
            sort_order: Some(SortOrder::Asc),
            limit: Some(12),
            ..Default::default()
        };
        let query = filters.to_query();

        assert_eq!(param(&query, "propertyType"), Some("off-plan"));
        assert_eq!(param(&query, "developerId"), Some("emaar"));
        assert_eq!(param(&query, "cityId"), None);
        assert_eq!(param(&query, "areaId"), Some("marina,jvc"));
        assert_eq!(param(&query, "bedrooms"), Some("2,3"));
        assert_eq!(param(&query, "priceFrom"), Some("100000"));
        assert_eq!(param(&query, "priceTo"), Some("250000.5"));
        assert_eq!(param(&query, "search"), Some("tower"));
        assert_eq!(param(&query, "sortBy"), Some("price"));
        assert_eq!(param(&query, "sortOrder"), Some("ASC"));
        assert_eq!(param(&query, "limit"), Some("12"));
        assert_eq!(param(&query, "page"), None);
    }

    #[test]
    fn sort_keys_resolve_with_createdat_default() {
        assert_eq!(SortKey::resolve(Some("name")), SortKey::Name);
        assert_eq!(SortKey::resolve(Some("priceFrom")), SortKey::Price);
        assert_eq!(SortKey::resolve(Some("sizeFrom")), SortKey::Size);
        assert_eq!(SortKey::resolve(Some("popularity")), SortKey::CreatedAt);
        assert_eq!(SortKey::resolve(None), SortKey::CreatedAt);
    }

    #[test]
    fn bedroom_list_skips_garbage() {
        let filters = PropertyFilters {
            bedrooms: Some("2, x,3,".into()),
            ..Default::default()
        };
        assert_eq!(filters.requested_bedrooms(), vec![2, 3]);
        assert!(PropertyFilters::default().requested_bedrooms().is_empty());
    }
}
