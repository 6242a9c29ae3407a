use crate::models::{AreaRef, Offering, Property, PropertyType};
use crate::query::types::PropertyFilters;
use tracing::debug;

/// Filters resolved once per search
struct Criteria {
    property_type: Option<PropertyType>,
    developer_id: Option<String>,
    city_id: Option<String>,
    area_ids: Vec<String>,
    bedrooms: Vec<f64>,
    size_from: Option<f64>,
    size_to: Option<f64>,
    price_from: Option<f64>,
    price_to: Option<f64>,
    search: Option<String>,
}

type Predicate = fn(&Criteria, &Property) -> bool;

/// Narrowing stages in the order they run. Each one is independent, the
/// order only shows up in the debug log.
const STAGES: &[(&str, Predicate)] = &[
    ("propertyType", Criteria::property_type_matches),
    ("developerId", Criteria::developer_matches),
    ("cityId", Criteria::city_matches),
    ("areaId", Criteria::area_matches),
    ("bedrooms", Criteria::bedrooms_match),
    ("size", Criteria::size_matches),
    ("price", Criteria::price_matches),
    ("search", Criteria::search_matches),
];

impl Criteria {
    fn new(filters: &PropertyFilters) -> Self {
        fn blank_to_none(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            property_type: filters.property_type,
            developer_id: blank_to_none(&filters.developer_id),
            city_id: blank_to_none(&filters.city_id),
            area_ids: filters
                .requested_area_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
            bedrooms: filters
                .requested_bedrooms()
                .into_iter()
                .map(f64::from)
                .collect(),
            size_from: filters.size_from,
            size_to: filters.size_to,
            price_from: filters.price_from,
            price_to: filters.price_to,
            search: blank_to_none(&filters.search).map(|s| s.to_lowercase()),
        }
    }

    fn property_type_matches(&self, property: &Property) -> bool {
        self.property_type
            .map_or(true, |kind| property.property_type() == kind)
    }

    fn developer_matches(&self, property: &Property) -> bool {
        self.developer_id.as_deref().map_or(true, |id| {
            property.developer.as_ref().is_some_and(|dev| dev.id == id)
        })
    }

    fn city_matches(&self, property: &Property) -> bool {
        self.city_id
            .as_deref()
            .map_or(true, |id| property.city.as_ref().is_some_and(|city| city.id == id))
    }

    /// Only detailed areas carry an id, so labelled (off-plan) areas never
    /// survive an area filter.
    fn area_matches(&self, property: &Property) -> bool {
        if self.area_ids.is_empty() {
            return true;
        }
        match &property.area {
            Some(AreaRef::Detail(area)) => self.area_ids.iter().any(|id| *id == area.id),
            Some(AreaRef::Label(_)) | None => false,
        }
    }

    fn bedrooms_match(&self, property: &Property) -> bool {
        if self.bedrooms.is_empty() {
            return true;
        }
        match &property.offering {
            Offering::OffPlan(o) => {
                let from = o.bedrooms_from.unwrap_or(0.0);
                let to = o.bedrooms_to.or(o.bedrooms_from).unwrap_or(0.0);
                self.bedrooms.iter().any(|b| *b >= from && *b <= to)
            }
            Offering::Secondary(s) => s
                .bedrooms
                .is_some_and(|count| self.bedrooms.contains(&count)),
        }
    }

    fn size_matches(&self, property: &Property) -> bool {
        let size = property.listed_size().unwrap_or(0.0);
        self.size_from.map_or(true, |min| size >= min)
            && self.size_to.map_or(true, |max| size <= max)
    }

    /// Bounds are compared against AED prices.
    fn price_matches(&self, property: &Property) -> bool {
        let floor = property.price_aed_floor().unwrap_or(0.0);
        let ceiling = property.price_aed_ceiling().unwrap_or(0.0);
        self.price_from.map_or(true, |min| floor >= min)
            && self.price_to.map_or(true, |max| ceiling <= max)
    }

    fn search_matches(&self, property: &Property) -> bool {
        self.search.as_deref().map_or(true, |needle| {
            property.name.to_lowercase().contains(needle)
                || property.description.to_lowercase().contains(needle)
        })
    }
}

/// Apply every filter in `filters` to `properties`, keeping input order
pub fn filter_properties(properties: &[Property], filters: &PropertyFilters) -> Vec<Property> {
    let criteria = Criteria::new(filters);
    let mut working: Vec<&Property> = properties.iter().collect();

    for (stage, predicate) in STAGES {
        let before = working.len();
        working.retain(|property| predicate(&criteria, property));
        if working.len() != before {
            debug!(stage, before, remaining = working.len(), "fallback filter narrowed results");
        }
    }

    working.into_iter().cloned().collect()
}
