pub mod lenient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed UAE dirham peg used when a USD amount has to be derived.
pub const AED_PER_USD: f64 = 3.6725;

/// Display language of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

/// Listing kind, the discriminant of [`Offering`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "off-plan")]
    OffPlan,
    #[serde(rename = "secondary")]
    Secondary,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::OffPlan => "off-plan",
            PropertyType::Secondary => "secondary",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off-plan" | "offplan" => Ok(PropertyType::OffPlan),
            "secondary" => Ok(PropertyType::Secondary),
            other => Err(format!("unknown property type: {other}")),
        }
    }
}

/// Country or city with trilingual names
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_en: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_ru: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_ar: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_text"
    )]
    pub country_id: Option<String>,
}

impl Place {
    pub fn name(&self, locale: Locale) -> &str {
        localized(&self.name_en, &self.name_ru, locale)
    }
}

/// Area record as published for secondary listings and in the public
/// reference lists
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AreaDetail {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_en: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_ru: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_ar: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description_en: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description_ru: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description_ar: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub images: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_text"
    )]
    pub city_id: Option<String>,
}

impl AreaDetail {
    pub fn name(&self, locale: Locale) -> &str {
        localized(&self.name_en, &self.name_ru, locale)
    }
}

/// Where a listing sits. Off-plan listings carry a preformatted
/// "AreaName, CityName" label, secondary listings the full area record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AreaRef {
    Label(String),
    Detail(AreaDetail),
}

impl AreaRef {
    pub fn display_name(&self, locale: Locale) -> &str {
        match self {
            AreaRef::Label(label) => label,
            AreaRef::Detail(area) => area.name(locale),
        }
    }

    /// Area id, only known for detailed areas
    pub fn id(&self) -> Option<&str> {
        match self {
            AreaRef::Label(_) => None,
            AreaRef::Detail(area) => Some(&area.id),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description: Option<String>,
}

/// Amenity attached to a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_en: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_ru: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name_ar: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub icon_name: Option<String>,
}

impl Facility {
    pub fn name(&self, locale: Locale) -> &str {
        localized(&self.name_en, &self.name_ru, locale)
    }
}

/// Unit configuration offered in an off-plan project
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub unit_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(default, rename = "priceAED", deserialize_with = "lenient::number")]
    pub price_aed: Option<f64>,
}

/// Attributes of a pre-construction project, sold as a range of units
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OffPlan {
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_from: Option<f64>,
    #[serde(default, rename = "priceFromAED", deserialize_with = "lenient::number")]
    pub price_from_aed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_to: Option<f64>,
    #[serde(default, rename = "priceToAED", deserialize_with = "lenient::number")]
    pub price_to_aed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub size_from: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub size_to: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bedrooms_from: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bedrooms_to: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bathrooms_from: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bathrooms_to: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub units: Vec<Unit>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub payment_plan: Option<serde_json::Value>,
}

/// Attributes of a resale listing, one concrete unit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Secondary {
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(default, rename = "priceAED", deserialize_with = "lenient::number")]
    pub price_aed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bathrooms: Option<f64>,
}

/// The attribute set selected by `propertyType` on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "propertyType")]
pub enum Offering {
    #[serde(rename = "off-plan")]
    OffPlan(OffPlan),
    #[serde(rename = "secondary")]
    Secondary(Secondary),
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default)]
    pub country: Option<Place>,
    #[serde(default)]
    pub city: Option<Place>,
    #[serde(default)]
    pub area: Option<AreaRef>,
    #[serde(default)]
    pub developer: Option<Developer>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub facilities: Vec<Facility>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub offering: Offering,
}

impl Property {
    pub fn property_type(&self) -> PropertyType {
        match self.offering {
            Offering::OffPlan(_) => PropertyType::OffPlan,
            Offering::Secondary(_) => PropertyType::Secondary,
        }
    }

    /// Headline USD price as published: `priceFrom` or `price`
    pub fn listed_price(&self) -> Option<f64> {
        match &self.offering {
            Offering::OffPlan(o) => o.price_from,
            Offering::Secondary(s) => s.price,
        }
    }

    /// Headline size: `sizeFrom` or `size`
    pub fn listed_size(&self) -> Option<f64> {
        match &self.offering {
            Offering::OffPlan(o) => o.size_from,
            Offering::Secondary(s) => s.size,
        }
    }

    /// Lowest AED price of the listing
    pub fn price_aed_floor(&self) -> Option<f64> {
        match &self.offering {
            Offering::OffPlan(o) => o.price_from_aed,
            Offering::Secondary(s) => s.price_aed,
        }
    }

    /// Highest AED price; off-plan projects without an upper bound use the
    /// starting price
    pub fn price_aed_ceiling(&self) -> Option<f64> {
        match &self.offering {
            Offering::OffPlan(o) => o.price_to_aed.or(o.price_from_aed),
            Offering::Secondary(s) => s.price_aed,
        }
    }

    /// USD price, derived from AED through the peg when the backend left it out
    pub fn price_usd(&self) -> Option<f64> {
        self.listed_price()
            .or_else(|| self.price_aed_floor().map(|aed| aed / AED_PER_USD))
    }

    /// AED price, derived from USD through the peg when the backend left it out
    pub fn price_aed(&self) -> Option<f64> {
        self.price_aed_floor()
            .or_else(|| self.listed_price().map(|usd| usd * AED_PER_USD))
    }

    /// Creation time in epoch milliseconds, 0 when unknown
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.map_or(0, |ts| ts.timestamp_millis())
    }

    pub fn area_name(&self, locale: Locale) -> Option<&str> {
        self.area.as_ref().map(|area| area.display_name(locale))
    }

    /// Bedroom summary for listings: "2", "1-3" or "Studio"
    pub fn bedrooms_label(&self) -> String {
        fn count(n: f64) -> String {
            if n == 0.0 {
                "Studio".to_string()
            } else {
                format!("{}", n)
            }
        }

        match &self.offering {
            Offering::OffPlan(o) => match (o.bedrooms_from, o.bedrooms_to) {
                (Some(from), Some(to)) if from != to => format!("{}-{}", count(from), count(to)),
                (Some(n), _) | (None, Some(n)) => count(n),
                (None, None) => "-".to_string(),
            },
            Offering::Secondary(s) => s.bedrooms.map_or_else(|| "-".to_string(), count),
        }
    }
}

/// Bulk snapshot served by the public endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicData {
    #[serde(default, deserialize_with = "lenient::records")]
    pub properties: Vec<Property>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub countries: Vec<Place>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub cities: Vec<Place>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub areas: Vec<AreaDetail>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub developers: Vec<Developer>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub facilities: Vec<Facility>,
}

impl PublicData {
    pub fn find_property(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }
}

fn localized<'a>(en: &'a str, ru: &'a str, locale: Locale) -> &'a str {
    match locale {
        Locale::Ru if !ru.is_empty() => ru,
        _ => en,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn off_plan_listing_parses_with_label_area() {
        let property: Property = serde_json::from_value(json!({
            "id": "op-1",
            "propertyType": "off-plan",
            "name": "Marina Vista",
            "area": "Dubai Marina, Dubai",
            "priceFrom": "350000",
            "priceFromAED": 1285375,
            "priceToAED": null,
            "bedroomsFrom": 1,
            "bedroomsTo": "3",
            "units": null,
            "createdAt": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(property.property_type(), PropertyType::OffPlan);
        assert_eq!(
            property.area,
            Some(AreaRef::Label("Dubai Marina, Dubai".to_string()))
        );
        assert_eq!(property.listed_price(), Some(350_000.0));
        assert_eq!(property.price_aed_ceiling(), Some(1_285_375.0));
        assert_eq!(property.bedrooms_label(), "1-3");
        assert!(property.created_at.is_some());
    }

    #[test]
    fn secondary_listing_parses_with_area_detail() {
        let property: Property = serde_json::from_value(json!({
            "id": 17,
            "propertyType": "secondary",
            "name": "Palm Villa",
            "area": { "id": "palm", "nameEn": "Palm Jumeirah", "nameRu": "Пальма Джумейра", "images": null },
            "developer": { "id": "dev-1", "name": "Nakheel" },
            "priceAED": "2,000,000",
            "bedrooms": 0
        }))
        .unwrap();

        assert_eq!(property.id, "17");
        assert_eq!(property.property_type(), PropertyType::Secondary);
        assert_eq!(property.area.as_ref().and_then(AreaRef::id), Some("palm"));
        assert_eq!(property.area_name(Locale::Ru), Some("Пальма Джумейра"));
        assert_eq!(property.price_aed(), Some(2_000_000.0));
        assert_eq!(property.bedrooms_label(), "Studio");
        assert_eq!(property.created_at_millis(), 0);
    }

    #[test]
    fn usd_is_derived_from_aed_when_missing() {
        let property = Property {
            id: "s".into(),
            name: String::new(),
            description: String::new(),
            country: None,
            city: None,
            area: None,
            developer: None,
            facilities: vec![],
            photos: vec![],
            latitude: None,
            longitude: None,
            created_at: None,
            updated_at: None,
            offering: Offering::Secondary(Secondary {
                price_aed: Some(AED_PER_USD * 100_000.0),
                ..Default::default()
            }),
        };

        let usd = property.price_usd().unwrap();
        assert!((usd - 100_000.0).abs() < 1e-6);
        // the sort key stays the published USD field
        assert_eq!(property.listed_price(), None);
    }

    #[test]
    fn unknown_property_type_is_rejected() {
        let result: Result<Property, _> =
            serde_json::from_value(json!({ "id": "x", "propertyType": "rental" }));
        assert!(result.is_err());
        assert!("rental".parse::<PropertyType>().is_err());
        assert_eq!("Off-Plan".parse::<PropertyType>(), Ok(PropertyType::OffPlan));
    }

    #[test]
    fn russian_names_fall_back_to_english() {
        let place = Place {
            id: "dxb".into(),
            name_en: "Dubai".into(),
            ..Default::default()
        };
        assert_eq!(place.name(Locale::Ru), "Dubai");
    }
}
