//! Listing builders shared by the unit tests.

use crate::models::{
    lenient, AreaDetail, AreaRef, Developer, OffPlan, Offering, Place, Property, Secondary,
    AED_PER_USD,
};

fn base(id: &str, created_at: &str, offering: Offering) -> Property {
    Property {
        id: id.to_string(),
        name: format!("Listing {id}"),
        description: String::new(),
        country: Some(Place {
            id: "uae".into(),
            name_en: "United Arab Emirates".into(),
            ..Default::default()
        }),
        city: Some(Place {
            id: "dubai".into(),
            name_en: "Dubai".into(),
            name_ru: "Дубай".into(),
            ..Default::default()
        }),
        area: None,
        developer: Some(Developer {
            id: "dev-1".into(),
            name: "Emaar".into(),
            ..Default::default()
        }),
        facilities: vec![],
        photos: vec![],
        latitude: None,
        longitude: None,
        created_at: lenient::parse_timestamp(created_at),
        updated_at: None,
        offering,
    }
}

/// Off-plan project starting at `price_from` USD
pub fn off_plan(id: &str, price_from: f64, created_at: &str) -> Property {
    let mut property = base(
        id,
        created_at,
        Offering::OffPlan(OffPlan {
            price_from: Some(price_from),
            price_from_aed: Some(price_from * AED_PER_USD),
            ..Default::default()
        }),
    );
    property.area = Some(AreaRef::Label("Dubai Marina, Dubai".into()));
    property
}

/// Resale unit at `price` USD in area `area_id`
pub fn secondary(id: &str, price: f64, created_at: &str, area_id: &str) -> Property {
    let mut property = base(
        id,
        created_at,
        Offering::Secondary(Secondary {
            price: Some(price),
            price_aed: Some(price * AED_PER_USD),
            ..Default::default()
        }),
    );
    property.area = Some(AreaRef::Detail(AreaDetail {
        id: area_id.to_string(),
        name_en: area_id.to_uppercase(),
        ..Default::default()
    }));
    property
}
