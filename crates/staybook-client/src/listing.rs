//! Listing wire models shared by the tenant and landlord endpoints.
//!
//! Value objects keep the `{ "value": .. }` envelope the API uses for
//! validated scalars.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::BookedDates;
use crate::category::CategoryName;

/// Nightly price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceVo {
    pub value: u32,
}

/// A validated count (guests, bedrooms, beds, baths).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountVo {
    pub value: u32,
}

/// A validated text value (title, description).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextVo {
    pub value: String,
}

/// Capacity of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingInfo {
    pub guests: CountVo,
    pub bedrooms: CountVo,
    pub beds: CountVo,
    pub baths: CountVo,
}

/// Title and free-text description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub title: TextVo,
    pub description: TextVo,
}

/// A stored picture. `file` is the base64 payload as sent by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub file: String,
    pub file_content_type: String,
    #[serde(default)]
    pub is_cover: bool,
}

/// Landlord summary shown on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordSummary {
    pub firstname: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Listing card as shown in result grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardListing {
    pub price: PriceVo,
    pub location: String,
    pub cover: Picture,
    pub booking_category: CategoryName,
    pub public_id: Uuid,
    /// Client-side flag while an action on this card is pending.
    #[serde(skip)]
    pub loading: bool,
}

/// Full listing as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub description: Description,
    #[serde(default)]
    pub pictures: Vec<Picture>,
    pub infos: ListingInfo,
    pub price: PriceVo,
    pub category: CategoryName,
    pub location: String,
    pub landlord: LandlordSummary,
}

/// Tenant search criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub dates: BookedDates,
    pub infos: ListingInfo,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_listing_deserializes_and_defaults_loading() {
        let card: CardListing = serde_json::from_value(serde_json::json!({
            "price": {"value": 120},
            "location": "FR",
            "cover": {"file": "AAAA", "fileContentType": "image/png", "isCover": true},
            "bookingCategory": "BEACH",
            "publicId": "550e8400-e29b-41d4-a716-446655440000"
        }))
        .unwrap();
        assert_eq!(card.price.value, 120);
        assert_eq!(card.booking_category, CategoryName::Beach);
        assert!(card.cover.is_cover);
        assert!(!card.loading);
    }

    #[test]
    fn loading_flag_is_never_serialized() {
        let info = ListingInfo::default();
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json["guests"]["value"], 0);

        let card = CardListing {
            price: PriceVo { value: 1 },
            location: "FR".into(),
            cover: Picture {
                file: String::new(),
                file_content_type: "image/png".into(),
                is_cover: true,
            },
            booking_category: CategoryName::Lake,
            public_id: Uuid::nil(),
            loading: true,
        };
        let json = serde_json::to_value(&card).unwrap();
        assert!(json.get("loading").is_none());
    }
}
