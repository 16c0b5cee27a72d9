//! Typed client for the landlord listing endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/landlord-listing/create` | Create a listing (multipart) |
//! | GET    | `/landlord-listing/get-all` | Landlord's own listing cards |
//! | DELETE | `/landlord-listing/delete` | Delete a listing |
//!
//! ## Create payload
//!
//! The create call is `multipart/form-data`: one file part per picture named
//! `picture-{index}`, followed by a `dto` text part holding the listing as
//! JSON with an empty `pictures` array.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::CategoryName;
use crate::error::ApiError;
use crate::listing::{CardListing, Description, ListingInfo, PriceVo};
use crate::transport::{call, ApiRequest, FormPart, Transport};

/// A picture chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A listing to create.
///
/// `pictures` travel as file parts, not inside the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub category: CategoryName,
    pub location: String,
    pub infos: ListingInfo,
    pub description: Description,
    pub price: PriceVo,
    #[serde(skip)]
    pub pictures: Vec<PictureUpload>,
}

/// Acknowledgement of a created listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedListing {
    pub public_id: Uuid,
}

impl NewListing {
    /// Multipart parts for the create call.
    pub fn to_form_parts(&self) -> Result<Vec<FormPart>, ApiError> {
        let mut dto = serde_json::to_value(self).map_err(|source| ApiError::Encoding {
            endpoint: "POST /landlord-listing/create".into(),
            source,
        })?;
        if let Some(obj) = dto.as_object_mut() {
            obj.insert("pictures".into(), serde_json::Value::Array(Vec::new()));
        }

        let mut parts: Vec<FormPart> = self
            .pictures
            .iter()
            .enumerate()
            .map(|(i, picture)| FormPart::File {
                name: format!("picture-{i}"),
                file_name: picture.file_name.clone(),
                content_type: picture.content_type.clone(),
                bytes: picture.bytes.clone(),
            })
            .collect();
        parts.push(FormPart::Text {
            name: "dto".into(),
            value: dto.to_string(),
        });
        Ok(parts)
    }
}

/// Client for the landlord listing endpoints.
#[derive(Clone)]
pub struct LandlordListingClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for LandlordListingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandlordListingClient").finish_non_exhaustive()
    }
}

impl LandlordListingClient {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a listing with its pictures.
    ///
    /// Calls `POST {api}/landlord-listing/create`.
    pub async fn create(&self, listing: &NewListing) -> Result<CreatedListing, ApiError> {
        let request = ApiRequest::post("/landlord-listing/create").multipart(listing.to_form_parts()?);
        call(self.transport.as_ref(), request).await
    }

    /// The current landlord's listing cards.
    ///
    /// Calls `GET {api}/landlord-listing/get-all`.
    pub async fn get_all(&self) -> Result<Vec<CardListing>, ApiError> {
        call(
            self.transport.as_ref(),
            ApiRequest::get("/landlord-listing/get-all"),
        )
        .await
    }

    /// Delete a listing. Resolves to the deleted listing's public id.
    ///
    /// Calls `DELETE {api}/landlord-listing/delete?publicId=..`.
    pub async fn delete(&self, public_id: Uuid) -> Result<Uuid, ApiError> {
        let request = ApiRequest::delete("/landlord-listing/delete").param("publicId", public_id);
        call(self.transport.as_ref(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::TextVo;

    fn listing(pictures: usize) -> NewListing {
        NewListing {
            category: CategoryName::Castle,
            location: "FR".into(),
            infos: ListingInfo::default(),
            description: Description {
                title: TextVo {
                    value: "Keep".into(),
                },
                description: TextVo {
                    value: "Old stones".into(),
                },
            },
            price: PriceVo { value: 300 },
            pictures: (0..pictures)
                .map(|i| PictureUpload {
                    file_name: format!("p{i}.png"),
                    content_type: "image/png".into(),
                    bytes: vec![i as u8],
                })
                .collect(),
        }
    }

    #[test]
    fn form_parts_index_pictures_then_dto() {
        let parts = listing(2).to_form_parts().unwrap();
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], FormPart::File { name, .. } if name == "picture-0"));
        assert!(matches!(&parts[1], FormPart::File { name, .. } if name == "picture-1"));
        let FormPart::Text { name, value } = &parts[2] else {
            panic!("dto part must be text");
        };
        assert_eq!(name, "dto");
        let dto: serde_json::Value = serde_json::from_str(value).unwrap();
        assert_eq!(dto["pictures"], serde_json::json!([]));
        assert_eq!(dto["category"], "CASTLE");
        assert_eq!(dto["description"]["title"]["value"], "Keep");
    }

    #[test]
    fn no_pictures_still_sends_dto() {
        let parts = listing(0).to_form_parts().unwrap();
        assert_eq!(parts.len(), 1);
    }
}
