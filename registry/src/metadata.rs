//! Off-chain metadata document referenced by a record's `metadata_hash`.

use serde::{Deserialize, Serialize};

/// The JSON bundle stored on IPFS when a parcel is registered with documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub property_details: PropertyDetails,
    /// Content addresses of the uploaded documents.
    #[serde(default)]
    pub documents: LandDocuments,
    #[serde(default)]
    pub legal_info: LegalInfo,
    /// ISO-8601 time the bundle was assembled.
    #[serde(default)]
    pub registered_date: String,
    #[serde(default)]
    pub storage_provider: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub property_type: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// CIDs of the individual documents; each one is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandDocuments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<String>,
}

impl LandDocuments {
    /// `(kind, cid)` pairs for the documents that are present.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("deed", self.deed.as_deref()),
            ("survey", self.survey.as_deref()),
            ("photos", self.photos.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, cid)| cid.map(|cid| (kind, cid)))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalInfo {
    #[serde(default)]
    pub parcel_number: String,
    #[serde(default)]
    pub zoning: String,
    #[serde(default)]
    pub restrictions: Vec<String>,
}
