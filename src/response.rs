//! iTunes lookup response types
//!
//! These structures mirror the JSON returned by the lookup endpoint field
//! for field. Unknown fields are ignored, and missing or `null` fields fall
//! back to their zero value, so older and newer payloads both decode.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can occur while decoding or encoding a lookup response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The payload is not valid JSON or does not match the response shape
    #[error("Failed to decode lookup response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response could not be serialized
    #[error("Failed to encode lookup response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors returned by [`LookupResponse::single_result`].
#[derive(Debug, Error)]
pub enum ResultError {
    /// The response contains no results at all
    #[error("No results")]
    NoResults,

    /// The response contains more than one result for an exact id
    ///
    /// The first result is kept so callers may still use it.
    #[error("Imprecise results: expected 1, got {count}")]
    ImpreciseResults {
        count: usize,
        first: Box<LookupResult>,
    },
}

/// The response of the iTunes lookup endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookupResponse {
    /// Number of results as reported by the server
    ///
    /// Not cross-checked against `results.len()`.
    #[serde(deserialize_with = "null_as_default")]
    pub result_count: i64,
    /// All returned results in server order
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<LookupResult>,
}

impl LookupResponse {
    /// Decodes a lookup response from raw JSON bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use itunes_lookup::LookupResponse;
    ///
    /// let response = LookupResponse::decode(br#"{"resultCount":0,"results":[]}"#).unwrap();
    /// assert_eq!(response.result_count, 0);
    /// ```
    pub fn decode(data: &[u8]) -> Result<Self, ResponseError> {
        serde_json::from_slice(data).map_err(ResponseError::Decode)
    }

    /// Encodes the response back into JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>, ResponseError> {
        serde_json::to_vec(self).map_err(ResponseError::Encode)
    }

    /// Returns the only result of the response.
    ///
    /// A lookup by exact id is expected to yield exactly one result. Zero
    /// results fail with [`ResultError::NoResults`], more than one with
    /// [`ResultError::ImpreciseResults`] carrying the first result.
    pub fn single_result(&self) -> Result<&LookupResult, ResultError> {
        match self.results.as_slice() {
            [] => Err(ResultError::NoResults),
            [only] => Ok(only),
            [first, ..] => Err(ResultError::ImpreciseResults {
                count: self.results.len(),
                first: Box::new(first.clone()),
            }),
        }
    }
}

/// A single catalog entry returned by a lookup.
///
/// JSON `null` is accepted for every field and decodes to the zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookupResult {
    /// iPhone screenshot URLs
    #[serde(deserialize_with = "null_as_default")]
    pub screenshot_urls: Vec<String>,
    /// iPad screenshot URLs
    #[serde(deserialize_with = "null_as_default")]
    pub ipad_screenshot_urls: Vec<String>,
    /// Apple TV screenshots; element type is not fixed upstream, so kept as raw JSON
    #[serde(deserialize_with = "null_as_default")]
    pub appletv_screenshot_urls: Vec<serde_json::Value>,
    /// 60x60 artwork URL
    #[serde(deserialize_with = "null_as_default")]
    pub artwork_url60: String,
    /// 512x512 artwork URL
    #[serde(deserialize_with = "null_as_default")]
    pub artwork_url512: String,
    /// 100x100 artwork URL
    #[serde(deserialize_with = "null_as_default")]
    pub artwork_url100: String,
    /// Store page of the artist or developer
    #[serde(deserialize_with = "null_as_default")]
    pub artist_view_url: String,
    /// Device identifiers the entry runs on
    #[serde(deserialize_with = "null_as_default")]
    pub supported_devices: Vec<String>,
    /// Content advisories
    #[serde(deserialize_with = "null_as_default")]
    pub advisories: Vec<String>,
    /// Whether Game Center is supported
    #[serde(deserialize_with = "null_as_default")]
    pub is_game_center_enabled: bool,
    /// Entry kind (e.g. `software`)
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    /// Feature flags (e.g. `iosUniversal`)
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    /// Censored variant of the track name
    #[serde(deserialize_with = "null_as_default")]
    pub track_censored_name: String,
    /// Supported languages as ISO 639-1 codes
    #[serde(rename = "languageCodesISO2A", deserialize_with = "null_as_default")]
    pub language_codes_iso2a: Vec<String>,
    /// Size of the download, reported by the API as a decimal string
    #[serde(deserialize_with = "null_as_default")]
    pub file_size_bytes: String,
    /// Seller homepage
    #[serde(deserialize_with = "null_as_default")]
    pub seller_url: String,
    /// Age rating (e.g. `4+`)
    #[serde(deserialize_with = "null_as_default")]
    pub content_advisory_rating: String,
    /// Average rating of the current version
    #[serde(deserialize_with = "null_as_default")]
    pub average_user_rating_for_current_version: f64,
    /// Number of ratings for the current version
    #[serde(deserialize_with = "null_as_default")]
    pub user_rating_count_for_current_version: i64,
    /// Average rating across all versions
    #[serde(deserialize_with = "null_as_default")]
    pub average_user_rating: f64,
    /// Store page of the entry
    #[serde(deserialize_with = "null_as_default")]
    pub track_view_url: String,
    /// Content rating of the track
    #[serde(deserialize_with = "null_as_default")]
    pub track_content_rating: String,
    /// Catalog identifier
    #[serde(deserialize_with = "null_as_default")]
    pub track_id: i64,
    /// Display name
    #[serde(deserialize_with = "null_as_default")]
    pub track_name: String,
    /// First release date (RFC 3339)
    #[serde(deserialize_with = "null_as_default")]
    pub release_date: String,
    /// Genre identifiers
    #[serde(deserialize_with = "null_as_default")]
    pub genre_ids: Vec<String>,
    /// Localized price (e.g. `Free`)
    #[serde(deserialize_with = "null_as_default")]
    pub formatted_price: String,
    /// Name of the primary genre
    #[serde(deserialize_with = "null_as_default")]
    pub primary_genre_name: String,
    /// Whether VPP device-based licensing is available
    #[serde(deserialize_with = "null_as_default")]
    pub is_vpp_device_based_licensing_enabled: bool,
    /// Minimum supported OS version
    #[serde(deserialize_with = "null_as_default")]
    pub minimum_os_version: String,
    /// Seller name
    #[serde(deserialize_with = "null_as_default")]
    pub seller_name: String,
    /// Release date of the current version (RFC 3339)
    #[serde(deserialize_with = "null_as_default")]
    pub current_version_release_date: String,
    /// Release notes of the current version
    #[serde(deserialize_with = "null_as_default")]
    pub release_notes: String,
    /// Identifier of the primary genre
    #[serde(deserialize_with = "null_as_default")]
    pub primary_genre_id: i64,
    /// Current version string
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Wrapper type (e.g. `software`)
    #[serde(deserialize_with = "null_as_default")]
    pub wrapper_type: String,
    /// ISO 4217 currency of `price`
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// Store description
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Artist or developer identifier
    #[serde(deserialize_with = "null_as_default")]
    pub artist_id: i64,
    /// Artist or developer name
    #[serde(deserialize_with = "null_as_default")]
    pub artist_name: String,
    /// Genre names
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    /// Price in `currency`
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    /// Bundle identifier
    #[serde(deserialize_with = "null_as_default")]
    pub bundle_id: String,
    /// Number of ratings across all versions
    #[serde(deserialize_with = "null_as_default")]
    pub user_rating_count: i64,
}

/// Decodes `null` as the zero value of `T`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
