//! Lookup URL construction.

use super::LookupError;
use super::options::LookupParams;
use reqwest::Url;

/// Default base URL of the iTunes Store web service.
pub(crate) const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

const LOOKUP_PATH: &str = "lookup";

const ID_PARAM: &str = "id";
const MEDIA_PARAM: &str = "media";
const COUNTRY_PARAM: &str = "country";

/// Builds the fully qualified lookup URL for the given parameters.
///
/// Parameters are always emitted in the order `id`, `media`, `country`;
/// empty values are kept as `key=` rather than dropped.
pub(crate) fn build_lookup_url(base_url: &str, params: &LookupParams) -> Result<Url, LookupError> {
    let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), LOOKUP_PATH);

    let id = params.id.to_string();

    Url::parse_with_params(
        &endpoint,
        &[
            (ID_PARAM, id.as_str()),
            (MEDIA_PARAM, params.media.as_str()),
            (COUNTRY_PARAM, params.country.as_str()),
        ],
    )
    .map_err(|e| LookupError::RequestConstruction(format!("{}: {}", endpoint, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(id: i64, country: &str, media: &str) -> LookupParams {
        LookupParams {
            id,
            country: country.to_string(),
            media: media.to_string(),
        }
    }

    #[test]
    fn test_query_keeps_order_and_empty_media() {
        let url = build_lookup_url(DEFAULT_BASE_URL, &params(1068204657, "by", "")).unwrap();

        assert_eq!(url.query(), Some("id=1068204657&media=&country=by"));
        assert_eq!(
            url.as_str(),
            "https://itunes.apple.com/lookup?id=1068204657&media=&country=by"
        );
    }

    #[test]
    fn test_all_empty_optionals_are_emitted() {
        let url = build_lookup_url(DEFAULT_BASE_URL, &params(7, "", "")).unwrap();

        assert_eq!(url.query(), Some("id=7&media=&country="));
    }

    #[test]
    fn test_values_are_form_encoded() {
        let url = build_lookup_url(DEFAULT_BASE_URL, &params(-1, "a b", "x&y")).unwrap();

        assert_eq!(url.query(), Some("id=-1&media=x%26y&country=a+b"));
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let url = build_lookup_url("http://localhost:8080/", &params(1, "", "")).unwrap();

        assert_eq!(url.path(), "/lookup");
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn test_invalid_base_url_is_construction_error() {
        let result = build_lookup_url("not a url", &params(1, "", ""));

        assert!(matches!(result, Err(LookupError::RequestConstruction(_))));
    }
}
