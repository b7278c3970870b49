//! Lookup parameters and the options that populate them.

/// Parameters of a single lookup request.
///
/// Built fresh for every call by applying options in order to a
/// zero-valued instance. Empty strings mean "use the API default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupParams {
    /// Catalog identifier to look up
    pub id: i64,
    /// Two-letter store country code, passed through verbatim
    pub country: String,
    /// Media type filter, passed through verbatim
    pub media: String,
}

impl LookupParams {
    /// Folds the given options over a zero-valued parameter set.
    ///
    /// Later options targeting the same field overwrite earlier ones.
    pub fn from_options<'a, I>(options: I) -> Self
    where
        I: IntoIterator<Item = &'a LookupOption>,
    {
        let mut params = Self::default();
        for option in options {
            option.apply(&mut params);
        }
        params
    }
}

/// A single mutation of [`LookupParams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOption {
    /// Sets the store country
    Country(String),
    /// Sets the media type filter
    Media(String),
    /// Sets the catalog identifier
    ///
    /// `lookup` always applies its own id last, so passing this option
    /// to a lookup call has no visible effect.
    Id(i64),
}

impl LookupOption {
    /// Applies this option to the given parameters.
    pub fn apply(&self, params: &mut LookupParams) {
        match self {
            LookupOption::Country(country) => params.country = country.clone(),
            LookupOption::Media(media) => params.media = media.clone(),
            LookupOption::Id(id) => params.id = *id,
        }
    }
}

/// Restricts the lookup to the store of the given country (e.g. `"by"`).
pub fn with_country(country: impl Into<String>) -> LookupOption {
    LookupOption::Country(country.into())
}

/// Restricts the lookup to the given media type (e.g. `"software"`).
pub fn with_media(media: impl Into<String>) -> LookupOption {
    LookupOption::Media(media.into())
}

/// Sets the catalog identifier.
pub fn with_id(id: i64) -> LookupOption {
    LookupOption::Id(id)
}
