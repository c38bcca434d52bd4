//! Description of one logical place search.

/// An immutable search scope: keyword, geography, and pagination parameters.
///
/// The geography fields are dialect-specific: `city` and `center`/`radius_m`
/// belong to the Amap dialect (keyword search vs. around-search), `region` to
/// the Tencent `boundary` filter. Page size and radius are requested values;
/// the client clamps them to the dialect maxima when building the request.
#[derive(Debug, Clone)]
pub struct SearchScope {
    pub keyword: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub categories: Option<String>,
    /// Center coordinate as `"lon,lat"`; switches the Amap dialect to the
    /// around-search endpoint.
    pub center: Option<String>,
    pub radius_m: Option<u32>,
    /// 1-based page index.
    pub page: u32,
    pub page_size: u32,
}

impl SearchScope {
    /// Creates a scope for `keyword` starting at page 1.
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        SearchScope {
            keyword: keyword.to_owned(),
            city: None,
            region: None,
            categories: None,
            center: None,
            radius_m: None,
            page: 1,
            page_size: 20,
        }
    }

    #[must_use]
    pub fn with_city(mut self, city: &str) -> Self {
        self.city = Some(city.to_owned());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_owned());
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: &str) -> Self {
        self.categories = Some(categories.to_owned());
        self
    }

    /// Switches to an around-search centered on `"lon,lat"` with the given
    /// radius in meters.
    #[must_use]
    pub fn with_center(mut self, center: &str, radius_m: u32) -> Self {
        self.center = Some(center.to_owned());
        self.radius_m = Some(radius_m);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}
