//! The JSON returned by `https://www.mdpi.com/search/ajax`

use serde::{Deserialize, Serialize};

/// Search endpoint response; only `results` is read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MdpiSearchResponse {
    #[serde(default)]
    pub results: Vec<MdpiSearchHit>,
}

/// One search result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdpiSearchHit {
    #[serde(default)]
    pub title: Option<String>,
    /// Article path such as "/1999-4923/17/9/1166"
    #[serde(default)]
    pub url: Option<String>,
}

impl MdpiSearchResponse {
    /// Parse the response body.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

impl MdpiSearchHit {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn url_path(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// Article identifier derived from the URL path.
    pub fn article_id(&self) -> &str {
        article_id_from_path(self.url_path())
    }
}

/// Last segment of an article path once surrounding slashes are stripped.
///
/// ```
/// use litharvest_parser::mdpi::article_id_from_path;
///
/// assert_eq!(article_id_from_path("/1999-4923/17/9/1166"), "1166");
/// assert_eq!(article_id_from_path("/1999-4923/17/9/1166/"), "1166");
/// assert_eq!(article_id_from_path(""), "");
/// ```
pub fn article_id_from_path(url_path: &str) -> &str {
    url_path
        .trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
