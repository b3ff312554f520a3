use reqwest::Url;

use crate::ApiError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ApiMethod {
    SitesWithAdminAccess,
    Containers { site_id: String },
}

impl ApiMethod {
    pub fn name(&self) -> &'static str {
        match self {
            ApiMethod::SitesWithAdminAccess => "SitesManager.getSitesWithAdminAccess",
            ApiMethod::Containers { .. } => "TagManager.getContainers",
        }
    }
}

// `<base>/index.php?module=API&method=...&format=json[&idSite=..]&token_auth=..`
pub fn api_url(base_url: &str, method: &ApiMethod, token: &str) -> Result<Url, ApiError> {
    let base = format!("{}/index.php", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&base).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("module", "API")
            .append_pair("method", method.name())
            .append_pair("format", "json");
        if let ApiMethod::Containers { site_id } = method {
            query.append_pair("idSite", site_id);
        }
        query.append_pair("token_auth", token);
    }
    Ok(url)
}
