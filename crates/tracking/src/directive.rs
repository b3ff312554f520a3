use crate::escape::escape_js;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    SetDocumentTitleWithDomain,
    SetCookieDomain(String),
    SetDomains(Vec<String>),
    DisableCampaignParameters,
    SetDoNotTrack(bool),
    DisableCookies,
    TrackPageView,
    EnableLinkTracking,
}

impl Directive {
    pub fn name(&self) -> &'static str {
        match self {
            Directive::SetDocumentTitleWithDomain => "setDocumentTitle",
            Directive::SetCookieDomain(_) => "setCookieDomain",
            Directive::SetDomains(_) => "setDomains",
            Directive::DisableCampaignParameters => "disableCampaignParameters",
            Directive::SetDoNotTrack(_) => "setDoNotTrack",
            Directive::DisableCookies => "disableCookies",
            Directive::TrackPageView => "trackPageView",
            Directive::EnableLinkTracking => "enableLinkTracking",
        }
    }

    pub fn render(&self) -> String {
        match self {
            Directive::SetDocumentTitleWithDomain => format!(
                r#"_paq.push(["{}", document.domain + "/" + document.title]);"#,
                self.name()
            ),
            Directive::SetCookieDomain(host) => {
                format!(r#"_paq.push(["{}", "*.{}"]);"#, self.name(), escape_js(host))
            }
            Directive::SetDomains(hosts) => {
                let hosts: Vec<String> = hosts
                    .iter()
                    .map(|host| format!(r#""*.{}""#, escape_js(host)))
                    .collect();
                format!(r#"_paq.push(["{}", [{}]]);"#, self.name(), hosts.join(", "))
            }
            Directive::SetDoNotTrack(enabled) => {
                format!(r#"_paq.push(["{}", {enabled}]);"#, self.name())
            }
            Directive::DisableCampaignParameters | Directive::DisableCookies => {
                format!(r#"_paq.push(["{}"]);"#, self.name())
            }
            Directive::TrackPageView | Directive::EnableLinkTracking => {
                format!("_paq.push(['{}']);", self.name())
            }
        }
    }
}
