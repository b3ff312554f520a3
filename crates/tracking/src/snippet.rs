use settings::{EmbedMode, FlagName, Settings};
use tracing::debug;

use crate::directive::Directive;
use crate::escape::{escape_js, escape_url, host_of, trailing_slash};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Snippet {
    Empty,
    TagManager {
        base_url: String,
        container_id: String,
    },
    Standard {
        base_url: String,
        site_id: String,
        directives: Vec<Directive>,
        noscript: bool,
    },
}

pub fn plan(settings: &Settings) -> Snippet {
    let base_url = settings.ghost_metrics_url.as_str();
    let site_id = settings.selected_site_id.as_str();
    if base_url.is_empty() || site_id.is_empty() {
        return Snippet::Empty;
    }

    match settings.embed_mode {
        EmbedMode::TagManager if !settings.selected_container_id.is_empty() => Snippet::TagManager {
            base_url: base_url.to_string(),
            container_id: settings.selected_container_id.clone(),
        },
        EmbedMode::TagManager => {
            debug!("tag manager mode without a container, no snippet");
            Snippet::Empty
        }
        EmbedMode::Regular => Snippet::Standard {
            base_url: base_url.to_string(),
            site_id: site_id.to_string(),
            directives: standard_directives(settings),
            noscript: settings.advanced.is_enabled(FlagName::TrackJsDisabled),
        },
    }
}

fn standard_directives(settings: &Settings) -> Vec<Directive> {
    let flags = &settings.advanced;
    let mut directives = Vec::new();

    if flags.is_enabled(FlagName::PrependDomainToTitle) {
        directives.push(Directive::SetDocumentTitleWithDomain);
    }
    if flags.is_enabled(FlagName::TrackSubdomains) {
        match host_of(&settings.ghost_metrics_url) {
            Some(host) => {
                directives.push(Directive::SetCookieDomain(host.to_string()));
                directives.push(Directive::SetDomains(vec![host.to_string()]));
            }
            None => debug!(url = %settings.ghost_metrics_url, "no host in instance url"),
        }
    }
    if flags.is_enabled(FlagName::DisableCampaignParameters) {
        directives.push(Directive::DisableCampaignParameters);
    }
    if flags.is_enabled(FlagName::ClientSideDnt) {
        directives.push(Directive::SetDoNotTrack(true));
    }
    if flags.is_enabled(FlagName::DisableTrackingCookies) {
        directives.push(Directive::DisableCookies);
    }

    directives.push(Directive::TrackPageView);
    directives.push(Directive::EnableLinkTracking);
    directives
}

impl Snippet {
    pub fn is_empty(&self) -> bool {
        matches!(self, Snippet::Empty)
    }

    pub fn render(&self) -> String {
        match self {
            Snippet::Empty => String::new(),
            Snippet::TagManager {
                base_url,
                container_id,
            } => render_tag_manager(base_url, container_id),
            Snippet::Standard {
                base_url,
                site_id,
                directives,
                noscript,
            } => render_standard(base_url, site_id, directives, *noscript),
        }
    }
}

fn render_tag_manager(base_url: &str, container_id: &str) -> String {
    let src = escape_url(&format!(
        "{}js/container_{}.js",
        trailing_slash(base_url),
        escape_js(container_id)
    ));
    let lines = [
        "<!-- Ghost Metrics Tag Manager -->".to_string(),
        "<script>".to_string(),
        "var _mtm = window._mtm = window._mtm || [];".to_string(),
        "_mtm.push({'mtm.startTime': (new Date().getTime()), 'event': 'mtm.Start'});".to_string(),
        "(function() {".to_string(),
        "    var d=document, g=d.createElement('script'), s=d.getElementsByTagName('script')[0];"
            .to_string(),
        format!("    g.async=true; g.src='{src}';"),
        "    s.parentNode.insertBefore(g,s);".to_string(),
        "})();".to_string(),
        "</script>".to_string(),
        "<!-- End Ghost Metrics Tag Manager -->".to_string(),
        String::new(),
    ];
    lines.join("\n")
}

fn render_standard(base_url: &str, site_id: &str, directives: &[Directive], noscript: bool) -> String {
    let base = trailing_slash(base_url);
    let mut lines = vec![
        "<!-- Ghost Metrics -->".to_string(),
        "<script>".to_string(),
        "var _paq = window._paq = window._paq || [];".to_string(),
    ];
    lines.extend(directives.iter().map(Directive::render));
    lines.extend([
        "(function() {".to_string(),
        format!("    var u=\"{}\";", escape_url(&base)),
        "    _paq.push(['setTrackerUrl', u+'js/tracker.php']);".to_string(),
        format!("    _paq.push(['setSiteId', '{}']);", escape_js(site_id)),
        "    var d=document, g=d.createElement('script'), s=d.getElementsByTagName('script')[0];"
            .to_string(),
        "    g.async=true; g.src=u+'js/tracker.php'; s.parentNode.insertBefore(g,s);".to_string(),
        "})();".to_string(),
        "</script>".to_string(),
    ]);
    if noscript {
        let pixel = escape_url(&format!(
            "{base}js/tracker.php?idsite={}&rec=1",
            escape_js(site_id)
        ));
        lines.push(format!(
            r#"<noscript><p><img referrerpolicy="no-referrer-when-downgrade" src="{pixel}" style="border:0;" alt="" /></p></noscript>"#
        ));
    }
    lines.push("<!-- End Ghost Metrics Code -->".to_string());
    lines.push(String::new());
    lines.join("\n")
}
