use settings::{
    save_advanced, AdvancedOptions, EmbedMode, FlagName, InMemoryOptionStore, Settings,
};
use tracking::{compose, compose_from_store, plan, Directive, Snippet};

fn regular(flags: &[FlagName]) -> Settings {
    let mut advanced = AdvancedOptions::new("1");
    for flag in flags {
        advanced.set(*flag, true);
    }
    Settings {
        ghost_metrics_url: "https://a.ghostmetrics.cloud/".to_string(),
        selected_site_id: "1".to_string(),
        embed_mode: EmbedMode::Regular,
        advanced,
        ..Settings::default()
    }
}

fn position(snippet: &str, needle: &str) -> usize {
    snippet
        .find(needle)
        .unwrap_or_else(|| panic!("{needle} missing from snippet:\n{snippet}"))
}

#[test]
fn missing_url_or_site_yields_nothing() {
    let mut settings = regular(&FlagName::ALL);
    settings.ghost_metrics_url.clear();
    assert_eq!(compose(&settings), "");

    let mut settings = regular(&FlagName::ALL);
    settings.selected_site_id.clear();
    settings.embed_mode = EmbedMode::TagManager;
    settings.selected_container_id = "5".to_string();
    assert_eq!(compose(&settings), "");
}

#[test]
fn tag_manager_without_container_yields_nothing() {
    let mut settings = regular(&[]);
    settings.embed_mode = EmbedMode::TagManager;
    assert_eq!(plan(&settings), Snippet::Empty);
    assert_eq!(compose(&settings), "");
}

#[test]
fn plain_standard_snippet() {
    let expected = "\
<!-- Ghost Metrics -->
<script>
var _paq = window._paq = window._paq || [];
_paq.push(['trackPageView']);
_paq.push(['enableLinkTracking']);
(function() {
    var u=\"https://a.ghostmetrics.cloud/\";
    _paq.push(['setTrackerUrl', u+'js/tracker.php']);
    _paq.push(['setSiteId', '1']);
    var d=document, g=d.createElement('script'), s=d.getElementsByTagName('script')[0];
    g.async=true; g.src=u+'js/tracker.php'; s.parentNode.insertBefore(g,s);
})();
</script>
<!-- End Ghost Metrics Code -->
";
    let snippet = compose(&regular(&[]));
    assert_eq!(snippet, expected);
    assert!(!snippet.contains("<noscript>"));
}

#[test]
fn tag_manager_snippet_loads_container() {
    let mut settings = regular(&FlagName::ALL);
    settings.embed_mode = EmbedMode::TagManager;
    settings.selected_container_id = "5".to_string();
    let snippet = compose(&settings);
    assert!(snippet.starts_with("<!-- Ghost Metrics Tag Manager -->\n<script>\n"));
    assert!(snippet.contains("g.src='https://a.ghostmetrics.cloud/js/container_5.js';"));
    assert!(snippet.contains("'event': 'mtm.Start'"));
    assert!(!snippet.contains("_paq"));
    assert!(snippet.ends_with("<!-- End Ghost Metrics Tag Manager -->\n"));
}

#[test]
fn subdomain_tracking_precedes_page_view() {
    let combos: [&[FlagName]; 3] = [
        &[FlagName::TrackSubdomains],
        &[FlagName::TrackSubdomains, FlagName::DisableTrackingCookies],
        &FlagName::ALL,
    ];
    for flags in combos {
        let snippet = compose(&regular(flags));
        let cookie = position(&snippet, r#"_paq.push(["setCookieDomain", "*.a.ghostmetrics.cloud"]);"#);
        let domains = position(&snippet, r#"_paq.push(["setDomains", ["*.a.ghostmetrics.cloud"]]);"#);
        let page_view = position(&snippet, "trackPageView");
        assert!(cookie < domains);
        assert!(domains < page_view);
    }
}

#[test]
fn optional_directives_keep_fixed_order() {
    let settings = regular(&FlagName::ALL);
    match plan(&settings) {
        Snippet::Standard {
            directives,
            noscript,
            ..
        } => {
            assert_eq!(
                directives,
                vec![
                    Directive::SetDocumentTitleWithDomain,
                    Directive::SetCookieDomain("a.ghostmetrics.cloud".to_string()),
                    Directive::SetDomains(vec!["a.ghostmetrics.cloud".to_string()]),
                    Directive::DisableCampaignParameters,
                    Directive::SetDoNotTrack(true),
                    Directive::DisableCookies,
                    Directive::TrackPageView,
                    Directive::EnableLinkTracking,
                ]
            );
            assert!(noscript);
        }
        other => panic!("expected standard snippet, got {other:?}"),
    }
}

#[test]
fn alias_and_cross_domain_flags_do_not_change_output() {
    let baseline = compose(&regular(&[]));
    let flagged = compose(&regular(&[FlagName::HideAliasUrls, FlagName::CrossDomainLinking]));
    assert_eq!(baseline, flagged);
}

#[test]
fn noscript_fallback_uses_tracker_pixel() {
    let snippet = compose(&regular(&[FlagName::TrackJsDisabled]));
    assert!(snippet.contains(
        r#"<noscript><p><img referrerpolicy="no-referrer-when-downgrade" src="https://a.ghostmetrics.cloud/js/tracker.php?idsite=1&#038;rec=1" style="border:0;" alt="" /></p></noscript>"#
    ));
    assert!(position(&snippet, "</script>") < position(&snippet, "<noscript>"));
}

#[test]
fn site_id_is_escaped_in_js_literal() {
    let mut settings = regular(&[]);
    settings.selected_site_id = "1');alert('x".to_string();
    let snippet = compose(&settings);
    assert!(snippet.contains(r"_paq.push(['setSiteId', '1\');alert(\'x']);"));
}

#[test]
fn compose_from_store_reads_persisted_options() {
    let store = InMemoryOptionStore::with_values([
        ("ghost_metrics_url", "https://b.ghostmetrics.cloud/"),
        ("selected_site_id", "8"),
    ]);
    save_advanced(
        &store,
        &AdvancedOptions::new("8").with_flag(FlagName::ClientSideDnt, true),
    )
    .expect("flags");
    let snippet = compose_from_store(&store);
    assert!(snippet.contains(r#"_paq.push(["setDoNotTrack", true]);"#));
    assert!(snippet.contains("_paq.push(['setSiteId', '8']);"));
}

#[test]
fn unreadable_flags_fall_back_to_defaults() {
    let store = InMemoryOptionStore::with_values([
        ("ghost_metrics_url", "https://b.ghostmetrics.cloud/"),
        ("selected_site_id", "8"),
        ("advanced_options", "not json"),
    ]);
    let snippet = compose_from_store(&store);
    assert!(snippet.contains("_paq.push(['setSiteId', '8']);"));
    assert!(!snippet.contains("setDoNotTrack"));
    assert!(!snippet.contains("<noscript>"));
}

#[test]
fn unknown_flag_names_are_skipped() {
    let store = InMemoryOptionStore::with_values([
        ("ghost_metrics_url", "https://b.ghostmetrics.cloud/"),
        ("selected_site_id", "8"),
        (
            "advanced_options",
            r#"{"8":{"future_flag":true,"client_side_dnt":true}}"#,
        ),
    ]);
    let snippet = compose_from_store(&store);
    assert!(snippet.contains(r#"_paq.push(["setDoNotTrack", true]);"#));
}

#[test]
fn tag_manager_ignores_flag_document() {
    let store = InMemoryOptionStore::with_values([
        ("ghost_metrics_url", "https://b.ghostmetrics.cloud/"),
        ("selected_site_id", "8"),
        ("embed_mode", "tag_manager"),
        ("selected_container_id", "5"),
        ("advanced_options", r#"{"8":{"future_flag":true}}"#),
    ]);
    let snippet = compose_from_store(&store);
    assert!(snippet.contains("g.src='https://b.ghostmetrics.cloud/js/container_5.js';"));
}
