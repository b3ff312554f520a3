use tracking::{escape_js, escape_url, host_of};

#[test]
fn js_escaping() {
    assert_eq!(escape_js("abc-123"), "abc-123");
    assert_eq!(escape_js("it's"), r"it\'s");
    assert_eq!(escape_js(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    assert_eq!(escape_js("a\r\nb"), r"a\nb");
    assert_eq!(escape_js(r"a\b"), r"a\\b");
}

#[test]
fn url_escaping() {
    assert_eq!(
        escape_url("https://a.ghostmetrics.cloud/js/tracker.php?idsite=1&rec=1"),
        "https://a.ghostmetrics.cloud/js/tracker.php?idsite=1&#038;rec=1"
    );
    assert_eq!(escape_url("https://a.test/x y\"<>"), "https://a.test/xy");
    assert_eq!(escape_url("https://a.test/?q='1'"), "https://a.test/?q=&#039;1&#039;");
    assert_eq!(escape_url("https://a.test/?a=1&#038;b=2"), "https://a.test/?a=1&#038;b=2");
    assert_eq!(escape_url("javascript:alert(1)"), "");
    assert_eq!(escape_url("   "), "");
}

#[test]
fn host_extraction() {
    assert_eq!(host_of("https://a.ghostmetrics.cloud/"), Some("a.ghostmetrics.cloud"));
    assert_eq!(host_of("https://user@a.test:8443/x?y"), Some("a.test"));
    assert_eq!(host_of("a.test/path"), None);
    assert_eq!(host_of("https:///path"), None);
}
