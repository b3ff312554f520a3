use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static INSTANCE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://[a-zA-Z0-9.-]+\.ghostmetrics\.cloud$").expect("instance url pattern")
});
static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script>|<style[^>]*?>.*?</style>")
        .expect("script/style pattern")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("whitespace pattern"));
static OCTET: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("octet pattern"));

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL cannot be empty.")]
    EmptyUrl,
    #[error("Invalid URL. Only subdomains of ghostmetrics.cloud are allowed.")]
    InvalidUrl(String),
    #[error("Failed to authenticate with the provided token.")]
    TokenRejected(String),
}

pub fn validate_url(input: &str) -> Result<String, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    let trimmed = input.trim_end_matches('/');
    if !INSTANCE_URL.is_match(trimmed) {
        return Err(ValidationError::InvalidUrl(input.to_string()));
    }
    Ok(format!("{trimmed}/"))
}

pub fn sanitize_text_field(input: &str) -> String {
    let mut text = input.to_string();
    if text.contains('<') {
        text = SCRIPT_OR_STYLE.replace_all(&text, "").into_owned();
        text = TAG.replace_all(&text, "").into_owned();
    }
    text.retain(|ch| !ch.is_control() || matches!(ch, '\r' | '\n' | '\t'));
    text = WHITESPACE.replace_all(&text, " ").into_owned();
    // removing one octet can expose another, e.g. "%%4141"
    while OCTET.is_match(&text) {
        text = OCTET.replace_all(&text, "").into_owned();
    }
    text.trim().to_string()
}

pub fn coerce_flag(input: &str) -> bool {
    let value = input.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
