pub fn escape_js(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\r' => {}
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

fn allowed_url_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '-' | '~' | '+' | '_' | '.' | '?' | '#' | '=' | '!' | '&' | ';' | ',' | '/' | ':'
                | '%' | '@' | '$' | '|' | '*' | '\'' | '(' | ')' | '[' | ']'
        )
        || !ch.is_ascii()
}

pub fn escape_url(input: &str) -> String {
    let cleaned: String = input.trim().chars().filter(|ch| allowed_url_char(*ch)).collect();
    if cleaned.is_empty() {
        return String::new();
    }
    if let Some((scheme, _)) = cleaned.split_once(':') {
        let looks_like_scheme = !scheme.is_empty()
            && scheme
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));
        if looks_like_scheme
            && !scheme.eq_ignore_ascii_case("http")
            && !scheme.eq_ignore_ascii_case("https")
        {
            return String::new();
        }
    }

    let mut out = String::with_capacity(cleaned.len());
    let mut rest = cleaned.as_str();
    while let Some(ch) = rest.chars().next() {
        match ch {
            '&' if rest.starts_with("&#038;") => {
                out.push_str("&#038;");
                rest = &rest["&#038;".len()..];
                continue;
            }
            '&' => out.push_str("&#038;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

pub fn trailing_slash(url: &str) -> String {
    format!("{}/", url.trim_end_matches(['/', '\\']))
}

pub fn host_of(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit('@').next()?;
    let host = host.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
