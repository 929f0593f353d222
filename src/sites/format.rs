use regex::Regex;

/// Turn the `/{segment}/{slug}` part of a URL into a display name:
/// `.../company/acme-corp-inc?x=1` → `Acme Corp Inc`.
///
/// Returns `None` when the URL has no such segment.
pub fn format_company_name(url: &str, segment: &str) -> Option<String> {
    let re = Regex::new(&format!(r"/{}/([^/?]+)", regex::escape(segment))).ok()?;
    let slug = re.captures(url)?.get(1)?.as_str();

    let spaced = slug.replace('-', " ");
    Some(capitalize_words(&spaced).trim().to_string())
}

/// Uppercase every word character that sits on a word boundary
/// (start of string, or right after a non-word character).
fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_word = false;
    for c in s.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}
