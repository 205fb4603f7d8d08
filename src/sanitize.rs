//! Untrusted input sanitization.
//!
//! Pure string transformations: HTML escaping, filename whitelisting,
//! tag stripping, and length limiting. Stateless; everything that crosses
//! a trust boundary (form fields, query parameters, filenames) passes
//! through here before it is stored or rendered.

/// Maximum length applied by [`full_sanitize`], in characters.
pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Tags preserved by [`strip_dangerous_tags`]. Everything else is removed.
const ALLOWED_TAGS: [&str; 10] = ["p", "a", "b", "i", "strong", "em", "ul", "ol", "li", "br"];

/// Escapes HTML entities to prevent XSS.
///
/// Escapes `&`, `<`, `>`, `"` and `'`.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Removes every character outside `[A-Za-z0-9_-]`.
///
/// Path separators and dots are deleted, not escaped, so the result can
/// never name a parent directory or an absolute path.
#[must_use]
pub fn sanitize_file_name(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Strips HTML tags except a fixed allow-list of formatting tags.
///
/// Allowed tags keep their attributes verbatim. An unterminated `<`
/// swallows the remainder of the input.
#[must_use]
pub fn strip_dangerous_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) => {
                let tag = &after[..end];
                if is_allowed_tag(tag) {
                    out.push('<');
                    out.push_str(tag);
                    out.push('>');
                }
                rest = &after[end + 1..];
            }
            None => {
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_allowed_tag(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    ALLOWED_TAGS.contains(&name.as_str())
}

/// Truncates the input to at most `max_length` characters.
#[must_use]
pub fn limit_length(input: &str, max_length: usize) -> String {
    input.chars().take(max_length).collect()
}

/// Full sanitization pass for free-text fields.
///
/// Trims, strips unsafe tags, escapes HTML entities and limits the result
/// to [`DEFAULT_MAX_LENGTH`] characters, in that order.
#[must_use]
pub fn full_sanitize(input: &str) -> String {
    let stripped = strip_dangerous_tags(input.trim());
    limit_length(&escape_html(&stripped), DEFAULT_MAX_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        let sanitized = escape_html("<p>Hello, 'World' & welcome!</p>");
        assert_eq!(
            sanitized,
            "&lt;p&gt;Hello, &#039;World&#039; &amp; welcome!&lt;/p&gt;"
        );
    }

    #[test]
    fn test_escape_html_empty() {
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_html_double_quotes() {
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("test@file.jpg!%"), "testfilejpg");
        assert_eq!(sanitize_file_name("My Title!"), "MyTitle");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_file_name("safe_name-1"), "safe_name-1");
    }

    #[test]
    fn test_sanitize_file_name_empty() {
        assert_eq!(sanitize_file_name(""), "");
        assert_eq!(sanitize_file_name("!!!/..."), "");
    }

    #[test]
    fn test_strip_dangerous_tags_removes_script() {
        let sanitized = strip_dangerous_tags("<script>alert('xss')</script>hello");
        assert_eq!(sanitized, "alert('xss')hello");
    }

    #[test]
    fn test_strip_dangerous_tags_keeps_allowed() {
        let input = "<p>a <b>bold</b> <br/> claim</p>";
        assert_eq!(strip_dangerous_tags(input), input);
    }

    #[test]
    fn test_strip_dangerous_tags_keeps_attributes_on_allowed() {
        let input = "<a href='/index'>link</a>";
        assert_eq!(strip_dangerous_tags(input), input);
    }

    #[test]
    fn test_strip_dangerous_tags_unterminated() {
        assert_eq!(strip_dangerous_tags("hello <img src=x"), "hello ");
    }

    #[test]
    fn test_limit_length() {
        assert_eq!(limit_length("abcdef", 3), "abc");
        assert_eq!(limit_length("abc", 10), "abc");
    }

    #[test]
    fn test_limit_length_multibyte() {
        // counts characters, not bytes
        assert_eq!(limit_length("héllo wörld", 5), "héllo");
    }

    #[test]
    fn test_full_sanitize() {
        let sanitized = full_sanitize("  Test <br/> data &  ");
        assert_eq!(sanitized, "Test &lt;br/&gt; data &amp;");
    }

    #[test]
    fn test_full_sanitize_strips_script_then_escapes() {
        let sanitized = full_sanitize("<script>alert(1)</script><b>ok</b>");
        assert_eq!(sanitized, "alert(1)&lt;b&gt;ok&lt;/b&gt;");
    }

    #[test]
    fn test_full_sanitize_limits_length() {
        let long = "a".repeat(400);
        assert_eq!(full_sanitize(&long).len(), DEFAULT_MAX_LENGTH);
    }
}
