//! HTML rendering of the editor page.
//!
//! String-based rendering in the shape of the original page: header, the
//! create/edit form with its hidden CSRF field and inline CAPTCHA image,
//! a preview of the currently selected article, and the article list.
//! Every interpolated value passes through the sanitizer here, even
//! content that was already sanitized at write time.

use crate::sanitize::full_sanitize;

/// Everything the editor page needs to render.
#[derive(Debug, Clone)]
pub struct EditorPage {
    pub csrf_token: String,
    /// Base64-encoded PNG of the live CAPTCHA challenge.
    pub captcha_image_base64: String,
    /// Raw title from the query string, if any.
    pub current_title: String,
    /// Stored body of the selected article, empty if none.
    pub current_body: String,
    pub articles: Vec<String>,
    pub word_count: usize,
}

/// Renders the document head and opening body tag.
pub fn render_header(page_title: &str) -> String {
    let title = full_sanitize(page_title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
"#
    )
}

/// Renders the editor form, CAPTCHA challenge and preview.
pub fn render_editor(page: &EditorPage) -> String {
    let title = full_sanitize(&page.current_title);
    let body = full_sanitize(&page.current_body);
    let csrf_token = full_sanitize(&page.csrf_token);
    let word_count = page.word_count;
    let captcha = &page.captcha_image_base64;

    format!(
        r#"    <div id="header" class="header">
        <a href="/">Article Editor</a>
        <div>{word_count} words written</div>
    </div>
    <div class="page">
        <div class="main">
            <h2>Create/Edit Article</h2>
            <p>Create a new article by filling out the fields below. Edit an article by typing the title in the title field, selecting it from the auto-complete list, and updating the text field.</p>
            <form action="/" method="post">
                <input name="title" type="text" placeholder="Article title..." value="{title}" required>
                <br />
                <textarea name="body" placeholder="Article body..." required>{body}</textarea>
                <br />
                <img src="data:image/png;base64,{captcha}" alt="CAPTCHA challenge">
                <input name="captcha_answer" type="text" placeholder="Type the characters shown above..." required>
                <br />
                <button type="submit" class="submit-button">Submit</button>
                <input type="hidden" name="csrf_token" value="{csrf_token}">
            </form>
            <h2>Preview</h2>
            <h3>Title:</h3> <p>{title}</p>
            <h3>Content:</h3> <p>{body}</p>
"#
    )
}

/// Renders the article list and closes the document.
pub fn render_article_list(articles: &[String]) -> String {
    let mut out = String::from("            <h2>Articles</h2>\n            <ul>\n");
    for article in articles {
        let escaped = full_sanitize(article);
        out.push_str(&format!(
            "                <li><a href='/?title={escaped}'>{escaped}</a></li>\n"
        ));
    }
    out.push_str("            </ul>\n        </div>\n    </div>\n</body>\n</html>\n");
    out
}

/// Renders the complete editor page.
pub fn render_page(page_title: &str, page: &EditorPage) -> String {
    let mut html = render_header(page_title);
    html.push_str(&render_editor(page));
    html.push_str(&render_article_list(&page.articles));
    html
}
