use std::collections::{HashMap, HashSet};

/// Render learner-facing markup (questions, options, explanations) to safe HTML.
///
/// `$…$` and `$$…$$` become `span.math-inline` / `span.math-display` for the
/// page's math renderer; everything else is plain CommonMark.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_MATH);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Render a single line of markup without the surrounding paragraph.
#[must_use]
pub fn inline_markdown_to_html(input: &str) -> String {
    let html = markdown_to_html(input);
    let trimmed = html.trim_end();
    trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
        .filter(|inner| !inner.contains("<p>"))
        .map_or_else(|| html.clone(), ToOwned::to_owned)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "del", "code", "pre", "blockquote",
        "ul", "ol", "li", "a", "table", "thead", "tbody", "tr", "th", "td", "sub", "sup",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    let mut classes: HashMap<&str, HashSet<&str>> = HashMap::new();
    classes.insert(
        "span",
        ["math", "math-inline", "math-display"].into_iter().collect(),
    );

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .allowed_classes(classes)
        .clean(html)
        .to_string()
}
