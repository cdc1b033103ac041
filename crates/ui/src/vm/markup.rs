use std::collections::HashSet;

/// Clean trivia text for `dangerous_inner_html`.
///
/// Question sources deliver HTML-entity encoded text; only a few inline
/// emphasis tags survive.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    let tags: HashSet<&str> = ["em", "strong", "b", "i"].into_iter().collect();

    ammonia::Builder::empty()
        .tags(tags)
        .clean(text)
        .to_string()
}
