//! Checks over page identity and navigation: title, language, links, skip links, focus

use crate::model::{CheckOutcome, Issue, PassedCheck};
use crate::rules::dom::{attr, descendant_image_alt, escape, text_content, truncate};
use crate::rules::PageDocument;
use regex::Regex;
use std::sync::LazyLock;

/// Link names that say nothing about the destination
const GENERIC_LINK_TEXT: &[&str] = &[
    "click here",
    "read more",
    "learn more",
    "here",
    "more",
    "link",
    "click",
];

/// Titles shorter than this are flagged as possibly undescriptive
const MIN_TITLE_LENGTH: usize = 10;

static LANGUAGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("hardcoded regex pattern is valid")
});

static OUTLINE_REMOVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)outline\s*:\s*(none|0)").expect("hardcoded regex pattern is valid")
});

static FOCUS_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i):focus\s*\{[^}]+\}").expect("hardcoded regex pattern is valid")
});

/// The page needs a non-empty `<title>` of reasonable length
pub(crate) fn check_page_title(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    match doc.title() {
        None => outcome.issue(
            Issue::error("title_missing", "Page missing <title> element")
                .with_recommendation("Add a descriptive <title> element in <head>"),
        ),
        Some(title) if title.is_empty() => outcome.issue(
            Issue::error("title_empty", "Page title is empty")
                .with_element("<title></title>")
                .with_recommendation("Add descriptive text to the title element"),
        ),
        Some(title) if title.chars().count() < MIN_TITLE_LENGTH => outcome.issue(
            Issue::warning("title_too_short", "Page title may be too short")
                .with_element(format!("<title>{}</title>", escape(&title)))
                .with_recommendation("Use a more descriptive title"),
        ),
        Some(title) => outcome.pass(
            PassedCheck::new("title_present", "Page has descriptive title")
                .with_element(format!("<title>{}</title>", escape(&truncate(&title, 50)))),
        ),
    }

    outcome
}

/// `<html>` needs a `lang` (or `xml:lang`) of the form `xx` or `xx-YY`
pub(crate) fn check_language(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    let root = doc.root();
    let lang = attr(root, "lang");
    let xml_lang = attr(root, "xml:lang");
    let code = if lang.is_empty() { xml_lang } else { lang };

    if code.is_empty() {
        outcome.issue(
            Issue::error("lang_missing", "Page missing language attribute")
                .with_element("<html>")
                .with_recommendation("Add lang attribute to <html> element (e.g., lang=\"en\")"),
        );
    } else if !LANGUAGE_CODE.is_match(code) {
        outcome.issue(
            Issue::error("lang_invalid", "Invalid language code")
                .with_element(format!("<html lang=\"{}\">", escape(lang)))
                .with_recommendation("Use valid BCP 47 language code (e.g., \"en\", \"en-US\")"),
        );
    } else {
        outcome.pass(
            PassedCheck::new("lang_valid", "Valid language attribute present")
                .with_element(format!("<html lang=\"{}\">", escape(code))),
        );
    }

    outcome
}

/// Links need a descriptive accessible name and should announce new windows
pub(crate) fn check_link_text(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for link in doc.select("a[href]") {
        let href = attr(link, "href");
        let title = attr(link, "title");
        let aria_label = attr(link, "aria-label");

        let mut name = if aria_label.is_empty() {
            text_content(link)
        } else {
            aria_label.to_string()
        };
        if name.is_empty() && title.is_empty() {
            name = descendant_image_alt(link).unwrap_or_default();
        }

        if name.is_empty() && title.is_empty() {
            outcome.issue(
                Issue::error("link_empty", "Link has no accessible name")
                    .with_element(format!("<a href=\"{}\">", escape(&truncate(href, 50))))
                    .with_recommendation("Add descriptive link text or aria-label"),
            );
        } else if GENERIC_LINK_TEXT.contains(&name.to_lowercase().as_str()) {
            outcome.issue(
                Issue::warning(
                    "link_generic_text",
                    format!("Link uses generic text: \"{}\"", name),
                )
                .with_element(format!("<a>{}</a>", escape(&name)))
                .with_recommendation("Use descriptive text that explains the link destination"),
            );
        } else {
            outcome.pass(
                PassedCheck::new("link_descriptive", "Link has descriptive text")
                    .with_element(format!("<a>{}</a>", escape(&truncate(&name, 30)))),
            );
        }

        if attr(link, "target") == "_blank" {
            let announced = format!("{}{}", name, title).to_lowercase();
            if !announced.contains("new window") && !announced.contains("new tab") {
                outcome.issue(
                    Issue::warning(
                        "link_new_window_warning",
                        "Link opens in new window without warning",
                    )
                    .with_element(format!(
                        "<a target=\"_blank\">{}</a>",
                        escape(&truncate(&name, 30))
                    ))
                    .with_recommendation(
                        "Add \"(opens in new window)\" to link text or aria-label",
                    ),
                );
            }
        }
    }

    outcome
}

/// At least one link must skip to the main content
pub(crate) fn check_skip_links(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    let found = doc.select("a").into_iter().any(|a| {
        let href = attr(a, "href").to_lowercase();
        href.contains("#main")
            || href.contains("#content")
            || text_content(a).to_lowercase().contains("skip")
    });

    if found {
        outcome.pass(PassedCheck::new(
            "skip_link_present",
            "Skip navigation link found",
        ));
    } else {
        outcome.issue(
            Issue::warning("skip_link_missing", "No skip navigation link found")
                .with_recommendation("Add a \"Skip to main content\" link at the top of the page"),
        );
    }

    outcome
}

/// Pattern match over the raw markup for removed outlines and custom `:focus` rules
pub(crate) fn check_keyboard_focus(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    if OUTLINE_REMOVED.is_match(doc.raw()) {
        outcome.issue(
            Issue::warning("focus_outline_removed", "Focus outline may be removed via CSS")
                .with_element("outline: none")
                .with_recommendation("Ensure a visible focus indicator is provided"),
        );
    }

    if FOCUS_RULE.is_match(doc.raw()) {
        outcome.pass(PassedCheck::new(
            "focus_styles_present",
            "Custom focus styles detected",
        ));
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    fn kinds(outcome: &CheckOutcome) -> Vec<&str> {
        outcome.issues.iter().map(|i| i.kind.as_str()).collect()
    }

    #[test]
    fn test_title_variants() {
        let missing = check_page_title(&PageDocument::parse("<p>x</p>"));
        assert_eq!(kinds(&missing), vec!["title_missing"]);

        let empty = check_page_title(&PageDocument::parse("<title>  </title>"));
        assert_eq!(kinds(&empty), vec!["title_empty"]);

        let short = check_page_title(&PageDocument::parse("<title>Home</title>"));
        assert_eq!(kinds(&short), vec!["title_too_short"]);
        assert_eq!(short.issues[0].severity, Severity::Warning);

        let good = check_page_title(&PageDocument::parse("<title>Accessible Widgets Ltd</title>"));
        assert!(good.issues.is_empty());
        assert_eq!(good.passed[0].kind, "title_present");
    }

    #[test]
    fn test_language_variants() {
        let cases = [
            ("<html><body></body></html>", Some("lang_missing")),
            (r#"<html lang="english"></html>"#, Some("lang_invalid")),
            (r#"<html lang="en_US"></html>"#, Some("lang_invalid")),
            (r#"<html lang="EN"></html>"#, Some("lang_invalid")),
            (r#"<html lang="en"></html>"#, None),
            (r#"<html lang="pt-BR"></html>"#, None),
            (r#"<html xml:lang="de"></html>"#, None),
        ];
        for (html, expected) in cases {
            let outcome = check_language(&PageDocument::parse(html));
            assert_eq!(outcome.issues.first().map(|i| i.kind.as_str()), expected, "{}", html);
            assert_eq!(outcome.passed.len(), usize::from(expected.is_none()));
        }
    }

    #[test]
    fn test_link_names() {
        let doc = PageDocument::parse(
            r#"<a href="/a">Pricing plans</a>
               <a href="/b"></a>
               <a href="/c">Read More</a>
               <a href="/d" aria-label="Download the annual report">here</a>
               <a href="/e"><img src="i.png" alt="Company home"></a>
               <a href="/f" title="Settings"></a>
               <a name="anchor-without-href"></a>"#,
        );
        let outcome = check_link_text(&doc);
        assert_eq!(kinds(&outcome), vec!["link_empty", "link_generic_text"]);
        assert_eq!(outcome.issues[1].message, "Link uses generic text: \"Read More\"");
        assert_eq!(outcome.issues[0].element, "<a href=\"/b\">");
        assert_eq!(outcome.passed.len(), 4);
    }

    #[test]
    fn test_new_window_links() {
        let doc = PageDocument::parse(
            r#"<a href="/x" target="_blank">Partner site</a>
               <a href="/y" target="_blank">Partner site (opens in new window)</a>
               <a href="/z" target="_blank" title="Opens in a new tab">Docs</a>"#,
        );
        let outcome = check_link_text(&doc);
        assert_eq!(kinds(&outcome), vec!["link_new_window_warning"]);
    }

    #[test]
    fn test_skip_links() {
        let by_href = PageDocument::parse(r##"<a href="#MAIN-content">Jump</a>"##);
        assert!(check_skip_links(&by_href).issues.is_empty());

        let by_text = PageDocument::parse(r##"<a href="#top">Skip navigation</a>"##);
        assert!(check_skip_links(&by_text).issues.is_empty());

        let none = PageDocument::parse(r#"<a href="/about">About</a>"#);
        assert_eq!(kinds(&check_skip_links(&none)), vec!["skip_link_missing"]);
    }

    #[test]
    fn test_keyboard_focus_patterns() {
        let doc = PageDocument::parse(
            "<style>a { outline : none } a:focus { box-shadow: 0 0 2px blue; }</style>",
        );
        let outcome = check_keyboard_focus(&doc);
        assert_eq!(kinds(&outcome), vec!["focus_outline_removed"]);
        assert_eq!(outcome.passed[0].kind, "focus_styles_present");

        let plain = check_keyboard_focus(&PageDocument::parse("<p>no styles</p>"));
        assert!(plain.is_empty());
    }

    #[test]
    fn test_outline_zero_in_inline_style() {
        let doc = PageDocument::parse(r#"<button style="outline:0">x</button>"#);
        assert_eq!(kinds(&check_keyboard_focus(&doc)), vec!["focus_outline_removed"]);
    }
}
