//! Checks over document structure: headings, lists, tables and landmarks

use crate::model::{CheckOutcome, Issue, PassedCheck};
use crate::rules::dom::{attr, child_elements, escape, has_ancestor, select_in, text_content, truncate};
use crate::rules::PageDocument;

/// Sectioning elements that stop a header/footer from being a page landmark
const SECTIONING: &[&str] = &["article", "aside", "main", "nav", "section"];

/// One H1, no skipped levels in document order, no empty headings
pub(crate) fn check_heading_structure(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    let headings: Vec<(u8, String)> = doc
        .select("h1, h2, h3, h4, h5, h6")
        .into_iter()
        .filter_map(|h| {
            let level = h.value().name().get(1..)?.parse::<u8>().ok()?;
            Some((level, text_content(h)))
        })
        .collect();

    let h1_count = headings.iter().filter(|(level, _)| *level == 1).count();
    match h1_count {
        0 => outcome.issue(
            Issue::error("heading_no_h1", "Page missing H1 heading")
                .with_recommendation("Add a single H1 heading to describe the page content"),
        ),
        1 => outcome.pass(PassedCheck::new(
            "heading_single_h1",
            "Page has single H1 heading",
        )),
        n => outcome.issue(
            Issue::warning(
                "heading_multiple_h1",
                format!("Page has {} H1 headings (should have 1)", n),
            )
            .with_recommendation("Use only one H1 per page for the main heading"),
        ),
    }

    let mut previous = 0u8;
    for (level, text) in &headings {
        if previous > 0 && *level > previous + 1 {
            outcome.issue(
                Issue::warning(
                    "heading_skipped_level",
                    format!("Heading level skipped: H{} to H{}", previous, level),
                )
                .with_element(format!(
                    "<h{}>{}</h{}>",
                    level,
                    escape(&truncate(text, 50)),
                    level
                ))
                .with_recommendation("Maintain sequential heading hierarchy"),
            );
        }
        previous = *level;
    }

    for (level, text) in &headings {
        if text.is_empty() {
            outcome.issue(
                Issue::error("heading_empty", format!("Empty H{} heading", level))
                    .with_element(format!("<h{}></h{}>", level, level))
                    .with_recommendation("Add meaningful text content to heading"),
            );
        }
    }

    outcome
}

/// List containers may only hold their item elements as direct children
pub(crate) fn check_lists(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for list in doc.select("ul, ol") {
        let invalid = child_elements(list)
            .any(|c| !matches!(c.value().name(), "li" | "script" | "template"));
        if invalid {
            outcome.issue(
                Issue::error("list_invalid_children", "List contains non-li children")
                    .with_element(format!("<{}>", list.value().name()))
                    .with_recommendation(
                        "Lists should only contain <li> elements as direct children",
                    ),
            );
        }
    }

    for dl in doc.select("dl") {
        let invalid = child_elements(dl).any(|c| {
            !matches!(
                c.value().name(),
                "dt" | "dd" | "div" | "script" | "template"
            )
        });
        if invalid {
            outcome.issue(
                Issue::error("dl_invalid_children", "Definition list contains invalid children")
                    .with_element("<dl>")
                    .with_recommendation(
                        "Definition lists should only contain dt, dd, or div elements",
                    ),
            );
        }
    }

    outcome
}

/// Data tables need a name and header cells; header cells need scope or id
///
/// Headers lacking scope are reported once per table with their count.
pub(crate) fn check_tables(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for table in doc.select("table") {
        let role = attr(table, "role");
        if role == "presentation" || role == "none" {
            continue;
        }

        let named = !select_in(table, "caption").is_empty()
            || !attr(table, "aria-label").is_empty()
            || !attr(table, "aria-labelledby").is_empty();
        if !named {
            outcome.issue(
                Issue::warning(
                    "table_no_caption",
                    "Data table missing caption or accessible name",
                )
                .with_element("<table>")
                .with_recommendation("Add <caption> or aria-label to describe the table"),
            );
        }

        let headers = select_in(table, "th");
        if headers.is_empty() {
            outcome.issue(
                Issue::error("table_no_headers", "Data table missing header cells")
                    .with_element("<table>")
                    .with_recommendation("Use <th> elements for header cells"),
            );
            continue;
        }

        let without_scope = headers
            .iter()
            .filter(|th| attr(**th, "scope").is_empty() && attr(**th, "id").is_empty())
            .count();
        if without_scope > 0 {
            outcome.issue(
                Issue::warning(
                    "table_headers_no_scope",
                    format!("{} table headers missing scope attribute", without_scope),
                )
                .with_element("<th>")
                .with_recommendation("Add scope=\"col\" or scope=\"row\" to header cells"),
            );
        }
    }

    outcome
}

/// Exactly one main landmark; multiple navs need labels; banner and contentinfo are noted
pub(crate) fn check_landmarks(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    match doc.select("main, [role=\"main\"]").len() {
        0 => outcome.issue(
            Issue::warning("landmark_no_main", "Page missing main landmark")
                .with_recommendation("Add <main> element or role=\"main\" to main content area"),
        ),
        1 => outcome.pass(
            PassedCheck::new("landmark_has_main", "Page has main landmark").with_element("<main>"),
        ),
        _ => outcome.issue(
            Issue::warning("landmark_multiple_main", "Page has multiple main landmarks")
                .with_recommendation("Use only one main landmark per page"),
        ),
    }

    let navs = doc.select("nav, [role=\"navigation\"]");
    if !navs.is_empty() {
        outcome.pass(
            PassedCheck::new("landmark_has_nav", "Navigation landmark found").with_element("<nav>"),
        );

        if navs.len() > 1 {
            let unlabeled = navs
                .iter()
                .filter(|n| attr(**n, "aria-label").is_empty() && attr(**n, "aria-labelledby").is_empty())
                .count();
            if unlabeled > 0 {
                outcome.issue(
                    Issue::warning(
                        "landmark_nav_no_label",
                        format!("{} navigation landmarks missing unique labels", unlabeled),
                    )
                    .with_element("<nav>")
                    .with_recommendation(
                        "Add aria-label to distinguish multiple navigation landmarks",
                    ),
                );
            }
        }
    }

    let has_banner = doc
        .select("header, [role=\"banner\"]")
        .into_iter()
        .any(|e| attr(e, "role") == "banner" || !has_ancestor(e, SECTIONING));
    if has_banner {
        outcome.pass(
            PassedCheck::new("landmark_has_banner", "Banner/header landmark found")
                .with_element("<header>"),
        );
    }

    let has_contentinfo = doc
        .select("footer, [role=\"contentinfo\"]")
        .into_iter()
        .any(|e| attr(e, "role") == "contentinfo" || !has_ancestor(e, SECTIONING));
    if has_contentinfo {
        outcome.pass(
            PassedCheck::new("landmark_has_contentinfo", "Footer/contentinfo landmark found")
                .with_element("<footer>"),
        );
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
    fn test_single_h1_sequential() {
        let doc = PageDocument::parse("<h1>Title</h1><h2>A</h2><h3>B</h3><h2>C</h2>");
        let outcome = check_heading_structure(&doc);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.passed[0].kind, "heading_single_h1");
    }

    #[test]
    fn test_missing_h1() {
        let doc = PageDocument::parse("<h2>Only a subheading</h2>");
        let outcome = check_heading_structure(&doc);
        assert_eq!(kinds(&outcome), vec!["heading_no_h1"]);
        assert_eq!(outcome.issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_multiple_h1_skips_and_empties() {
        let doc = PageDocument::parse("<h1>One</h1><h3>Deep</h3><h1>Two</h1><h4></h4>");
        let outcome = check_heading_structure(&doc);
        assert_eq!(
            kinds(&outcome),
            vec![
                "heading_multiple_h1",
                "heading_skipped_level",
                "heading_skipped_level",
                "heading_empty"
            ]
        );
        assert_eq!(outcome.issues[0].message, "Page has 2 H1 headings (should have 1)");
        assert_eq!(outcome.issues[1].message, "Heading level skipped: H1 to H3");
        assert_eq!(outcome.issues[1].element, "<h3>Deep</h3>");
        assert_eq!(outcome.issues[2].message, "Heading level skipped: H1 to H4");
        assert_eq!(outcome.issues[3].message, "Empty H4 heading");
    }

    #[test]
    fn test_lists() {
        let doc = PageDocument::parse(
            r#"<ul><li>a</li><script></script><template></template></ul>
               <ol><li>a</li><div>b</div></ol>
               <dl><dt>t</dt><dd>d</dd><div><dt>x</dt></div></dl>
               <dl><dt>t</dt><p>bad</p></dl>"#,
        );
        let outcome = check_lists(&doc);
        assert_eq!(kinds(&outcome), vec!["list_invalid_children", "dl_invalid_children"]);
        assert_eq!(outcome.issues[0].element, "<ol>");
        assert!(outcome.passed.is_empty());
    }

    #[test]
    fn test_scope_warnings_are_batched_per_table() {
        let doc = PageDocument::parse(
            r#"<table><caption>Prices</caption>
                 <tr><th>Item</th><th>Cost</th><th>Qty</th></tr>
                 <tr><td>a</td><td>1</td><td>2</td></tr>
               </table>"#,
        );
        let outcome = check_tables(&doc);
        assert_eq!(kinds(&outcome), vec!["table_headers_no_scope"]);
        assert_eq!(outcome.issues[0].message, "3 table headers missing scope attribute");
        assert_eq!(outcome.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_table_without_name_or_headers() {
        let doc = PageDocument::parse(
            r#"<table><tr><td>1</td></tr></table>
               <table role="presentation"><tr><td>layout</td></tr></table>
               <table aria-label="Scores"><tr><th scope="col">A</th><th id="b">B</th></tr></table>"#,
        );
        let outcome = check_tables(&doc);
        assert_eq!(kinds(&outcome), vec!["table_no_caption", "table_no_headers"]);
    }

    #[test]
    fn test_landmarks_complete_page() {
        let doc = PageDocument::parse(
            r#"<header>Site</header>
               <nav aria-label="Primary"></nav><nav aria-label="Footer"></nav>
               <main><article><header>Post</header></article></main>
               <footer>Legal</footer>"#,
        );
        let outcome = check_landmarks(&doc);
        assert!(outcome.issues.is_empty());
        let passed: Vec<_> = outcome.passed.iter().map(|p| p.kind.as_str()).collect();
        assert_eq!(
            passed,
            vec![
                "landmark_has_main",
                "landmark_has_nav",
                "landmark_has_banner",
                "landmark_has_contentinfo"
            ]
        );
    }

    #[test]
    fn test_landmark_problems() {
        let doc = PageDocument::parse(
            r#"<nav></nav><div role="navigation" aria-label="Side"></div><nav></nav>
               <section><header>Scoped</header><footer>Scoped</footer></section>"#,
        );
        let outcome = check_landmarks(&doc);
        assert_eq!(kinds(&outcome), vec!["landmark_no_main", "landmark_nav_no_label"]);
        assert_eq!(
            outcome.issues[1].message,
            "2 navigation landmarks missing unique labels"
        );
        let passed: Vec<_> = outcome.passed.iter().map(|p| p.kind.as_str()).collect();
        assert_eq!(passed, vec!["landmark_has_nav"]);
    }

    #[test]
    fn test_multiple_main() {
        let doc = PageDocument::parse(r#"<main>a</main><div role="main">b</div>"#);
        assert_eq!(kinds(&check_landmarks(&doc)), vec!["landmark_multiple_main"]);
    }

    #[test]
    fn test_role_banner_inside_section_counts() {
        let doc = PageDocument::parse(r#"<section><div role="banner">Top</div></section>"#);
        let outcome = check_landmarks(&doc);
        assert!(outcome.passed.iter().any(|p| p.kind == "landmark_has_banner"));
    }
}
