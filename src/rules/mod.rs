//! Rule engine: the fixed battery of WCAG checks
//!
//! Every check is a pure function over a [`PageDocument`] returning a
//! [`CheckOutcome`]. Checks share no state, so they can run in any order and
//! the combined findings are the same multiset. The [`RuleSet`] stamps each
//! finding with the criterion id of the rule that produced it.
//!
//! Checks are grouped by theme:
//! - `content`: images, color contrast, media
//! - `forms`: form labels, buttons
//! - `structure`: headings, lists, tables, landmarks
//! - `navigation`: page title, language, link text, skip links, keyboard focus
//! - `aria`: ARIA roles, iframes

mod aria;
mod content;
mod document;
mod dom;
mod forms;
mod navigation;
mod structure;

pub use document::PageDocument;

use crate::model::CheckOutcome;

/// Signature shared by every check
pub type CheckFn = fn(&PageDocument) -> CheckOutcome;

/// One check bound to its governing WCAG criterion
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub criterion: &'static str,
    check: CheckFn,
}

impl Rule {
    pub const fn new(name: &'static str, criterion: &'static str, check: CheckFn) -> Self {
        Self {
            name,
            criterion,
            check,
        }
    }

    /// Runs the check and tags its findings with this rule's criterion
    pub fn evaluate(&self, doc: &PageDocument) -> CheckOutcome {
        (self.check)(doc).tagged(self.criterion)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("criterion", &self.criterion)
            .finish()
    }
}

const STANDARD_RULES: [Rule; 16] = [
    Rule::new("images_alt", "1.1.1", content::check_images_alt),
    Rule::new("form_labels", "3.3.2", forms::check_form_labels),
    Rule::new("heading_structure", "1.3.1", structure::check_heading_structure),
    Rule::new("link_text", "2.4.4", navigation::check_link_text),
    Rule::new("language", "3.1.1", navigation::check_language),
    Rule::new("page_title", "2.4.2", navigation::check_page_title),
    Rule::new("color_contrast", "1.4.3", content::check_color_contrast),
    Rule::new("skip_links", "2.4.1", navigation::check_skip_links),
    Rule::new("keyboard_focus", "2.4.7", navigation::check_keyboard_focus),
    Rule::new("aria_labels", "4.1.2", aria::check_aria_labels),
    Rule::new("tables", "1.3.1", structure::check_tables),
    Rule::new("iframes", "4.1.2", aria::check_iframes),
    Rule::new("buttons", "4.1.2", forms::check_buttons),
    Rule::new("lists", "1.3.1", structure::check_lists),
    Rule::new("landmarks", "1.3.1", structure::check_landmarks),
    Rule::new("media", "1.2.1", content::check_media),
];

/// An immutable, ordered collection of rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// The sixteen standard checks
    pub fn standard() -> Self {
        Self::from_rules(STANDARD_RULES.to_vec())
    }

    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule and concatenates the tagged findings in rule order
    pub fn run(&self, doc: &PageDocument) -> CheckOutcome {
        let mut combined = CheckOutcome::new();
        for rule in &self.rules {
            combined.extend(rule.evaluate(doc));
        }
        combined
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Issue, PassedCheck, Severity, WcagCatalog};

    const KITCHEN_SINK: &str = r##"<!DOCTYPE html>
        <html lang="en"><head><title>Kitchen sink page</title>
        <style>.btn:focus { outline: 0 } a:focus { color: red }</style></head>
        <body>
          <a href="#main">Skip to content</a>
          <header>Site</header>
          <nav><a href="/a" target="_blank">More</a></nav><nav><a href="/b">Blog</a></nav>
          <main>
            <h1>Welcome</h1><h3>Jump</h3><h2></h2>
            <img src="a.png"><img src="b.png" alt="b.png"><img src="c.png" alt="Chart">
            <form><input name="q"><label>Email <input type="email"></label><textarea></textarea></form>
            <p style="color:#000;background:#000">ghost</p>
            <table><tr><th>A</th><th scope="col">B</th></tr></table>
            <iframe src="/embed"></iframe>
            <button></button><div role="dialog"></div>
            <ul><div>bad</div></ul>
            <video src="v.mp4"></video><audio src="a.mp3"></audio>
          </main>
          <footer>Legal</footer>
        </body></html>"##;

    fn sorted_issues(mut issues: Vec<Issue>) -> Vec<Issue> {
        issues.sort_by(|a, b| {
            (&a.wcag, &a.kind, &a.message, &a.element).cmp(&(&b.wcag, &b.kind, &b.message, &b.element))
        });
        issues
    }

    fn sorted_passed(mut passed: Vec<PassedCheck>) -> Vec<PassedCheck> {
        passed.sort_by(|a, b| {
            (&a.wcag, &a.kind, &a.message, &a.element).cmp(&(&b.wcag, &b.kind, &b.message, &b.element))
        });
        passed
    }

    #[test]
    fn test_standard_set_has_sixteen_catalogued_rules() {
        let rules = RuleSet::standard();
        let catalog = WcagCatalog::standard();
        assert_eq!(rules.len(), 16);
        for rule in rules.rules() {
            assert!(catalog.contains(rule.criterion), "{} not catalogued", rule.name);
        }
    }

    #[test]
    fn test_findings_are_tagged_with_rule_criterion() {
        let doc = PageDocument::parse(KITCHEN_SINK);
        let outcome = RuleSet::standard().run(&doc);
        assert!(outcome.issues.iter().all(|i| !i.wcag.is_empty()));
        assert!(outcome.passed.iter().all(|p| !p.wcag.is_empty()));

        let media: Vec<_> = outcome.issues.iter().filter(|i| i.kind == "video_no_captions").collect();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].wcag, "1.2.1");
    }

    #[test]
    fn test_order_independence() {
        let doc = PageDocument::parse(KITCHEN_SINK);
        let forward = RuleSet::standard().run(&doc);

        let mut reversed_rules = RuleSet::standard().rules().to_vec();
        reversed_rules.reverse();
        let reversed = RuleSet::from_rules(reversed_rules).run(&doc);

        let mut rotated_rules = RuleSet::standard().rules().to_vec();
        rotated_rules.rotate_left(7);
        let rotated = RuleSet::from_rules(rotated_rules).run(&doc);

        assert_eq!(sorted_issues(forward.issues.clone()), sorted_issues(reversed.issues));
        assert_eq!(sorted_passed(forward.passed.clone()), sorted_passed(reversed.passed));
        assert_eq!(sorted_issues(forward.issues), sorted_issues(rotated.issues));
        assert_eq!(sorted_passed(forward.passed), sorted_passed(rotated.passed));
    }

    #[test]
    fn test_bare_page_has_exactly_three_errors() {
        let doc = PageDocument::parse(r#"<html><body><h1>Hello</h1><img src="photo.jpg"></body></html>"#);
        let outcome = RuleSet::standard().run(&doc);

        let errors: Vec<_> = outcome
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| i.kind.as_str())
            .collect();
        assert_eq!(errors, vec!["image_missing_alt", "lang_missing", "title_missing"]);

        assert!(!outcome.issues.iter().any(|i| i.wcag == "1.3.1" && i.kind.starts_with("heading")));
        assert!(outcome.passed.iter().any(|p| p.kind == "heading_single_h1"));
    }

    #[test]
    fn test_captioned_video_passes_media_criterion() {
        let doc = PageDocument::parse(
            r#"<video src="talk.mp4"><track kind="captions" src="talk.vtt" srclang="en"></video>"#,
        );
        let outcome = RuleSet::standard().run(&doc);
        assert!(!outcome.issues.iter().any(|i| i.wcag == "1.2.1"));
        assert!(outcome
            .passed
            .iter()
            .any(|p| p.wcag == "1.2.1" && p.kind == "video_has_captions"));
    }

    #[test]
    fn test_unscoped_headers_yield_one_batched_warning() {
        let doc = PageDocument::parse(
            r#"<table aria-label="Stats"><tr><th>Year</th><th>Sales</th></tr><tr><td>1</td><td>2</td></tr></table>"#,
        );
        let outcome = RuleSet::standard().run(&doc);
        let scope: Vec<_> = outcome
            .issues
            .iter()
            .filter(|i| i.kind == "table_headers_no_scope")
            .collect();
        assert_eq!(scope.len(), 1);
        assert_eq!(scope[0].message, "2 table headers missing scope attribute");
        assert_eq!(scope[0].severity, Severity::Warning);
    }

    #[test]
    fn test_kitchen_sink_expected_issue_kinds() {
        let doc = PageDocument::parse(KITCHEN_SINK);
        let outcome = RuleSet::standard().run(&doc);
        let kinds: Vec<_> = outcome.issues.iter().map(|i| i.kind.as_str()).collect();

        for expected in [
            "image_missing_alt",
            "image_alt_filename",
            "form_missing_label",
            "textarea_missing_label",
            "heading_skipped_level",
            "heading_empty",
            "link_generic_text",
            "link_new_window_warning",
            "contrast_same_color",
            "focus_outline_removed",
            "aria_missing_label",
            "table_no_caption",
            "table_headers_no_scope",
            "iframe_no_title",
            "button_no_name",
            "list_invalid_children",
            "landmark_nav_no_label",
            "video_no_captions",
            "audio_transcript",
        ] {
            assert!(kinds.contains(&expected), "missing {}", expected);
        }
        assert!(!kinds.contains(&"skip_link_missing"));
        assert!(!kinds.contains(&"lang_missing"));
    }
}
