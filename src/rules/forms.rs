//! Checks over form controls and buttons

use crate::model::{CheckOutcome, Issue, PassedCheck};
use crate::rules::dom::{attr, descendant_image_alt, escape, has_ancestor, text_content, truncate};
use crate::rules::PageDocument;
use scraper::ElementRef;
use std::collections::HashSet;

/// Input types that never need a visible label
const UNLABELED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

const LABEL_RECOMMENDATION: &str = "Add a <label> element or aria-label attribute";

/// Whether a form control resolves an accessible name
///
/// Accepted mechanisms: `label[for]`, `aria-label`, `aria-labelledby`,
/// `title`, or a wrapping `<label>`.
fn has_accessible_label(control: ElementRef<'_>, label_targets: &HashSet<&str>) -> bool {
    let id = attr(control, "id");
    (!id.is_empty() && label_targets.contains(id))
        || !attr(control, "aria-label").is_empty()
        || !attr(control, "aria-labelledby").is_empty()
        || !attr(control, "title").is_empty()
        || has_ancestor(control, &["label"])
}

/// Inputs, textareas and selects must resolve an accessible name
pub(crate) fn check_form_labels(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    let labels = doc.select("label[for]");
    let label_targets: HashSet<&str> = labels.iter().map(|l| attr(*l, "for")).collect();

    for input in doc.select("input") {
        let input_type = attr(input, "type");
        if UNLABELED_INPUT_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(input_type))
        {
            continue;
        }

        if has_accessible_label(input, &label_targets) {
            outcome.pass(
                PassedCheck::new("form_has_label", "Form input has accessible label")
                    .with_element(format!("<input type=\"{}\">", escape(input_type))),
            );
        } else {
            outcome.issue(
                Issue::error("form_missing_label", "Form input missing accessible label")
                    .with_element(format!(
                        "<input type=\"{}\" name=\"{}\">",
                        escape(input_type),
                        escape(attr(input, "name"))
                    ))
                    .with_recommendation(LABEL_RECOMMENDATION),
            );
        }
    }

    for textarea in doc.select("textarea") {
        if has_accessible_label(textarea, &label_targets) {
            outcome.pass(
                PassedCheck::new("textarea_has_label", "Textarea has accessible label")
                    .with_element("<textarea>"),
            );
        } else {
            outcome.issue(
                Issue::error("textarea_missing_label", "Textarea missing accessible label")
                    .with_element("<textarea>")
                    .with_recommendation(LABEL_RECOMMENDATION),
            );
        }
    }

    for select in doc.select("select") {
        if has_accessible_label(select, &label_targets) {
            outcome.pass(
                PassedCheck::new("select_has_label", "Select element has accessible label")
                    .with_element("<select>"),
            );
        } else {
            outcome.issue(
                Issue::error("select_missing_label", "Select element missing accessible label")
                    .with_element("<select>")
                    .with_recommendation(LABEL_RECOMMENDATION),
            );
        }
    }

    outcome
}

fn is_button(element: ElementRef<'_>) -> bool {
    match element.value().name() {
        "button" => true,
        "input" => {
            let input_type = attr(element, "type");
            input_type.eq_ignore_ascii_case("button") || input_type.eq_ignore_ascii_case("submit")
        }
        _ => attr(element, "role") == "button",
    }
}

/// Buttons need an accessible name or a title
///
/// The name is the first non-empty of `aria-label`, text content, `value`,
/// or the alt text of an image inside the button.
pub(crate) fn check_buttons(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for button in doc
        .select("button, input, [role]")
        .into_iter()
        .filter(|e| is_button(*e))
    {
        let title = attr(button, "title");
        let mut name = [
            attr(button, "aria-label").to_string(),
            text_content(button),
            attr(button, "value").to_string(),
        ]
        .into_iter()
        .find(|n| !n.is_empty())
        .unwrap_or_default();

        if name.is_empty() && title.is_empty() {
            name = descendant_image_alt(button).unwrap_or_default();
        }

        if name.is_empty() && title.is_empty() {
            outcome.issue(
                Issue::error("button_no_name", "Button missing accessible name")
                    .with_element("<button>")
                    .with_recommendation("Add text content or aria-label to button"),
            );
        } else {
            outcome.pass(
                PassedCheck::new("button_has_name", "Button has accessible name")
                    .with_element(format!("<button>{}</button>", escape(&truncate(&name, 30)))),
            );
        }
    }

    outcome
}
