//! Name, role, value checks for ARIA roles and embedded frames

use crate::model::{CheckOutcome, Issue, PassedCheck};
use crate::rules::dom::{attr, escape, text_content, truncate};
use crate::rules::PageDocument;

/// Interactive and landmark roles that must carry an accessible name
const ROLES_NEEDING_NAME: &[&str] = &[
    "button",
    "link",
    "checkbox",
    "radio",
    "textbox",
    "combobox",
    "listbox",
    "dialog",
    "alertdialog",
    "region",
    "navigation",
    "main",
    "search",
    "form",
];

pub(crate) fn check_aria_labels(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for element in doc.select("[role]") {
        let role = attr(element, "role");
        if !ROLES_NEEDING_NAME.contains(&role) {
            continue;
        }

        let named = !attr(element, "aria-label").is_empty()
            || !attr(element, "aria-labelledby").is_empty()
            || !text_content(element).is_empty();

        if named {
            outcome.pass(PassedCheck::new(
                "aria_has_label",
                format!("Element with role=\"{}\" has accessible name", role),
            ));
        } else {
            outcome.issue(
                Issue::error(
                    "aria_missing_label",
                    format!("Element with role=\"{}\" missing accessible name", role),
                )
                .with_element(format!(
                    "<{} role=\"{}\">",
                    element.value().name(),
                    escape(role)
                ))
                .with_recommendation("Add aria-label or aria-labelledby attribute"),
            );
        }
    }

    outcome
}

pub(crate) fn check_iframes(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for iframe in doc.select("iframe") {
        let title = attr(iframe, "title");
        let aria_label = attr(iframe, "aria-label");

        if title.is_empty() && aria_label.is_empty() {
            outcome.issue(
                Issue::error("iframe_no_title", "Iframe missing title attribute")
                    .with_element(format!(
                        "<iframe src=\"{}\">",
                        escape(&truncate(attr(iframe, "src"), 50))
                    ))
                    .with_recommendation("Add title attribute describing iframe content"),
            );
        } else {
            let name = if title.is_empty() { aria_label } else { title };
            outcome.pass(
                PassedCheck::new("iframe_has_title", "Iframe has accessible title")
                    .with_element(format!("<iframe title=\"{}\">", escape(name))),
            );
        }
    }

    outcome
}
