//! Checks over non-text content: images, color and media

use crate::model::{CheckOutcome, Issue, PassedCheck};
use crate::rules::dom::{attr, escape, select_in, truncate};
use crate::rules::PageDocument;
use regex::Regex;
use std::sync::LazyLock;

/// Alt text longer than this is flagged as too long
const MAX_ALT_LENGTH: usize = 125;

static FILENAME_ALT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg)$").expect("hardcoded regex pattern is valid")
});

// `color` only as a standalone property, never the tail of `background-color`
static INLINE_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[;\s])color\s*:\s*([^;]+)").expect("hardcoded regex pattern is valid")
});

static INLINE_BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)background(?:-color)?\s*:\s*([^;]+)").expect("hardcoded regex pattern is valid")
});

/// First capture group, trimmed and lowercased
fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)?
        .get(1)
        .map(|m| m.as_str().trim().to_lowercase())
}

/// Images need non-empty, concise, non-filename alt text unless decorative
pub(crate) fn check_images_alt(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for img in doc.select("img") {
        let src = attr(img, "src");
        let role = attr(img, "role");

        if role == "presentation" || role == "none" {
            outcome.pass(
                PassedCheck::new("image_decorative", "Decorative image correctly marked")
                    .with_element(format!("<img src=\"{}\">", escape(src))),
            );
            continue;
        }

        let alt = attr(img, "alt");
        if alt.is_empty() {
            outcome.issue(
                Issue::error("image_missing_alt", "Image missing alternative text")
                    .with_element(format!("<img src=\"{}\">", escape(src)))
                    .with_recommendation(
                        "Add descriptive alt text or mark as decorative with alt=\"\"",
                    ),
            );
        } else if alt.chars().count() > MAX_ALT_LENGTH {
            outcome.issue(
                Issue::warning(
                    "image_alt_too_long",
                    "Alt text is too long (over 125 characters)",
                )
                .with_element(format!("<img alt=\"{}...\">", escape(&truncate(alt, 50))))
                .with_recommendation(
                    "Keep alt text concise. Consider using longdesc for detailed descriptions.",
                ),
            );
        } else if FILENAME_ALT.is_match(alt) {
            outcome.issue(
                Issue::error("image_alt_filename", "Alt text appears to be a filename")
                    .with_element(format!("<img alt=\"{}\">", escape(alt)))
                    .with_recommendation("Replace filename with descriptive text"),
            );
        } else {
            outcome.pass(
                PassedCheck::new("image_has_alt", "Image has appropriate alt text")
                    .with_element(format!("<img alt=\"{}\">", escape(&truncate(alt, 50)))),
            );
        }
    }

    outcome
}

/// Flags inline styles whose text color literally equals the background
///
/// Real contrast needs computed styles, so a manual-verification note is
/// always recorded as a pass.
pub(crate) fn check_color_contrast(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for element in doc.select("[style]") {
        let style = attr(element, "style");
        let (Some(color), Some(background)) = (
            capture(&INLINE_COLOR, style),
            capture(&INLINE_BACKGROUND, style),
        ) else {
            continue;
        };

        if color == background {
            outcome.issue(
                Issue::error("contrast_same_color", "Text color same as background")
                    .with_element(format!("<{} style=\"...\">", element.value().name()))
                    .with_recommendation("Ensure text has sufficient contrast with background"),
            );
        }
    }

    outcome.pass(PassedCheck::new(
        "contrast_note",
        "Manual contrast verification recommended",
    ));
    outcome
}

/// Videos need a captions or subtitles track; audio always gets a transcript notice
pub(crate) fn check_media(doc: &PageDocument) -> CheckOutcome {
    let mut outcome = CheckOutcome::new();

    for video in doc.select("video") {
        let captioned = select_in(video, "track")
            .into_iter()
            .any(|t| matches!(attr(t, "kind"), "captions" | "subtitles"));

        if captioned {
            outcome.pass(
                PassedCheck::new("video_has_captions", "Video has captions/subtitles track")
                    .with_element("<video>"),
            );
        } else {
            outcome.issue(
                Issue::error("video_no_captions", "Video missing captions/subtitles track")
                    .with_element("<video>")
                    .with_recommendation("Add <track kind=\"captions\"> for caption support"),
            );
        }
    }

    for _ in doc.select("audio") {
        outcome.issue(
            Issue::notice(
                "audio_transcript",
                "Audio element found - verify transcript is available",
            )
            .with_element("<audio>")
            .with_recommendation("Provide a text transcript for audio content"),
        );
    }

    outcome
}
