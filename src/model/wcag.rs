//! WCAG 2.1 success criteria reference table
//!
//! The catalog is static configuration: compliance aggregation only tracks
//! criterion ids that appear here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Conformance level of a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    A,
    AA,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::AA => f.write_str("AA"),
        }
    }
}

/// One numbered WCAG success criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criterion {
    pub id: &'static str,
    pub name: &'static str,
    pub level: Level,
    pub principle: &'static str,
    pub description: &'static str,
}

const fn criterion(
    id: &'static str,
    name: &'static str,
    level: Level,
    principle: &'static str,
    description: &'static str,
) -> Criterion {
    Criterion {
        id,
        name,
        level,
        principle,
        description,
    }
}

const PERCEIVABLE: &str = "Perceivable";
const OPERABLE: &str = "Operable";
const UNDERSTANDABLE: &str = "Understandable";
const ROBUST: &str = "Robust";

const STANDARD_CRITERIA: &[Criterion] = &[
    criterion("1.1.1", "Non-text Content", Level::A, PERCEIVABLE, "All non-text content has a text alternative."),
    criterion("1.2.1", "Audio-only and Video-only", Level::A, PERCEIVABLE, "Alternatives provided for audio-only and video-only content."),
    criterion("1.2.2", "Captions", Level::A, PERCEIVABLE, "Captions are provided for all prerecorded audio content."),
    criterion("1.3.1", "Info and Relationships", Level::A, PERCEIVABLE, "Information and relationships conveyed through presentation can be programmatically determined."),
    criterion("1.3.2", "Meaningful Sequence", Level::A, PERCEIVABLE, "Content is presented in a meaningful sequence."),
    criterion("1.3.3", "Sensory Characteristics", Level::A, PERCEIVABLE, "Instructions do not rely solely on sensory characteristics."),
    criterion("1.4.1", "Use of Color", Level::A, PERCEIVABLE, "Color is not the only visual means of conveying information."),
    criterion("1.4.2", "Audio Control", Level::A, PERCEIVABLE, "Audio that plays automatically can be paused or stopped."),
    criterion("1.4.3", "Contrast (Minimum)", Level::AA, PERCEIVABLE, "Text has a contrast ratio of at least 4.5:1."),
    criterion("1.4.4", "Resize Text", Level::AA, PERCEIVABLE, "Text can be resized up to 200% without loss of content."),
    criterion("1.4.5", "Images of Text", Level::AA, PERCEIVABLE, "Text is used instead of images of text where possible."),
    criterion("2.1.1", "Keyboard", Level::A, OPERABLE, "All functionality is operable through keyboard."),
    criterion("2.1.2", "No Keyboard Trap", Level::A, OPERABLE, "Keyboard focus can be moved away from any component."),
    criterion("2.2.1", "Timing Adjustable", Level::A, OPERABLE, "Time limits can be adjusted, extended, or turned off."),
    criterion("2.2.2", "Pause, Stop, Hide", Level::A, OPERABLE, "Moving, blinking content can be paused, stopped, or hidden."),
    criterion("2.3.1", "Three Flashes", Level::A, OPERABLE, "Nothing flashes more than three times per second."),
    criterion("2.4.1", "Bypass Blocks", Level::A, OPERABLE, "A mechanism is available to bypass repeated content."),
    criterion("2.4.2", "Page Titled", Level::A, OPERABLE, "Web pages have titles that describe topic or purpose."),
    criterion("2.4.3", "Focus Order", Level::A, OPERABLE, "Components receive focus in a meaningful sequence."),
    criterion("2.4.4", "Link Purpose (In Context)", Level::A, OPERABLE, "Purpose of links can be determined from link text or context."),
    criterion("2.4.5", "Multiple Ways", Level::AA, OPERABLE, "Multiple ways to locate a web page are available."),
    criterion("2.4.6", "Headings and Labels", Level::AA, OPERABLE, "Headings and labels describe topic or purpose."),
    criterion("2.4.7", "Focus Visible", Level::AA, OPERABLE, "Keyboard focus indicator is visible."),
    criterion("3.1.1", "Language of Page", Level::A, UNDERSTANDABLE, "Default language of page is programmatically determined."),
    criterion("3.1.2", "Language of Parts", Level::AA, UNDERSTANDABLE, "Language of content passages is programmatically determined."),
    criterion("3.2.1", "On Focus", Level::A, UNDERSTANDABLE, "Receiving focus does not trigger a change of context."),
    criterion("3.2.2", "On Input", Level::A, UNDERSTANDABLE, "Changing a setting does not automatically cause a change of context."),
    criterion("3.2.3", "Consistent Navigation", Level::AA, UNDERSTANDABLE, "Navigation is consistent across pages."),
    criterion("3.2.4", "Consistent Identification", Level::AA, UNDERSTANDABLE, "Components with same functionality are identified consistently."),
    criterion("3.3.1", "Error Identification", Level::A, UNDERSTANDABLE, "Input errors are automatically identified and described."),
    criterion("3.3.2", "Labels or Instructions", Level::A, UNDERSTANDABLE, "Labels or instructions are provided for user input."),
    criterion("3.3.3", "Error Suggestion", Level::AA, UNDERSTANDABLE, "Suggestions are provided when errors are detected."),
    criterion("3.3.4", "Error Prevention", Level::AA, UNDERSTANDABLE, "Submissions can be reviewed, confirmed, or reversed."),
    criterion("4.1.1", "Parsing", Level::A, ROBUST, "Content can be reliably interpreted by user agents."),
    criterion("4.1.2", "Name, Role, Value", Level::A, ROBUST, "UI components have accessible names and roles."),
];

/// Lookup table from criterion id to its reference entry
#[derive(Debug, Clone)]
pub struct WcagCatalog {
    criteria: BTreeMap<&'static str, Criterion>,
}

impl WcagCatalog {
    /// Builds the standard WCAG 2.1 A/AA catalog
    pub fn standard() -> Self {
        Self::from_criteria(STANDARD_CRITERIA)
    }

    pub fn from_criteria(criteria: &[Criterion]) -> Self {
        Self {
            criteria: criteria.iter().map(|c| (c.id, *c)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Criterion> {
        self.criteria.get(id)
    }

    pub fn level_of(&self, id: &str) -> Option<Level> {
        self.get(id).map(|c| c.level)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.criteria.contains_key(id)
    }

    /// Criteria in id order
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.values()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl Default for WcagCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
