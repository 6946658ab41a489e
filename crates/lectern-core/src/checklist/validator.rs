//! Structural validation of parsed checklists.
//!
//! A pure, synchronous predicate over the typed item sequence. Checks run in
//! a fixed order and stop at the first violation; the violation's `Display`
//! text is what the revision loop feeds back to the generation oracle as
//! corrective feedback. Tag membership needs no check here: `Tag` is a closed
//! enum, so an invalid tag can never reach this point.

use thiserror::Error;
use tracing::debug;

use super::{ChecklistItem, MAX_ITEMS, Tag};

/// First structural violation found in a checklist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecklistViolation {
    /// Nothing parsed, or an empty sequence was constructed.
    #[error("no checklist items could be parsed from the response")]
    Empty,

    /// An item's effort rating is outside [1, 5].
    #[error("item {number} has an effort rating of {effort}, expected 1-5 stars")]
    EffortOutOfRange {
        /// Offending item number.
        number: u32,
        /// The out-of-range rating.
        effort: u8,
    },

    /// The checklist exceeds the hard item cap.
    #[error("checklist has {count} items, the maximum is {MAX_ITEMS}")]
    TooManyItems {
        /// Actual item count.
        count: usize,
    },

    /// No item is tagged `Practice`.
    #[error("checklist must include at least one Practice item")]
    NoPracticeItem,

    /// No item carries a reflection prompt.
    #[error("checklist must include at least one reflection prompt")]
    NoReflectionPrompt,

    /// Item numbers are not contiguous from 1.
    #[error("item numbering breaks at {found}, expected {expected}")]
    BrokenNumbering {
        /// The number that should have appeared.
        expected: u32,
        /// The number that did appear.
        found: u32,
    },
}

/// Validates a checklist against the structural invariants.
///
/// Never mutates its input and never consults an oracle.
///
/// # Errors
/// Returns the first [`ChecklistViolation`] encountered, in check order:
/// non-empty, effort range, item cap, Practice presence, prompt presence,
/// contiguous numbering.
pub fn validate(items: &[ChecklistItem]) -> Result<(), ChecklistViolation> {
    if items.is_empty() {
        return Err(ChecklistViolation::Empty);
    }

    for item in items {
        if !(1..=5).contains(&item.effort) {
            return Err(ChecklistViolation::EffortOutOfRange {
                number: item.number,
                effort: item.effort,
            });
        }
    }

    if items.len() > MAX_ITEMS {
        return Err(ChecklistViolation::TooManyItems { count: items.len() });
    }

    if !items.iter().any(|item| item.tag == Tag::Practice) {
        return Err(ChecklistViolation::NoPracticeItem);
    }

    if !items.iter().any(|item| item.prompt.as_deref().is_some_and(|p| !p.trim().is_empty())) {
        return Err(ChecklistViolation::NoReflectionPrompt);
    }

    for (position, item) in items.iter().enumerate() {
        let expected = position as u32 + 1;
        if item.number != expected {
            return Err(ChecklistViolation::BrokenNumbering { expected, found: item.number });
        }
    }

    debug!(items = items.len(), "checklist passed structural validation");
    Ok(())
}
