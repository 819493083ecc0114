//! Single-step undo over the tail of the plan model
//!
//! There is no redo and no command stack: commit order is the history.

use crate::domain::Element;

use super::state::PlanModel;

/// Remove the most recently committed element, whatever its kind
///
/// Returns the removed element, or `None` when the plan is already empty.
pub fn undo(model: &mut PlanModel) -> Option<Element> {
    let removed = model.remove_last();
    match &removed {
        Some(element) => log::debug!(
            "Undo removed {} {} ({} elements left)",
            element.kind_name(),
            element.id(),
            model.len()
        ),
        None => log::trace!("Undo on empty plan"),
    }
    removed
}
