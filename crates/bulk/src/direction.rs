use mealplanner_shared::Entity;

use crate::BulkAction;

/// Unapprove only when every selected entity is already approved; a single
/// unapproved entity makes the batch an approve. `None` for an empty
/// selection.
pub fn infer_direction<'a, E: Entity>(
    selected: impl IntoIterator<Item = &'a E>,
) -> Option<BulkAction> {
    let mut selected = selected.into_iter().peekable();
    selected.peek()?;

    if selected.all(|entity| entity.is_approved()) {
        Some(BulkAction::Unapprove)
    } else {
        Some(BulkAction::Approve)
    }
}
