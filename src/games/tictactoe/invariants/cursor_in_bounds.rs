//! Cursor always selects an existing snapshot.

use super::super::HistoryView;
use super::Invariant;

/// Invariant: `cursor < history.len()`.
pub struct CursorInBoundsInvariant;

impl Invariant<HistoryView<'_>> for CursorInBoundsInvariant {
    fn holds(view: &HistoryView<'_>) -> bool {
        view.current_board().is_some()
    }

    fn description() -> &'static str {
        "Cursor points inside the history"
    }
}
