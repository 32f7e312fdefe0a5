//! Row hover and click highlighting shared by the panel trees

use leptos::prelude::UpdateValue;
use crate::state::PanelsState;
use bim_panels_model::FragmentIdMap;

/// Hover: replace the hover selection, minus whatever is selected
pub(crate) fn hover_row(state: PanelsState, map: &FragmentIdMap) {
    let config = state.config();
    state.highlighter.update_value(|highlighter| {
        let selected = highlighter
            .selection(&config.select_highlighter)
            .cloned()
            .unwrap_or_default();
        highlighter.highlight_by_id(&config.hover_highlighter, map, true, false, Some(&selected));
    });
}

/// Mouse out: drop the hover selection
pub(crate) fn leave_row(state: PanelsState) {
    let config = state.config();
    state
        .highlighter
        .update_value(|highlighter| highlighter.clear(&config.hover_highlighter));
}

/// Click: select and zoom
pub(crate) fn select_row(state: PanelsState, map: &FragmentIdMap) {
    let config = state.config();
    state.highlighter.update_value(|highlighter| {
        highlighter.highlight_by_id(&config.select_highlighter, map, true, true, None);
    });
}
