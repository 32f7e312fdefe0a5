//! Searchable classification tree

use super::highlight::{hover_row, leave_row, select_row};
use crate::rows::{ClassificationRow, HOVER_BACKGROUND};
use crate::state::use_panels_state;
use leptos::prelude::*;

/// Tree of classification rows; only rows with a non-empty map react to
/// the mouse
#[component]
pub fn ClassificationTree(#[prop(into)] rows: Signal<Vec<ClassificationRow>>) -> impl IntoView {
    view! {
        <div class="classification-tree">
            {move || {
                if rows.with(|rows| rows.is_empty()) {
                    Some(view! { <div class="tree-empty">"No classifications"</div> })
                } else {
                    None
                }
            }}
            <For
                each=move || rows.get()
                key=|row| (row.system.clone(), row.name.clone(), row.depth, row.count)
                children=move |row| view! { <ClassificationTreeRow row=row /> }
            />
        </div>
    }
}

#[component]
fn ClassificationTreeRow(row: ClassificationRow) -> impl IntoView {
    let state = use_panels_state();
    let class = if row.depth == 0 { "tree-row system" } else { "tree-row" };
    let padding = format!("padding-left: {}px;", 8 + row.depth * 16);
    let label = row.name.clone();
    let count = row.count;

    let Some(map) = row.map else {
        return view! {
            <div class=class style=padding>
                <span class="tree-name">{label}</span>
                <span class="tree-count">{count}</span>
            </div>
        }
        .into_any();
    };

    let hovered = RwSignal::new(false);
    let hover_map = map.clone();
    let select_map = map;

    view! {
        <div
            class=class
            style=move || {
                if hovered.get() {
                    format!("{} background-color: {};", padding, HOVER_BACKGROUND)
                } else {
                    padding.clone()
                }
            }
            on:mouseover=move |_| {
                hovered.set(true);
                hover_row(state, &hover_map);
            }
            on:mouseout=move |_| {
                hovered.set(false);
                leave_row(state);
            }
            on:click=move |_| select_row(state, &select_map)
        >
            <span class="tree-name">{label}</span>
            <span class="tree-count">{count}</span>
        </div>
    }
    .into_any()
}
