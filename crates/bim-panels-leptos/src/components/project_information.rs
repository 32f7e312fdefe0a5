//! Project information panel: loaded models, spatial structure and entity
//! classification

use super::highlight::{hover_row, leave_row, select_row};
use super::ClassificationTree;
use crate::debounce::debounced_query;
use crate::rows::{classification_rows, relations_row_map, relations_rows, RelationsRow, HOVER_BACKGROUND};
use crate::state::use_panels_state;
use leptos::prelude::*;

/// Project information panel component
#[component]
pub fn ProjectInformationPanel() -> impl IntoView {
    let state = use_panels_state();
    let config = state.config();

    let relations = Memo::new(move |_| {
        let query = state.trees.relations_query.get();
        let expand_all = state.trees.relations_expanded.get();
        let expanded = state.trees.expanded_nodes.get();
        state
            .models
            .trees
            .with(|trees| relations_rows(trees, &query, expand_all, &expanded))
    });

    let systems = config.entity_systems.clone();
    let entity_rows = Memo::new(move |_| {
        state.models.classifications_version.track();
        let query = state.trees.entity_query.get();
        state
            .classifier
            .with_value(|classifier| classification_rows(classifier.list(), &systems, &query))
    });

    let on_relations_search = debounced_query(config.search_debounce_ms, state.trees.relations_query);
    let on_entity_search = debounced_query(config.search_debounce_ms, state.trees.entity_query);

    view! {
        <div class="panel project-information-panel">
            <section class="panel-section">
                <h3 class="panel-section-title">"Loaded Models"</h3>
                <ModelsList />
            </section>

            <section class="panel-section">
                <h3 class="panel-section-title">"Spatial Structures"</h3>
                <div style="display: flex; gap: 0.375rem;">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search..."
                        on:input=on_relations_search
                    />
                    <button
                        class="tree-control-btn"
                        style="flex: 0;"
                        on:click=move |_| state.trees.toggle_relations_expanded()
                        title=move || {
                            if state.trees.relations_expanded.get() { "Collapse all" } else { "Expand all" }
                        }
                    >
                        {move || if state.trees.relations_expanded.get() { "⊟" } else { "⊞" }}
                    </button>
                </div>
                <div class="relations-tree">
                    <For
                        each=move || relations.get()
                        key=|row| (row.group_uuid.clone(), row.id, row.depth, row.expanded)
                        children=move |row| view! { <RelationsTreeRow row=row /> }
                    />
                </div>
            </section>

            <section class="panel-section">
                <h3 class="panel-section-title">"Entity Classification"</h3>
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search..."
                    on:input=on_entity_search
                />
                <ClassificationTree rows=entity_rows />
            </section>
        </div>
    }
}

/// Loaded models with a remove action
#[component]
fn ModelsList() -> impl IntoView {
    let state = use_panels_state();

    view! {
        <div class="models-list">
            {move || {
                if state.models.groups.with(|groups| groups.is_empty()) {
                    Some(view! { <div class="tree-empty">"No models loaded"</div> })
                } else {
                    None
                }
            }}
            <For
                each=move || state.models.groups.get()
                key=|group| group.uuid.clone()
                children=move |group| {
                    let uuid = group.uuid.clone();
                    view! {
                        <div class="model-row">
                            <span class="model-name">{group.name.clone()}</span>
                            <span class="tree-count">{group.items.len()}</span>
                            <button
                                class="model-remove"
                                title="Remove model"
                                on:click=move |_| state.remove_model(&uuid)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
fn RelationsTreeRow(row: RelationsRow) -> impl IntoView {
    let state = use_panels_state();
    let map = state.models.groups.with_untracked(|groups| {
        state
            .models
            .trees
            .with_untracked(|trees| relations_row_map(groups, trees, &row.group_uuid, row.id))
    });
    let hovered = RwSignal::new(false);
    let padding = format!("padding-left: {}px;", 8 + row.depth * 16);
    let group_uuid = row.group_uuid.clone();
    let id = row.id;

    let toggle = if row.has_children {
        Some(view! {
            <span
                class="tree-toggle"
                on:click=move |ev| {
                    ev.stop_propagation();
                    state.trees.toggle_node(&group_uuid, id);
                }
            >
                {if row.expanded { "▼" } else { "▶" }}
            </span>
        })
    } else {
        None
    };

    let hover_map = map.clone();
    let select_map = map.clone();
    let interactive = map.is_some();

    view! {
        <div
            class=if row.has_children { "tree-row" } else { "tree-row leaf" }
            style=move || {
                if hovered.get() {
                    format!("{} background-color: {};", padding, HOVER_BACKGROUND)
                } else {
                    padding.clone()
                }
            }
            on:mouseover=move |_| {
                if let Some(map) = &hover_map {
                    hovered.set(true);
                    hover_row(state, map);
                }
            }
            on:mouseout=move |_| {
                if interactive {
                    hovered.set(false);
                    leave_row(state);
                }
            }
            on:click=move |_| {
                if let Some(map) = &select_map {
                    select_row(state, map);
                }
            }
        >
            {toggle}
            <span class="tree-icon">{row.node_type.icon()}</span>
            <span class="tree-name" title=row.entity_type.clone()>{row.name.clone()}</span>
        </div>
    }
}
