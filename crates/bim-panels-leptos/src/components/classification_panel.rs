//! Classification panel: walls colour indication and the classification tree

use super::ClassificationTree;
use crate::debounce::debounced_query;
use crate::rows::classification_rows;
use crate::state::use_panels_state;
use bim_panels_model::Color;
use leptos::prelude::*;

/// Classification panel component
#[component]
pub fn ClassificationPanel() -> impl IntoView {
    let state = use_panels_state();
    let config = state.config();
    let walls = state.walls;

    let systems = config.classification_systems.clone();
    let rows = Memo::new(move |_| {
        state.models.classifications_version.track();
        let query = state.trees.classification_query.get();
        state
            .classifier
            .with_value(|classifier| classification_rows(classifier.list(), &systems, &query))
    });

    let on_color = move |ev: leptos::ev::Event| {
        let hex = event_target_value(&ev);
        let color = match Color::from_hex(&hex) {
            Ok(color) => color,
            Err(e) => {
                log::warn!("Ignoring walls colour '{}': {}", hex, e);
                return;
            }
        };
        walls.with_value(|walls| {
            if let Some(walls) = walls {
                state
                    .classifier
                    .update_value(|classifier| classifier.set_color(walls, color));
            }
        });
    };

    let reset_color = move |_| {
        walls.with_value(|walls| {
            if let Some(walls) = walls {
                state
                    .classifier
                    .update_value(|classifier| classifier.reset_color(walls));
            }
        });
    };

    let on_search = debounced_query(config.search_debounce_ms, state.trees.classification_query);

    view! {
        <div class="panel classification-panel">
            <section class="panel-section">
                <h3 class="panel-section-title">"Classification"</h3>

                <details class="panel-section">
                    <summary>"Color Indication"</summary>
                    <label class="color-input">
                        <span>"Walls Color"</span>
                        <input type="color" value=config.walls_color().to_hex() on:input=on_color />
                    </label>
                    <button
                        class="panel-btn"
                        on:click=reset_color
                        title="Resets the color of the walls to their default state."
                    >
                        "Reset Color"
                    </button>
                </details>

                <details class="panel-section">
                    <summary>"Classifications"</summary>
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search..."
                        on:input=on_search
                    />
                    <ClassificationTree rows=rows />
                </details>
            </section>
        </div>
    }
}
