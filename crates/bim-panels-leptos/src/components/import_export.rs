//! Import/Export toolbar section

use crate::bridge;
use crate::state::{use_panels_state, PanelsState};
use bim_panels_archive::{export_csv, export_fragments, import_fragments, ArchiveError};
use bim_panels_components::IfcRelationsIndexer;
use bim_panels_model::FragmentsLoader;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

/// Import/Export toolbar section component
#[component]
pub fn ImportExportSection() -> impl IntoView {
    let state = use_panels_state();
    let ifc_input_ref = NodeRef::<leptos::html::Input>::new();
    let zip_input_ref = NodeRef::<leptos::html::Input>::new();

    let on_ifc_change = move |ev: leptos::ev::Event| {
        if let Some(file) = take_selected_file(&ev) {
            read_then(file, move |name, bytes| load_ifc(state, &name, &bytes));
        }
    };

    let on_zip_change = move |ev: leptos::ev::Event| {
        if let Some(file) = take_selected_file(&ev) {
            read_then(file, move |name, bytes| load_fragments(state, &name, &bytes));
        }
    };

    view! {
        <div class="toolbar-section">
            <span class="toolbar-section-label">"Import/Export"</span>
            <div class="toolbar-group">
                <input
                    node_ref=ifc_input_ref
                    type="file"
                    accept=".ifc"
                    style="display: none"
                    on:change=on_ifc_change
                />
                <input
                    node_ref=zip_input_ref
                    type="file"
                    accept=".zip"
                    style="display: none"
                    on:change=on_zip_change
                />
                <button
                    class="tool-btn"
                    on:click=move |_| {
                        if let Some(input) = ifc_input_ref.get() {
                            input.click();
                        }
                    }
                    title="Load IFC: Loads an IFC file into the scene. The IFC gets automatically converted to Fragments."
                >
                    "IFC"
                </button>
                <button
                    class="tool-btn"
                    on:click=move |_| {
                        if let Some(input) = zip_input_ref.get() {
                            input.click();
                        }
                    }
                    title="Load Fragments: Loads a pre-converted IFC from a Fragments file. Use this option if you want to avoid the conversion from IFC to Fragments."
                >
                    "Fragments"
                </button>
                <button
                    class="tool-btn"
                    on:click=move |_| export_geometry(state)
                    title="Export Fragments: Export uploaded IFC files to Fragments, for faster future upload"
                >
                    "Export fragments"
                </button>
                <button
                    class="tool-btn"
                    on:click=move |_| export_properties(state)
                    title="Export Properties to CSV: Exports all properties of the loaded IFC file to a CSV format."
                >
                    "Export to CSV"
                </button>
            </div>
        </div>
    }
}

/// First selected file; clears the input so the same file can be picked again
fn take_selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    let input: web_sys::HtmlInputElement = ev.target()?.unchecked_into();
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

/// Read a file's bytes, then hand them on
fn read_then(file: web_sys::File, then: impl FnOnce(String, Vec<u8>) + 'static) {
    let name = file.name();
    bridge::log(&format!("Loading file: {}", name));
    let gloo_file = gloo_file::File::from(file);

    spawn_local(async move {
        match gloo_file::futures::read_as_bytes(&gloo_file).await {
            Ok(bytes) => {
                log::debug!("File read: {} bytes", bytes.len());
                then(name, bytes);
            }
            Err(e) => {
                log::error!("Failed to read {}: {:?}", name, e);
                bridge::log_error(&format!("Failed to read file: {:?}", e));
            }
        }
    });
}

fn load_fragments(state: PanelsState, name: &str, bytes: &[u8]) {
    // Load listeners register relations with the shared indexer, so the
    // archive only needs a detached one for decoding
    let decoder = IfcRelationsIndexer::new();
    let result = state
        .fragments
        .try_update_value(|manager| import_fragments(bytes, manager, &decoder, Some(name)));

    match result {
        Some(Ok(group)) => bridge::log_info(&format!(
            "Loaded {} ({} fragments)",
            group.name,
            group.items.len()
        )),
        Some(Err(ArchiveError::MissingGeometry)) => {
            bridge::alert(&ArchiveError::MissingGeometry.to_string());
        }
        Some(Err(e)) => {
            log::error!("Failed to import {}: {}", name, e);
            bridge::log_error(&format!("Failed to import fragments: {}", e));
        }
        None => log::warn!("Panels state disposed before {} finished loading", name),
    }
}

fn load_ifc(state: PanelsState, name: &str, bytes: &[u8]) {
    let converted = state
        .ifc_loader
        .with_value(|loader| loader.as_ref().map(|loader| loader.convert(bytes, name)));

    let converted = match converted {
        Some(Ok(converted)) => converted,
        Some(Err(e)) => {
            log::error!("Failed to convert {}: {}", name, e);
            bridge::log_error(&format!("Failed to process IFC: {}", e));
            return;
        }
        None => {
            bridge::log_error("No IFC converter configured");
            return;
        }
    };

    let data = converted.data.with_name(name);
    let result = state
        .fragments
        .try_update_value(|manager| manager.load(converted.geometry, data));
    match result {
        Some(Ok(group)) => bridge::log_info(&format!("IFC file loaded: {}", group.name)),
        Some(Err(e)) => bridge::log_error(&format!("Failed to load converted IFC: {}", e)),
        None => log::warn!("Panels state disposed before {} finished loading", name),
    }
}

fn export_geometry(state: PanelsState) {
    match state.fragments.with_value(|manager| export_fragments(manager)) {
        Ok(files) => bridge::download_all(&files),
        Err(e) => {
            log::error!("Fragments export failed: {}", e);
            bridge::log_error(&format!("Failed to export fragments: {}", e));
        }
    }
}

fn export_properties(state: PanelsState) {
    if let Some(file) = state.fragments.with_value(|manager| export_csv(manager)) {
        bridge::download_all(&[file]);
    }
}
