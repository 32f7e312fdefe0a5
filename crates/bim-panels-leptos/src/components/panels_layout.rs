//! Panels layout: toolbar on top, panels side by side

use super::{ClassificationPanel, ImportExportSection, ProjectInformationPanel};
use leptos::prelude::*;

#[component]
pub fn PanelsLayout() -> impl IntoView {
    view! {
        <div class="panels-layout">
            <div class="toolbar">
                <ImportExportSection />
            </div>
            <div class="panels">
                <ProjectInformationPanel />
                <ClassificationPanel />
            </div>
        </div>
    }
}
