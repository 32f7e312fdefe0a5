//! BIM-Panels Leptos UI Components
//!
//! Leptos panels for a fragments-based BIM viewer: the import/export toolbar
//! section, the project information panel and the classification panel.
//! Geometry decoding and IFC conversion come from the host through
//! [`FragmentsCodec`] and [`IfcLoader`].

pub mod bridge;
pub mod components;
pub mod debounce;
pub mod rows;
pub mod state;

pub use components::{
    ClassificationPanel, ClassificationTree, ImportExportSection, PanelsLayout,
    ProjectInformationPanel,
};
pub use state::{provide_panels_state, use_panels_state, ModelTree, PanelsHooks, PanelsState};

use bim_panels_model::{FragmentsCodec, IfcLoader, PanelsConfig};
use leptos::prelude::*;

/// Route `log` records and panics to the browser console
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        bridge::log_warn("Logger already initialized");
    }
}

/// Mount the panels into the document body
///
/// `hooks` carries the host's highlight and colour listeners; the panels
/// never draw the model themselves.
pub fn mount_panels(
    codec: impl FragmentsCodec + 'static,
    ifc_loader: Option<Box<dyn IfcLoader>>,
    config: PanelsConfig,
    hooks: PanelsHooks,
) {
    init_logging(log::Level::Info);
    log::info!("Mounting BIM panels");

    mount_to_body(move || {
        provide_panels_state(PanelsState::new(codec, ifc_loader, config, hooks));
        view! { <PanelsLayout /> }
    });
}
