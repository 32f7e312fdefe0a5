//! UI components for the viewer panels

mod classification_panel;
mod classification_tree;
mod highlight;
mod import_export;
mod panels_layout;
mod project_information;

pub use classification_panel::ClassificationPanel;
pub use classification_tree::ClassificationTree;
pub use import_export::ImportExportSection;
pub use panels_layout::PanelsLayout;
pub use project_information::ProjectInformationPanel;
