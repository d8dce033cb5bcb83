//! Custom widget components

mod assets_tab;
mod confirm_dialog;
mod form_modal;
mod header;
mod library_tab;
mod methodology_modal;
pub mod modal_overlay;
mod queue_tab;
mod scenario_picker;
mod status_bar;
mod toasts;
mod topology_tab;

pub use assets_tab::AssetsTab;
pub use confirm_dialog::ConfirmDialog;
pub use form_modal::FormModal;
pub use header::Header;
pub use library_tab::LibraryTab;
pub use methodology_modal::MethodologyModal;
pub use queue_tab::QueueTab;
pub use scenario_picker::ScenarioPicker;
pub use status_bar::StatusBar;
pub use toasts::Toasts;
pub use topology_tab::TopologyTab;
