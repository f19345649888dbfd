//! Form and feedback components used around the reorderable lists.

pub mod collapsible;
pub mod modal;
pub mod repeater;
pub mod tags;
pub mod toast;
pub mod upload;

pub use collapsible::{CollapsibleState, SidebarState};
pub use modal::{AppEvent, ModalLayer, ModalManager};
pub use repeater::{RepeaterButton, ValueRepeater};
pub use tags::TagEditor;
pub use toast::{Toast, ToastLevel, ToastStack};
pub use upload::{UploadPhase, UploadProgress};
