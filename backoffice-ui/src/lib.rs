//! Components for the bibliography backoffice list views.
//!
//! The centrepiece is [`DraggableTable`], which turns a table in a
//! [`tabledom::Document`] into a mouse-reorderable list and reports each
//! completed move to an [`OrderNotifier`]. The `widgets` module holds the
//! smaller form and feedback components that sit around it.

pub mod binding;
pub mod drag;
pub mod error;
pub mod notify;
pub mod settings;
pub mod template;
pub mod widgets;

pub use binding::AttributeBindings;
pub use drag::{CloneList, DragPhase, DraggableTable, Reorder};
pub use error::{NotifyError, TagError, TemplateError, UploadError};
pub use notify::{HttpMethod, HttpNotifier, NotifyOutcome, OrderChange, OrderNotifier};
pub use settings::{
    JsonFileBackend, MemoryBackend, SettingsBackend, SettingsError, SettingsProvider,
};
pub use template::{CallbackTemplate, Template};
pub use widgets::{
    CollapsibleState, ModalManager, SidebarState, TagEditor, Toast, ToastLevel, ToastStack,
    UploadProgress, ValueRepeater,
};
