mod page;
mod status_bar;
pub mod overlay;

pub use overlay::{DrawerWidget, LightboxWidget};
pub use page::PageWidget;
pub use status_bar::StatusBarWidget;
