pub mod api_utils;
pub mod components;
pub mod format;
pub mod icons;
pub mod loader;
pub mod page_frame;
pub mod toast;
