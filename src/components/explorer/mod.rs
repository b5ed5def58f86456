//! File explorer UI components.
//!
//! Components:
//! - [`Explorer`] - Main explorer layout and window-level listeners
//! - [`Sidebar`] - Create/upload actions, views, storage meter
//! - [`Header`] - Search box and account
//! - [`PathBar`] - Breadcrumbs of the hierarchical view
//! - [`FileGrid`] - Folders and files of the current listing
//! - [`DetailsPanel`] - Selected entry and its actions
//! - [`ContextMenu`] - Right-click actions
//! - [`NewFolderDialog`] - Folder name prompt
//! - [`Carousel`] - Full-screen image preview
//! - [`AuthImage`] - `<img>` for content behind bearer auth

mod auth_image;
mod carousel;
mod context_menu;
mod details;
#[allow(clippy::module_inception)]
mod explorer;
mod file_grid;
mod header;
mod new_folder;
mod pathbar;
mod sidebar;

pub use auth_image::AuthImage;
pub use carousel::Carousel;
pub use context_menu::ContextMenu;
pub use details::DetailsPanel;
pub use explorer::Explorer;
pub use file_grid::FileGrid;
pub use header::Header;
pub use new_folder::NewFolderDialog;
pub use pathbar::PathBar;
pub use sidebar::Sidebar;
