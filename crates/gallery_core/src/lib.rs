//! Gallery controller core: state, sort/filter/paging, backend client and
//! per-item actions.

pub mod actions;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod pagination;
pub mod reducer;
pub mod state;
pub mod view;

pub use actions::{suggested_file_name, HostPlatform, ItemAction};
pub use client::{DeleteResponse, GalleryApi, HttpGalleryClient};
pub use config::{ConfigError, GallerySettings};
pub use controller::GalleryController;
pub use error::{GalleryError, GalleryResult};
pub use pagination::{PageNav, PageView, Paginator};
pub use reducer::{reduce, GalleryAction};
pub use state::{ActiveSort, GalleryState, LoadPhase};
