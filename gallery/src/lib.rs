//! Photo state, filtering and favorites for the gallery front ends.

pub mod controller;
pub mod filter;

pub use api_client::{FetchError, Photo, PhotoId, PhotoSource};
pub use controller::{GalleryController, GalleryError, LoadState};
pub use favorites::{FavoriteSnapshot, FavoritesStore};
pub use filter::{apply, ColorFilter, FilterCriteria, CATEGORIES, COLORS};
