pub mod currency;
pub mod repository;

pub use currency::format_usd;
pub use repository::{
    ContactRepository, GalleryStore, InventoryRepository, RepositoryError, VersionedGallery,
};
