pub mod gallery;
pub mod item;
pub mod quote;

pub use gallery::{Gallery, GalleryError, GalleryImage, MoveDirection};
pub use item::{InventoryItem, ItemCategory};
pub use quote::{calculate_staging_quote, QuoteBreakdown, QuoteDetails, QuoteEngine, StagingType};
