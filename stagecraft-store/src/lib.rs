pub mod app_config;
pub mod contact_repo;
pub mod database;
pub mod events;
pub mod gallery_repo;
pub mod inventory_repo;

pub use app_config::Config;
pub use contact_repo::PostgresContactRepository;
pub use database::DbClient;
pub use events::EventBus;
pub use gallery_repo::PostgresGalleryStore;
pub use inventory_repo::PostgresInventoryRepository;
