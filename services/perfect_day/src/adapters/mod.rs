pub mod fs_store;
pub mod places;

pub use fs_store::FileStore;
pub use places::GooglePlacesAdapter;
