pub mod domain;
pub mod ports;
pub mod search;
pub mod sessions;

pub use domain::{
    format_duration, suggest_area_from_address, Activity, AuthSession, Coordinates, Day, DayParts,
    ExternalPlace, FreeformText, Location, PlaceResult, User, ValidationError,
};
pub use ports::{PlacesService, PortError, PortResult, StorageService};
pub use search::{search, unique_areas, SearchCriteria, SearchResult, SortField, SortKey, SortOrder};
pub use sessions::SessionStore;
