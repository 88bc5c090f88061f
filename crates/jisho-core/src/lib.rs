pub mod controller;
pub mod lookup;
pub mod romaji;
pub mod state;

pub use controller::{SearchController, SearchPolicy};
pub use lookup::{LookupError, LookupMetadata, RemoteLookup};
pub use state::SearchSnapshot;
