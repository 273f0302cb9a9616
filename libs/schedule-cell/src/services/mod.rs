pub mod cache;
pub mod fetcher;
pub mod persistence;
pub mod search;

pub use cache::*;
pub use fetcher::*;
pub use persistence::*;
pub use search::*;
