//! Job listing pipeline: fetch, filter, sort and render over an in-memory
//! working set. Nothing here touches the network or the terminal.

pub mod dates;
pub mod filter;
pub mod render;
pub mod sort;
pub mod working_set;

pub use filter::FilterState;
pub use render::JobCard;
pub use sort::SortKey;
pub use working_set::WorkingSet;
