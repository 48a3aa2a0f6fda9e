pub mod search;


pub use search::{SearchOutcome, SearchService};
