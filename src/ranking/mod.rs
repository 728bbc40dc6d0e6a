pub mod ranker;

pub use ranker::{sort_by, sort_by_amount, sort_by_deadline, sorted, Ranker};
