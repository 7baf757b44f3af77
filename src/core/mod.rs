pub mod aggregator;
pub mod portal;

pub use aggregator::Aggregator;
pub use portal::Portal;
