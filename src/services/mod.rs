pub mod recommend;
pub mod segments;

pub use recommend::top_recommendations;
pub use recommend::MAX_RECOMMENDATIONS;
pub use segments::customer_segment;
