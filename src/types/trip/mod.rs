mod trip_summary;
pub use trip_summary::*;
