mod search_history_bucket;
pub use search_history_bucket::*;

mod search_history_item;
pub use search_history_item::*;

mod search_query;
pub use search_query::*;
