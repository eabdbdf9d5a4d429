mod update_preferences;
use update_preferences::*;

mod update_profile;
use update_profile::*;

mod update_search_history;
use update_search_history::*;

mod error;
pub use error::*;

mod ctx;
pub use ctx::*;
