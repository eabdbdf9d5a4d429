mod notification_preferences;
pub use notification_preferences::*;

mod preferences_snapshot;
pub use preferences_snapshot::*;

mod theme_preferences;
pub use theme_preferences::*;
