mod point;
pub use point::*;

mod route;
pub use route::*;

mod suggestion;
pub use suggestion::*;
