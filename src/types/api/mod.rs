mod fetch_api;
pub use fetch_api::*;

mod request;
pub use request::*;

mod response;
pub use response::*;
