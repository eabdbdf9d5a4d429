mod env;
pub use env::*;

mod fixtures;
pub use fixtures::*;

mod bookings;
mod city_search;
mod ctx;
mod route_planner;
mod trip_history;
