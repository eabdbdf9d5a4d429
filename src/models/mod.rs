pub mod bookings;
pub mod city_search;
pub mod common;
pub mod ctx;
pub mod route_planner;
pub mod trip_history;
