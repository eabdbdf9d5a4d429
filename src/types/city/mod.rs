mod local_city;
pub use local_city::*;

mod normalizer;
pub use normalizer::*;
