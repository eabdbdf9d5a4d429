mod dgis;
pub use dgis::*;

mod geocoder;
pub use geocoder::*;

mod google;
pub use google::*;

mod local;
pub use local::*;

mod yandex;
pub use yandex::*;
