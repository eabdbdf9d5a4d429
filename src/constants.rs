use crate::types::city::LocalCity;
use crate::types::geo::Point;
use lazy_static::lazy_static;
use std::collections::HashMap;
use url::Url;

pub const SCHEMA_VERSION_STORAGE_KEY: &str = "schema_version";
pub const PROFILE_STORAGE_KEY: &str = "profile";
pub const SEARCH_HISTORY_STORAGE_KEY_PREFIX: &str = "search_history_";
/// Storage key of the map-provider credential the legacy client kept on the
/// device. The key is only ever deleted (see `migrate_storage_schema_to_v2`),
/// all provider credentials live behind the geocoding proxy.
pub const LEGACY_MAP_CREDENTIAL_STORAGE_KEY: &str = "map_provider_key";
pub const GUEST_USER_KEY: &str = "guest";
pub const SCHEMA_VERSION: u32 = 2;

/// Hard cap of persisted search history entries, oldest-by-insertion
/// evicted first.
pub const MAX_SEARCH_HISTORY_ITEMS: usize = 20;
pub const MOST_FREQUENT_SEARCHES_COUNT: usize = 5;
pub const MOST_RECENT_SEARCHES_COUNT: usize = 10;

/// Average speed used to derive a duration estimate when a route is
/// computed from the great-circle distance instead of a routing provider.
pub const ASSUMED_AVERAGE_SPEED_KMH: f64 = 60.0;

/// Returned by reverse geocoding whenever the provider fails.
pub const REVERSE_GEOCODE_PLACEHOLDER: &str = "Неизвестное место";

/// Geolocation acquisition contract for `Env::current_location`
/// implementations: bounded wait and result cache validity window.
pub const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;
pub const GEOLOCATION_MAX_AGE_MS: u32 = 60_000;

lazy_static! {
    pub static ref API_URL: Url =
        Url::parse("https://api.hamroh.uz").expect("API_URL parse failed");
    pub static ref GEOCODE_PROXY_URL: Url =
        Url::parse("https://functions.hamroh.uz/geocode/").expect("GEOCODE_PROXY_URL parse failed");
    /// Lowercase spelling variants (Latin and Cyrillic) to the canonical
    /// Cyrillic display form. Keys are pre-lowercased, lookups are done on
    /// normalized input only.
    pub static ref CITY_ALIASES: HashMap<&'static str, &'static str> = vec![
        ("tashkent", "Ташкент"),
        ("toshkent", "Ташкент"),
        ("ташкент", "Ташкент"),
        ("samarkand", "Самарканд"),
        ("samarqand", "Самарканд"),
        ("самарканд", "Самарканд"),
        ("bukhara", "Бухара"),
        ("buxoro", "Бухара"),
        ("бухара", "Бухара"),
        ("andijan", "Андижан"),
        ("andijon", "Андижан"),
        ("андижан", "Андижан"),
        ("namangan", "Наманган"),
        ("наманган", "Наманган"),
        ("fergana", "Фергана"),
        ("fargona", "Фергана"),
        ("farg'ona", "Фергана"),
        ("фергана", "Фергана"),
        ("nukus", "Нукус"),
        ("нукус", "Нукус"),
        ("khiva", "Хива"),
        ("xiva", "Хива"),
        ("хива", "Хива"),
        ("karshi", "Карши"),
        ("qarshi", "Карши"),
        ("карши", "Карши"),
        ("termez", "Термез"),
        ("termiz", "Термез"),
        ("термез", "Термез"),
        ("jizzakh", "Джизак"),
        ("jizzax", "Джизак"),
        ("джизак", "Джизак"),
        ("navoi", "Навои"),
        ("navoiy", "Навои"),
        ("навои", "Навои"),
        ("urgench", "Ургенч"),
        ("urganch", "Ургенч"),
        ("ургенч", "Ургенч"),
        ("kokand", "Коканд"),
        ("qoqon", "Коканд"),
        ("qo'qon", "Коканд"),
        ("коканд", "Коканд"),
        ("margilan", "Маргилан"),
        ("marg'ilon", "Маргилан"),
        ("маргилан", "Маргилан"),
        ("chirchik", "Чирчик"),
        ("chirchiq", "Чирчик"),
        ("чирчик", "Чирчик"),
        ("almalyk", "Алмалык"),
        ("olmaliq", "Алмалык"),
        ("алмалык", "Алмалык"),
        ("angren", "Ангрен"),
        ("ангрен", "Ангрен"),
        ("shakhrisabz", "Шахрисабз"),
        ("shahrisabz", "Шахрисабз"),
        ("шахрисабз", "Шахрисабз"),
        ("gulistan", "Гулистан"),
        ("guliston", "Гулистан"),
        ("гулистан", "Гулистан"),
    ]
    .into_iter()
    .collect();
    /// Bundled city list used by the local geocoder and as the offline
    /// fallback of the HTTP transports.
    pub static ref LOCAL_CITIES: Vec<LocalCity> = vec![
        LocalCity::new("Ташкент", Point::new(41.2995, 69.2401)),
        LocalCity::new("Самарканд", Point::new(39.6542, 66.9597)),
        LocalCity::new("Бухара", Point::new(39.7747, 64.4286)),
        LocalCity::new("Андижан", Point::new(40.7821, 72.3442)),
        LocalCity::new("Наманган", Point::new(41.0004, 71.6726)),
        LocalCity::new("Фергана", Point::new(40.3842, 71.7843)),
        LocalCity::new("Нукус", Point::new(42.4731, 59.6103)),
        LocalCity::new("Хива", Point::new(41.3775, 60.3619)),
        LocalCity::new("Карши", Point::new(38.8606, 65.7891)),
        LocalCity::new("Термез", Point::new(37.2242, 67.2783)),
        LocalCity::new("Джизак", Point::new(40.1158, 67.8422)),
        LocalCity::new("Навои", Point::new(40.1030, 65.3686)),
        LocalCity::new("Ургенч", Point::new(41.5506, 60.6314)),
        LocalCity::new("Коканд", Point::new(40.5283, 70.9429)),
        LocalCity::new("Маргилан", Point::new(40.4711, 71.7246)),
        LocalCity::new("Чирчик", Point::new(41.4689, 69.5822)),
        LocalCity::new("Алмалык", Point::new(40.8445, 69.5983)),
        LocalCity::new("Ангрен", Point::new(41.0167, 70.1436)),
        LocalCity::new("Шахрисабз", Point::new(39.0578, 66.8346)),
        LocalCity::new("Гулистан", Point::new(40.4897, 68.7842)),
    ];
}
