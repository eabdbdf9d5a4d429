use crate::constants::{
    LEGACY_MAP_CREDENTIAL_STORAGE_KEY, PROFILE_STORAGE_KEY, SCHEMA_VERSION,
    SCHEMA_VERSION_STORAGE_KEY,
};
use crate::geocoder::{
    DGisGeocoder, GeocoderProvider, GeocoderTransport, GoogleGeocoder, LocalGeocoder,
    YandexGeocoder,
};
use crate::types::geo::Point;
use chrono::{DateTime, Utc};
use futures::{future, Future, TryFutureExt};
use http::Request;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub use conditional_types::{ConditionalSend, EnvFuture, EnvFutureExt};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EnvError {
    /// Error returned on [`Env::fetch`]
    Fetch(String),
    /// A geocoding provider responded with something the transport
    /// could not interpret
    Geocoder(String),
    /// Serde error when serializing
    Serde(String),
    StorageUnavailable,
    StorageSchemaVersionDowngrade(u32, u32),
    StorageSchemaVersionUpgrade(Box<EnvError>),
    StorageReadError(String),
    StorageWriteError(String),
    Other(String),
}

impl EnvError {
    pub fn message(&self) -> String {
        match &self {
            EnvError::Fetch(message) => format!("Failed to fetch: {message}"),
            EnvError::Geocoder(message) => format!("Geocoder protocol violation: {message}"),
            EnvError::Serde(message) => format!("Serialization error: {message}"),
            EnvError::StorageUnavailable => "Storage is not available".to_owned(),
            EnvError::StorageSchemaVersionDowngrade(from, to) => {
                format!("Downgrade storage schema version from {from} to {to} is not allowed",)
            }
            EnvError::StorageSchemaVersionUpgrade(source) => format!(
                "Upgrade storage schema version failed caused by: {}",
                source.message()
            ),
            EnvError::StorageReadError(message) => format!("Storage read error: {message}"),
            EnvError::StorageWriteError(message) => format!("Storage write error: {message}"),
            EnvError::Other(message) => format!("Other error: {message}"),
        }
    }
    pub fn code(&self) -> u32 {
        match &self {
            EnvError::Fetch(_) => 1,
            EnvError::Geocoder(_) => 2,
            EnvError::Serde(_) => 3,
            EnvError::StorageUnavailable => 4,
            EnvError::StorageSchemaVersionDowngrade(_, _) => 5,
            EnvError::StorageSchemaVersionUpgrade(_) => 6,
            EnvError::StorageReadError(_) => 7,
            EnvError::StorageWriteError(_) => 8,
            EnvError::Other(_) => 1001,
        }
    }
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Serialize for EnvError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("EnvError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

impl From<serde_json::Error> for EnvError {
    fn from(error: serde_json::Error) -> Self {
        EnvError::Serde(error.to_string())
    }
}

#[cfg(not(feature = "env-future-send"))]
/// Only for wasm or when `env-future-send` is not enabled
mod conditional_types {
    use futures::{future::LocalBoxFuture, Future, FutureExt};

    pub type EnvFuture<'a, T> = LocalBoxFuture<'a, T>;

    pub trait ConditionalSend {}

    impl<T> ConditionalSend for T {}

    pub trait EnvFutureExt: Future {
        fn boxed_env<'a>(self) -> EnvFuture<'a, Self::Output>
        where
            Self: Sized + 'a,
        {
            self.boxed_local()
        }
    }
}

#[cfg(feature = "env-future-send")]
/// Enabled with the feature `env-future-send` but it requires a non-wasm target!
/// It will cause a compile-time error!
mod conditional_types {
    use futures::{future::BoxFuture, Future, FutureExt};

    pub type EnvFuture<'a, T> = BoxFuture<'a, T>;

    pub trait ConditionalSend: Send {}

    impl<T> ConditionalSend for T where T: Send {}

    pub trait EnvFutureExt: Future {
        fn boxed_env<'a>(self) -> EnvFuture<'a, Self::Output>
        where
            Self: Sized + Send + 'a,
        {
            self.boxed()
        }
    }
}

impl<T: ?Sized> EnvFutureExt for T where T: Future {}

pub type TryEnvFuture<T> = EnvFuture<'static, Result<T, EnvError>>;

pub trait Env {
    fn fetch<
        IN: Serialize + ConditionalSend + 'static,
        OUT: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    >(
        request: Request<IN>,
    ) -> TryEnvFuture<OUT>;

    fn get_storage<T: for<'de> Deserialize<'de> + ConditionalSend + 'static>(
        key: &str,
    ) -> TryEnvFuture<Option<T>>;
    fn set_storage<T: Serialize>(key: &str, value: Option<&T>) -> TryEnvFuture<()>;
    fn exec_concurrent<F: Future<Output = ()> + ConditionalSend + 'static>(future: F);
    fn exec_sequential<F: Future<Output = ()> + ConditionalSend + 'static>(future: F);
    fn now() -> DateTime<Utc>;
    /// One position fix per call, resolved within
    /// [`GEOLOCATION_TIMEOUT_MS`](crate::constants::GEOLOCATION_TIMEOUT_MS)
    /// and allowed to be served from a cache no older than
    /// [`GEOLOCATION_MAX_AGE_MS`](crate::constants::GEOLOCATION_MAX_AGE_MS).
    fn current_location() -> TryEnvFuture<Point>;
    #[cfg(debug_assertions)]
    fn log(message: String);
    fn geocoder(provider: GeocoderProvider) -> Box<dyn GeocoderTransport>
    where
        Self: Sized + 'static,
    {
        match provider {
            GeocoderProvider::Google => Box::new(GoogleGeocoder::<Self>::new()),
            GeocoderProvider::Yandex => Box::new(YandexGeocoder::<Self>::new()),
            GeocoderProvider::DGis => Box::new(DGisGeocoder::<Self>::new()),
            GeocoderProvider::Local => Box::<LocalGeocoder>::default(),
        }
    }
    fn migrate_storage_schema() -> TryEnvFuture<()>
    where
        Self: Sized,
    {
        Self::get_storage::<u32>(SCHEMA_VERSION_STORAGE_KEY)
            .and_then(|schema_version| async move {
                let mut schema_version = schema_version.unwrap_or_default();
                if schema_version > SCHEMA_VERSION {
                    return Err(EnvError::StorageSchemaVersionDowngrade(
                        schema_version,
                        SCHEMA_VERSION,
                    ));
                }
                if schema_version == 0 {
                    migrate_storage_schema_to_v1::<Self>()
                        .map_err(|error| EnvError::StorageSchemaVersionUpgrade(Box::new(error)))
                        .await?;
                    schema_version = 1;
                }
                if schema_version == 1 {
                    migrate_storage_schema_to_v2::<Self>()
                        .map_err(|error| EnvError::StorageSchemaVersionUpgrade(Box::new(error)))
                        .await?;
                    schema_version = 2;
                }
                if schema_version != SCHEMA_VERSION {
                    panic!(
                        "Storage schema version must be upgraded from {} to {}",
                        schema_version, SCHEMA_VERSION
                    );
                }
                Ok(())
            })
            .boxed_env()
    }
}

fn migrate_storage_schema_to_v1<E: Env>() -> TryEnvFuture<()> {
    future::try_join_all(vec![
        E::set_storage(SCHEMA_VERSION_STORAGE_KEY, Some(&1)),
        E::set_storage::<()>(PROFILE_STORAGE_KEY, None),
    ])
    .map_ok(|_| ())
    .boxed_env()
}

/// Provider credentials are resolved by the geocoding proxy, the one the
/// legacy client kept on the device must not survive the upgrade.
fn migrate_storage_schema_to_v2<E: Env>() -> TryEnvFuture<()> {
    E::set_storage::<()>(LEGACY_MAP_CREDENTIAL_STORAGE_KEY, None)
        .and_then(|_| E::set_storage(SCHEMA_VERSION_STORAGE_KEY, Some(&2)))
        .boxed_env()
}

#[cfg(test)]
mod test {
    use crate::{
        constants::{
            LEGACY_MAP_CREDENTIAL_STORAGE_KEY, SCHEMA_VERSION, SCHEMA_VERSION_STORAGE_KEY,
        },
        runtime::Env,
        unit_tests::{TestEnv, STORAGE},
    };

    #[tokio::test]
    async fn test_migration_to_latest_version() {
        let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

        STORAGE.write().unwrap().insert(
            LEGACY_MAP_CREDENTIAL_STORAGE_KEY.to_owned(),
            "\"AIza-legacy\"".to_owned(),
        );

        TestEnv::migrate_storage_schema()
            .await
            .expect("Should migrate");

        let storage = STORAGE.read().unwrap();
        assert_eq!(
            Some(&SCHEMA_VERSION.to_string()),
            storage.get(SCHEMA_VERSION_STORAGE_KEY),
            "Schema version should now be updated"
        );
        assert!(
            storage.get(LEGACY_MAP_CREDENTIAL_STORAGE_KEY).is_none(),
            "Legacy map credential should be removed"
        );
    }

    #[tokio::test]
    async fn test_migration_from_newer_version_fails() {
        let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");

        STORAGE.write().unwrap().insert(
            SCHEMA_VERSION_STORAGE_KEY.to_owned(),
            (SCHEMA_VERSION + 1).to_string(),
        );

        assert!(
            TestEnv::migrate_storage_schema().await.is_err(),
            "Downgrade should not be allowed"
        );
    }
}
