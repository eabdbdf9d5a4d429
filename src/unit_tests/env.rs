use crate::runtime::{ConditionalSend, Env, EnvError, EnvFuture, EnvFutureExt, TryEnvFuture};
use crate::types::geo::Point;
use chrono::{DateTime, Utc};
use futures::{future, Future, TryFutureExt};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::ops::Fn;
use std::sync::{LockResult, Mutex, MutexGuard, RwLock};

lazy_static! {
    pub static ref FETCH_HANDLER: RwLock<FetchHandler> =
        RwLock::new(Box::new(default_fetch_handler));
    pub static ref REQUESTS: RwLock<Vec<Request>> = Default::default();
    pub static ref STORAGE: RwLock<BTreeMap<String, String>> = Default::default();
    pub static ref NOW: RwLock<DateTime<Utc>> = RwLock::new(Utc::now());
    pub static ref LOCATION: RwLock<Point> = RwLock::new(Point::new(41.2995, 69.2401));
    static ref ENV_MUTEX: Mutex<()> = Default::default();
}

thread_local! {
    // effects queued by exec_concurrent/exec_sequential, drained by
    // TestEnv::run; queueing instead of blocking in place keeps nested
    // effect chains from re-entering the executor
    static PENDING_FUTURES: RefCell<VecDeque<EnvFuture<'static, ()>>> =
        RefCell::new(VecDeque::new());
}

pub type FetchHandler =
    Box<dyn Fn(Request) -> TryEnvFuture<Box<dyn Any + Send>> + Send + Sync + 'static>;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Request {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl<T: Serialize> From<http::Request<T>> for Request {
    fn from(request: http::Request<T>) -> Self {
        let (head, body) = request.into_parts();
        Request {
            url: head.uri.to_string(),
            method: head.method.as_str().to_owned(),
            headers: head
                .headers
                .iter()
                .map(|(key, value)| (key.as_str().to_owned(), value.to_str().unwrap().to_owned()))
                .collect::<HashMap<_, _>>(),
            body: serde_json::to_string(&body).unwrap(),
        }
    }
}

pub enum TestEnv {}

impl TestEnv {
    pub fn reset() -> LockResult<MutexGuard<'static, ()>> {
        let env_mutex = ENV_MUTEX.lock();
        *FETCH_HANDLER.write().unwrap() = Box::new(default_fetch_handler);
        *REQUESTS.write().unwrap() = vec![];
        *STORAGE.write().unwrap() = BTreeMap::new();
        *NOW.write().unwrap() = Utc::now();
        *LOCATION.write().unwrap() = Point::new(41.2995, 69.2401);
        PENDING_FUTURES.with(|futures| futures.borrow_mut().clear());
        env_mutex
    }
    pub fn run<F: FnOnce()>(runnable: F) {
        runnable();
        loop {
            let next_future = PENDING_FUTURES.with(|futures| futures.borrow_mut().pop_front());
            match next_future {
                Some(next_future) => futures::executor::block_on(next_future),
                None => break,
            }
        }
    }
}

impl Env for TestEnv {
    fn fetch<
        IN: Serialize + ConditionalSend + 'static,
        OUT: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    >(
        request: http::Request<IN>,
    ) -> TryEnvFuture<OUT> {
        let request = Request::from(request);
        REQUESTS.write().unwrap().push(request.to_owned());
        FETCH_HANDLER.read().unwrap()(request)
            .map_ok(|resp| match resp.downcast::<OUT>() {
                Ok(resp) => *resp,
                // raw provider JSON is handed over as a serde_json::Value
                Err(resp) => match resp.downcast::<serde_json::Value>() {
                    Ok(value) => serde_json::from_value(*value)
                        .unwrap_or_else(|_| panic!("Failed to deserialize to {}", type_name::<OUT>())),
                    Err(_) => panic!("Failed to downcast to {}", type_name::<OUT>()),
                },
            })
            .boxed_env()
    }
    fn get_storage<T: for<'de> Deserialize<'de> + ConditionalSend + 'static>(
        key: &str,
    ) -> TryEnvFuture<Option<T>> {
        future::ok(
            STORAGE
                .read()
                .unwrap()
                .get(key)
                .map(|data| serde_json::from_str(data).unwrap()),
        )
        .boxed_env()
    }
    fn set_storage<T: Serialize>(key: &str, value: Option<&T>) -> TryEnvFuture<()> {
        let mut storage = STORAGE.write().unwrap();
        match value {
            Some(v) => storage.insert(key.to_string(), serde_json::to_string(v).unwrap()),
            None => storage.remove(key),
        };
        future::ok(()).boxed_env()
    }
    fn exec_concurrent<F: Future<Output = ()> + ConditionalSend + 'static>(future: F) {
        PENDING_FUTURES.with(|futures| futures.borrow_mut().push_back(future.boxed_env()));
    }
    fn exec_sequential<F: Future<Output = ()> + ConditionalSend + 'static>(future: F) {
        PENDING_FUTURES.with(|futures| futures.borrow_mut().push_back(future.boxed_env()));
    }
    fn now() -> DateTime<Utc> {
        *NOW.read().unwrap()
    }
    fn current_location() -> TryEnvFuture<Point> {
        future::ok(*LOCATION.read().unwrap()).boxed_env()
    }
    #[cfg(debug_assertions)]
    fn log(message: String) {
        println!("{message}")
    }
}

pub fn default_fetch_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    panic!("Unhandled fetch request: {request:#?}")
}

/// A fetch handler resolving every request with the given error.
pub fn failing_fetch_handler(_request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
    future::err(EnvError::Fetch("network is unreachable".to_owned())).boxed_env()
}
