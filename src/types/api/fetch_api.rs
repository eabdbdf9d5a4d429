use crate::runtime::{ConditionalSend, Env, TryEnvFuture};
use crate::types::api::{APIResult, FetchRequestParams};
use http::Request;
use serde::{Deserialize, Serialize};

pub fn fetch_api<E, BODY, REQ, RESP>(api_request: &REQ) -> TryEnvFuture<APIResult<RESP>>
where
    E: Env,
    BODY: Serialize + ConditionalSend + 'static,
    REQ: FetchRequestParams<BODY> + Clone + Serialize,
    RESP: for<'de> Deserialize<'de> + ConditionalSend + 'static,
{
    let api_request = api_request.to_owned();
    let url = api_request
        .endpoint()
        .join("api/")
        .expect("url builder failed")
        .join(&api_request.path())
        .expect("url builder failed");
    let request = Request::builder()
        .method(api_request.method())
        .uri(url.as_str())
        .body(api_request.body())
        .expect("request builder failed");
    E::fetch(request)
}
