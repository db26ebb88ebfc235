//! Request body encoding and response decoding

use manavault_http::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Body, HttpError, Response,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Encode `value` as a JSON request body
pub fn json_body<B: Serialize + ?Sized>(value: &B) -> Result<Body> {
    Ok(Body::from(serde_json::to_vec(value)?))
}

/// Encode `pairs` as an `application/x-www-form-urlencoded` body
pub fn form_body(pairs: &[(&str, &str)]) -> Body {
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    Body::from(encoded)
}

/// Add a JSON content type to `headers`
pub fn with_json_content(mut headers: HeaderMap) -> HeaderMap {
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Add a form content type to `headers`
pub fn with_form_content(mut headers: HeaderMap) -> HeaderMap {
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    headers
}

/// Read the whole body and decode it as JSON
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await.map_err(HttpError::RequestFailed)?;
    Ok(serde_json::from_slice(&bytes)?)
}
