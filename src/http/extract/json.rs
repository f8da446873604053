use std::{any::type_name, fmt};

use axum::{
	body::Bytes,
	extract::{FromRequest, Request, rejection::BytesRejection},
	response::{IntoResponse, Response},
};
use derive_more::{Display, Error, From};
use mime::Mime;
use serde::Deserialize;

use crate::http::HandlerError;

/// A JSON request body.
///
/// Unlike [`axum::Json`], every rejection is rendered as a JSON error body.
#[derive(Debug)]
pub(crate) struct Json<T>(pub T);

#[derive(Debug, Display, Error, From)]
pub(crate) enum JsonRejection
{
	#[display("missing `Content-Type: application/json` header")]
	#[from(ignore)]
	MissingContentType,

	#[display("failed to read request body")]
	BufferBody(BytesRejection),

	#[display("invalid request body: {_0}")]
	Deserialize(serde_json::Error),
}

impl<T, S> FromRequest<S> for Json<T>
where
	T: for<'de> Deserialize<'de> + fmt::Debug,
	S: Send + Sync,
{
	type Rejection = JsonRejection;

	#[instrument(
		level = "debug",
		skip_all,
		fields(ty = type_name::<T>()),
		ret(level = "debug"),
		err(level = "debug"),
	)]
	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection>
	{
		if !has_json_content_type(req.headers()) {
			return Err(JsonRejection::MissingContentType);
		}

		let body = Bytes::from_request(req, state).await?;

		Ok(serde_json::from_slice(&body[..]).map(Self)?)
	}
}

impl IntoResponse for JsonRejection
{
	fn into_response(self) -> Response
	{
		HandlerError::from(self).into_response()
	}
}

#[instrument(level = "trace", ret(level = "trace"))]
fn has_json_content_type(headers: &http::HeaderMap) -> bool
{
	let Some(content_type) = headers.get(http::header::CONTENT_TYPE) else {
		debug!("request headers do not contain a `Content-Type` header");
		return false;
	};

	let Ok(content_type) = content_type.to_str() else {
		debug!("request headers contain a `Content-Type` header, but it's not UTF-8");
		return false;
	};

	let Ok(mime) = content_type.parse::<Mime>() else {
		debug!("request headers contain a `Content-Type` header, but it's not a valid mime type");
		return false;
	};

	mime.type_() == mime::APPLICATION
		&& (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
}

#[cfg(test)]
mod tests
{
	use http::{HeaderMap, HeaderValue, header};

	use super::*;

	fn headers(content_type: &'static str) -> HeaderMap
	{
		let mut headers = HeaderMap::new();
		headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
		headers
	}

	#[test]
	fn accepts_json_content_types()
	{
		assert!(has_json_content_type(&headers("application/json")));
		assert!(has_json_content_type(&headers("application/json; charset=utf-8")));
		assert!(has_json_content_type(&headers("application/vnd.api+json")));
	}

	#[test]
	fn rejects_other_content_types()
	{
		assert!(!has_json_content_type(&HeaderMap::new()));
		assert!(!has_json_content_type(&headers("text/plain")));
		assert!(!has_json_content_type(&headers("application/x-www-form-urlencoded")));
	}
}
