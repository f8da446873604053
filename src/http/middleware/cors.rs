use std::sync::Arc;

use http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer, ExposeHeaders};

/// Allows browsers on the given origins to call the API.
///
/// The API is public and stateless, so credentials are never allowed.
pub(crate) fn layer(allowed_origins: impl IntoIterator<Item = HeaderValue>) -> CorsLayer
{
	let allowed_origins = Arc::<[HeaderValue]>::from_iter(allowed_origins);

	CorsLayer::new()
		.allow_headers(AllowHeaders::list([header::CONTENT_TYPE]))
		.allow_methods(AllowMethods::list([Method::GET, Method::POST, Method::OPTIONS]))
		.allow_origin(AllowOrigin::predicate(move |origin, _request| -> bool {
			allowed_origins.contains(origin)
		}))
		.expose_headers(ExposeHeaders::list([HeaderName::from_static("x-request-id")]))
}
