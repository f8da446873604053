use http::HeaderValue;
use tower_http::request_id::{
	MakeRequestId,
	PropagateRequestIdLayer,
	RequestId,
	SetRequestIdLayer,
};
use uuid::Uuid;

/// Returns the layers that tag every request with an `x-request-id` header
/// and copy it onto the response.
///
/// IDs supplied by the client are kept as-is.
pub(crate) fn layers() -> (SetRequestIdLayer<impl MakeRequestId + Clone>, PropagateRequestIdLayer)
{
	(SetRequestIdLayer::x_request_id(MakeUuidv7RequestId), PropagateRequestIdLayer::x_request_id())
}

/// Generates time-ordered request IDs, so sorting logs by ID sorts them by
/// arrival.
#[derive(Debug, Clone)]
struct MakeUuidv7RequestId;

impl MakeRequestId for MakeUuidv7RequestId
{
	fn make_request_id<B>(&mut self, _: &http::Request<B>) -> Option<RequestId>
	{
		Uuid::now_v7()
			.hyphenated()
			.to_string()
			.parse::<HeaderValue>()
			.inspect_err(|error| warn!(%error, "generated invalid request ID"))
			.map(RequestId::new)
			.ok()
	}
}
