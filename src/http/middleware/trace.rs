//! Request/response logging.
//!
//! Every request gets its own span carrying the request ID, so log lines
//! emitted by handlers (and the directions client) can be correlated.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{ConnectInfo, MatchedPath};
use http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::request_id::RequestId;
use tower_http::trace::{MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer};

pub(crate) fn layer<ReqBody, ResBody>(
	include_headers: bool,
) -> TraceLayer<
	SharedClassifier<ServerErrorsAsFailures>,
	impl MakeSpan<ReqBody> + Clone,
	impl OnRequest<ReqBody> + Clone,
	impl OnResponse<ResBody> + Clone,
	(),
	(),
	impl OnFailure<ServerErrorsFailureClass> + Clone,
>
{
	TraceLayer::new_for_http()
		.make_span_with(make_span::<ReqBody>)
		.on_request(move |req: &Request<ReqBody>, span: &tracing::Span| {
			on_request(req, span, include_headers)
		})
		.on_response(move |res: &Response<ResBody>, latency: Duration, span: &tracing::Span| {
			on_response(res, latency, span, include_headers)
		})
		.on_body_chunk(())
		.on_eos(())
		.on_failure(on_failure)
}

fn make_span<B>(req: &Request<B>) -> tracing::Span
{
	let request_id = req
		.extensions()
		.get::<RequestId>()
		.and_then(|request_id| request_id.header_value().to_str().ok());

	info_span!(
		target: "campus_nav::http",
		"request",
		req.id = request_id,
		req.method = %req.method(),
		req.uri = %req.uri(),
		req.route = tracing::field::Empty,
		req.peer = tracing::field::Empty,
		req.headers = tracing::field::Empty,
		res.status = tracing::field::Empty,
		res.headers = tracing::field::Empty,
	)
}

fn on_request<B>(req: &Request<B>, span: &tracing::Span, include_headers: bool)
{
	if req.extensions().get::<RequestId>().is_none() {
		warn!(target: "campus_nav::http::request", "no request ID in request extensions");
	}

	if let Some(route) = req.extensions().get::<MatchedPath>() {
		span.record("req.route", route.as_str());
	}

	if let Some(ConnectInfo(peer)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
		span.record("req.peer", tracing::field::display(peer));
	}

	if include_headers {
		span.record("req.headers", tracing::field::debug(req.headers()));
	}

	debug!(target: "campus_nav::http", "starting to process request");
}

fn on_response<B>(res: &Response<B>, latency: Duration, span: &tracing::Span, include_headers: bool)
{
	span.record("res.status", res.status().as_u16());

	if include_headers {
		span.record("res.headers", tracing::field::debug(res.headers()));
	}

	info!(target: "campus_nav::http", ?latency, "finished processing request");
}

fn on_failure(failure_class: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span)
{
	match failure_class {
		ServerErrorsFailureClass::StatusCode(status) => {
			warn!(
				target: "campus_nav::http::error",
				status = status.as_u16(),
				?latency,
				"failed to handle request",
			);
		},
		ServerErrorsFailureClass::Error(error) => {
			error!(
				target: "campus_nav::http::error",
				error,
				?latency,
				"failed to handle request",
			);
		},
	}
}
