//! Shutdown signals.

use std::future::{self, Future};
use std::io;

/// Resolves once the OS asks the server to stop (SIGINT, or SIGTERM on
/// unix).
///
/// A signal that cannot be listened for is logged and ignored; the server
/// then only stops on the other one.
pub(crate) async fn shutdown()
{
	let signal = tokio::select! {
		signal = wait_for("SIGINT", tokio::signal::ctrl_c()) => signal,
		signal = wait_for("SIGTERM", terminate()) => signal,
	};

	info!(target: "campus_nav::shutdown", signal, "shutting down; draining open connections");
}

async fn wait_for(name: &'static str, signal: impl Future<Output = io::Result<()>>) -> &'static str
{
	if let Err(error) = signal.await {
		warn!(target: "campus_nav::shutdown", %error, signal = name, "cannot listen for signal");
		future::pending::<()>().await;
	}

	name
}

#[cfg(unix)]
async fn terminate() -> io::Result<()>
{
	use tokio::signal::unix::{SignalKind, signal};

	signal(SignalKind::terminate())?.recv().await;

	Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> io::Result<()>
{
	future::pending().await
}
