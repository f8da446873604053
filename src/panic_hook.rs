//! Custom global panic hook to log runtime panics.
//!
//! See [`std::panic::set_hook()`] for more details.

use std::{backtrace::Backtrace, panic};

/// Installs the custom global panic hook.
///
/// The previous hook will be invoked after this custom one is done.
pub fn install()
{
	let old_hook = panic::take_hook();

	panic::set_hook(Box::new(move |info| {
		let payload = info
			.payload()
			.downcast_ref::<&str>()
			.copied()
			.or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
			.unwrap_or("<unknown>");

		let location = info
			.location()
			.map_or_else(|| String::from("<unknown>"), ToString::to_string);

		error!(
			target: "campus_nav::panics",
			%location,
			backtrace = %Backtrace::capture(),
			"thread panicked: {payload}",
		);

		old_hook(info)
	}));
}
