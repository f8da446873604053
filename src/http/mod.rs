//! HTTP plumbing shared by all routes.

pub(crate) mod error;
pub(crate) mod extract;
pub(crate) mod middleware;

pub(crate) use self::error::{HandlerError, HandlerResult};
