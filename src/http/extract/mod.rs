pub(crate) mod json;

pub(crate) use self::json::{Json, JsonRejection};
