//! Request/response middleware.

pub(crate) mod security;
