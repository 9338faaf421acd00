//! Request-level guards and typed session access.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
