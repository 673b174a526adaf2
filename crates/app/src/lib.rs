//! Order desk application services: document store access, operator authentication and
//! per-session order boards.

pub mod auth;
pub mod context;
pub mod orders;
pub mod store;

#[cfg(test)]
mod test;
