//! Authentication

mod credentials;
mod errors;
mod models;
pub mod openbao;
mod service;
mod sessions;
mod token;

pub use credentials::*;
pub use errors::*;
pub use models::*;
pub use openbao::{OpenBaoClient, OpenBaoConfig, OpenBaoError};
pub use service::*;
pub use sessions::*;
pub use token::*;
