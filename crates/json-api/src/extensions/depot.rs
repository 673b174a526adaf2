//! Depot helper extensions.

use std::any::Any;

use orderdesk_app::auth::OperatorClaims;
use salvo::prelude::{Depot, StatusError};

const OPERATOR_CLAIMS_DEPOT_KEY: &str = "operator_claims";

/// Helpers for depot values shared between middleware and handlers.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_claims(&mut self, claims: OperatorClaims);

    fn claims_or_401(&self) -> Result<&OperatorClaims, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_claims(&mut self, claims: OperatorClaims) {
        self.insert(OPERATOR_CLAIMS_DEPOT_KEY, claims);
    }

    fn claims_or_401(&self) -> Result<&OperatorClaims, StatusError> {
        self.get::<OperatorClaims>(OPERATOR_CLAIMS_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized().brief("Not logged in"))
    }
}
