//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use mayfield_app::{auth::Principal, domain::users::records::UserUuid};

const PRINCIPAL_DEPOT_KEY: &str = "principal";

/// Helpers for reading request-scoped values out of the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    /// The verified caller, when a bearer token was presented.
    fn principal(&self) -> Option<Principal>;

    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    /// Rejects a presented token whose subject is not `user` (admins excepted).
    /// Anonymous requests pass.
    fn authorize_user(&self, user: UserUuid) -> Result<(), StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.insert(PRINCIPAL_DEPOT_KEY, principal);
    }

    fn principal(&self) -> Option<Principal> {
        self.get::<Principal>(PRINCIPAL_DEPOT_KEY).ok().copied()
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.principal()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }

    fn authorize_user(&self, user: UserUuid) -> Result<(), StatusError> {
        match self.principal() {
            Some(principal) if !principal.can_act_for(user) => {
                Err(StatusError::forbidden().brief("Token does not belong to this user"))
            }
            _ => Ok(()),
        }
    }
}
