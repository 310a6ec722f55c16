//! Query string helpers.

use salvo::prelude::{Request, StatusError};
use uuid::Uuid;

use crate::extensions::*;

pub(crate) trait QueryExt {
    /// Parse an optional camelCase id from the query string.
    fn query_uuid(&self, key: &str) -> Result<Option<Uuid>, StatusError>;

    /// Like [`QueryExt::query_uuid`], answering 400 when the key is absent.
    fn require_query_uuid(&self, key: &str) -> Result<Uuid, StatusError>;
}

impl QueryExt for Request {
    fn query_uuid(&self, key: &str) -> Result<Option<Uuid>, StatusError> {
        self.query::<String>(key)
            .map(|value| value.parse::<Uuid>())
            .transpose()
            .or_400(&format!("could not parse \"{key}\" query parameter"))
    }

    fn require_query_uuid(&self, key: &str) -> Result<Uuid, StatusError> {
        self.query_uuid(key)?.ok_or_else(|| {
            StatusError::bad_request().brief(format!("missing \"{key}\" query parameter"))
        })
    }
}
