use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Capability trait for records that can check their own consistency.
///
/// Repositories run `validate` before persisting a record and after decoding
/// one, so malformed data is rejected at both boundaries.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Generic delivery envelope for typed records.
///
/// A `Notification` wraps a body of arbitrary type together with a unique
/// record id and a kind tag. The kind tag doubles as the storage namespace,
/// so records of different kinds never collide even when their ids do. The
/// body type is fixed at compile time; there is no dynamic dispatch on the
/// payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification<T> {
    /// Unique record identifier within the kind.
    pub id: String,
    /// Record kind, used as the storage namespace.
    pub kind: String,
    /// Typed payload.
    pub body: T,
}

impl<T> Notification<T> {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, body: T) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            body,
        }
    }
}

impl<T: Validate> Validate for Notification<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }
        if self.kind.is_empty() {
            return Err(ValidationError::EmptyField("kind"));
        }
        self.body.validate()
    }
}
