use std::ops::Deref;

use nutype::nutype;
use serde::{Deserialize, Serialize};

pub mod email_address;
pub mod form;

/// Identifier assigned to a message by the email delivery provider.
#[nutype(derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Display,
    Deref,
    From,
    Serialize,
    Deserialize
))]
pub struct DeliveryId(String);

/// Outcome of a single attempt to hand a message to the delivery provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent(DeliveryId),
    Failed(String),
}

/// Wrapper for secrets that must never end up in logs or debug output.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitive<T>(pub T);

impl<T> std::fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[sensitive]")
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Sensitive<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
