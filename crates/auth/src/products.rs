use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

/// Licensed product module of a company (e.g. "Confinus").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Cow<'static, str>);

impl Product {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Product {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Product {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Product {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
