use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use console_core::{CompanyId, SubjectId};

use crate::{Permission, Product, Role};

/// Claims carried in the payload segment of an access token.
///
/// This is the decoded view only: the console never verifies the token's
/// signature, the issuing server is trusted to have done so.
///
/// `permissions` and `products` are sets, so ordering and duplicates in the
/// wire payload have no effect on equality or on authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Authenticated user.
    #[serde(rename = "sub")]
    pub subject_id: SubjectId,

    pub username: String,

    /// Tenant scope of the session.
    pub company_id: CompanyId,

    pub role: Role,

    /// Capability codes granted to the user.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub permissions: BTreeSet<Permission>,

    /// Product modules licensed to the company.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: BTreeSet<Product>,

    /// Issued-at, epoch seconds.
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,

    /// Expiration, epoch seconds.
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    /// Avatar shown in the header; never used for decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Grant lists may be sent as `null`; that means "none granted".
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<BTreeSet<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Ord,
{
    Ok(Option::<BTreeSet<T>>::deserialize(deserializer)?.unwrap_or_default())
}
