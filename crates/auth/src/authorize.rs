use serde::Serialize;

use console_core::{CompanyId, SubjectId};

use crate::{Claims, Permission, Product, Session};

/// A screen/action requirement: a capability, a product, both or neither.
///
/// Absent fields are not checked; an empty query always passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorizationQuery {
    pub capability: Option<Permission>,
    pub product: Option<Product>,
}

impl AuthorizationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capability(capability: impl Into<Permission>) -> Self {
        Self::new().with_capability(capability)
    }

    pub fn product(product: impl Into<Product>) -> Self {
        Self::new().with_product(product)
    }

    pub fn with_capability(mut self, capability: impl Into<Permission>) -> Self {
        self.capability = Some(capability.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<Product>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Query from optional parts, as supplied by markup attributes or flags.
    pub fn from_parts(
        capability: Option<impl Into<Permission>>,
        product: Option<impl Into<Product>>,
    ) -> Self {
        Self {
            capability: capability.map(Into::into),
            product: product.map(Into::into),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.capability.is_none() && self.product.is_none()
    }
}

/// Outcome of a screen-level check.
///
/// Denial is not an error: a denied screen or element simply renders nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationResult {
    Allowed,
    Denied,
}

impl AuthorizationResult {
    pub fn from_granted(granted: bool) -> Self {
        if granted { Self::Allowed } else { Self::Denied }
    }

    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }

    pub fn is_denied(self) -> bool {
        self == Self::Denied
    }

    /// Produce content only when allowed.
    pub fn render<T>(self, content: impl FnOnce() -> T) -> Option<T> {
        match self {
            Self::Allowed => Some(content()),
            Self::Denied => None,
        }
    }
}

/// Answers capability/product questions against one session's claims.
///
/// - No IO
/// - No panics
/// - Never fails: a missing grant is `false`
#[derive(Debug, Copy, Clone)]
pub struct Evaluator<'a> {
    claims: &'a Claims,
}

impl<'a> Evaluator<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            claims: session.claims(),
        }
    }

    /// Is `capability` among the granted permissions?
    pub fn can(&self, capability: &str) -> bool {
        self.claims.permissions.contains(capability)
    }

    /// Is `product` among the company's licensed products?
    pub fn has(&self, product: &str) -> bool {
        self.claims.products.contains(product)
    }

    /// Conjunction of the checks present in `query`.
    pub fn evaluate(&self, query: &AuthorizationQuery) -> bool {
        let capability_ok = query.capability.as_ref().is_none_or(|c| self.can(c.as_str()));
        let product_ok = query.product.as_ref().is_none_or(|p| self.has(p.as_str()));
        capability_ok && product_ok
    }

    pub fn check(&self, query: &AuthorizationQuery) -> AuthorizationResult {
        let result = AuthorizationResult::from_granted(self.evaluate(query));
        tracing::trace!(
            capability = query.capability.as_ref().map(Permission::as_str),
            product = query.product.as_ref().map(Product::as_str),
            ?result,
            "authorization check"
        );
        result
    }

    /// Explain why `query` is (or would be) allowed or denied.
    pub fn explain(&self, query: &AuthorizationQuery) -> AuthorizationExplanation {
        let mut denial_reasons = Vec::new();

        if let Some(capability) = &query.capability {
            if !self.can(capability.as_str()) {
                denial_reasons.push(DenialReason {
                    kind: DenialKind::MissingPermission,
                    message: format!("Missing required permission: '{}'", capability),
                    suggestions: vec![
                        format!("Grant the '{}' permission to the user", capability),
                        "Sign in again after permissions change; grants are read from the token"
                            .to_string(),
                    ],
                });
            }
        }

        if let Some(product) = &query.product {
            if !self.has(product.as_str()) {
                denial_reasons.push(DenialReason {
                    kind: DenialKind::MissingProduct,
                    message: format!("Company is not licensed for product '{}'", product),
                    suggestions: vec![format!(
                        "Enable the '{}' module for company {}",
                        product, self.claims.company_id
                    )],
                });
            }
        }

        let granted = denial_reasons.is_empty();
        let reason = if query.is_empty() {
            "No capability or product required".to_string()
        } else if granted {
            "All required grants are present".to_string()
        } else {
            denial_reasons
                .iter()
                .map(|d| d.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        AuthorizationExplanation {
            capability: query.capability.as_ref().map(|c| c.as_str().to_string()),
            product: query.product.as_ref().map(|p| p.as_str().to_string()),
            granted,
            reason,
            principal: PrincipalState::from_claims(self.claims),
            denial_reasons,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (diagnostics)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Diagnostic only; it is logged or printed, never shown to the end user.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub capability: Option<String>,
    pub product: Option<String>,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    pub principal: PrincipalState,
    /// One entry per failed check; empty when granted.
    pub denial_reasons: Vec<DenialReason>,
}

/// Snapshot of the grants the decision was made against.
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalState {
    pub subject_id: SubjectId,
    pub username: String,
    pub company_id: CompanyId,
    pub role: String,
    pub permissions: Vec<String>,
    pub products: Vec<String>,
}

impl PrincipalState {
    fn from_claims(claims: &Claims) -> Self {
        Self {
            subject_id: claims.subject_id,
            username: claims.username.clone(),
            company_id: claims.company_id,
            role: claims.role.as_str().to_string(),
            permissions: claims.permissions.iter().map(|p| p.as_str().to_string()).collect(),
            products: claims.products.iter().map(|p| p.as_str().to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    MissingPermission,
    MissingProduct,
}
