//! `console-session` — inspect an access token the way the console sees it.
//!
//! ```text
//! console-session [TOKEN] [--can CODE] [--has PRODUCT]
//! ```
//!
//! The token defaults to `$ACCESS_TOKEN`. Prints a JSON report on stdout.

use anyhow::{Context, bail};
use chrono::Utc;
use serde::Serialize;

use console_auth::{AuthorizationExplanation, AuthorizationQuery, Identity, Session};
use console_core::Timestamp;
use console_web::ConsoleConfig;

#[derive(Debug, Default)]
struct Args {
    token: Option<String>,
    capability: Option<String>,
    product: Option<String>,
}

#[derive(Serialize)]
struct Report {
    identity: Identity,
    permissions: Vec<String>,
    products: Vec<String>,
    issued_at: Option<Timestamp>,
    expires_at: Option<Timestamp>,
    expired: bool,
    usable: bool,
    time_remaining_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorization: Option<AuthorizationExplanation>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args::default();

    while let Some(arg) = raw.next() {
        if arg == "--can" {
            args.capability = Some(raw.next().context("--can needs a permission code")?);
        } else if arg == "--has" {
            args.product = Some(raw.next().context("--has needs a product tag")?);
        } else if arg.starts_with("--") {
            bail!("unknown flag {arg}");
        } else if args.token.is_none() {
            args.token = Some(arg);
        } else {
            bail!("unexpected argument {arg}");
        }
    }

    Ok(args)
}

fn main() -> anyhow::Result<()> {
    console_observability::init();

    let config = ConsoleConfig::from_env();
    let args = parse_args(std::env::args().skip(1))?;

    let token = match args.token {
        Some(token) => token,
        None => std::env::var("ACCESS_TOKEN").context("no token given and ACCESS_TOKEN is unset")?,
    };

    let session = Session::from_token(token.trim()).context("failed to decode token")?;
    let now = Utc::now();
    let claims = session.claims();

    let query = AuthorizationQuery::from_parts(args.capability, args.product);

    let expired = session.is_expired(now);
    let report = Report {
        identity: session.identity(),
        permissions: claims.permissions.iter().map(|p| p.to_string()).collect(),
        products: claims.products.iter().map(|p| p.to_string()).collect(),
        issued_at: session.issued_at(),
        expires_at: session.expires_at(),
        expired,
        usable: !expired && (session.has_expiry() || !config.require_expiry),
        time_remaining_secs: session.time_remaining(now).map(|d| d.num_seconds()),
        authorization: (!query.is_empty()).then(|| session.evaluator().explain(&query)),
    };

    tracing::debug!(subject_id = %claims.subject_id, expired, "token inspected");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
