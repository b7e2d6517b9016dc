//! Client address extraction.
//!
//! The submitter's address keys both eligibility rules, so its derivation is
//! pinned down here: the first entry of `X-Forwarded-For` when a proxy added
//! one, otherwise the socket peer address.

use actix_web::HttpRequest;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Network address of the caller as observed by the server.
#[must_use]
pub fn client_ip(req: &HttpRequest) -> String {
    if let Some(first) = req
        .headers()
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return first.to_owned();
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}
