//! URL to domain normalization.

use crate::error::{PastorError, Result};

/// Reduce a URL to the bare host part used as a record key.
///
/// Everything up to and including the first `//` is dropped, and the
/// result ends at the next `/`. No other normalization is applied, so
/// ports, user info and case are kept as given.
///
/// # Errors
///
/// Returns `PastorError::MalformedDomain` if there is no `//` or nothing
/// between it and the next `/`.
///
/// # Examples
///
/// ```
/// use pastor_core::normalize_domain;
///
/// let domain = normalize_domain("https://shop.example.com/cart?id=1").unwrap();
/// assert_eq!(domain, "shop.example.com");
/// ```
pub fn normalize_domain(url: &str) -> Result<String> {
    let (_, rest) = url.split_once("//").ok_or_else(|| {
        PastorError::MalformedDomain(format!("could not find the protocol in {}", url))
    })?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(PastorError::MalformedDomain(format!(
            "could not find the domain in {}",
            url
        )));
    }

    Ok(host.to_string())
}
