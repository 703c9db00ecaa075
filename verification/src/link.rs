//! Verification links and explorer URLs.

use url::Url;

use veridia_types::Network;

use crate::claim::LandClaim;
use crate::codec::encode;
use crate::error::{DecodeError, LinkError};

/// Path segment of the verification page.
pub const VERIFY_PATH: &str = "verify";
/// Query parameter carrying the token.
pub const DATA_PARAM: &str = "data";
/// Public block explorer.
pub const EXPLORER_URL: &str = "https://explorer.aptoslabs.com";

/// Build `<base>/verify?data=<token>` for `claim`.
///
/// Any path prefix on `base` is kept (`https://host/app` gives
/// `https://host/app/verify`); its query and fragment are dropped. Claims too
/// large for a token are rejected with [`LinkError::Encode`].
pub fn verification_url(base: &str, claim: &LandClaim) -> Result<Url, LinkError> {
    let invalid = |reason: String| LinkError::InvalidBase {
        url: base.to_string(),
        reason,
    };

    let token = encode(claim)?;
    let mut url = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }

    let path = format!("{}/{VERIFY_PATH}", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(DATA_PARAM, &token);
    Ok(url)
}

/// Pull the token out of a verification link.
pub fn token_from_url(link: &str) -> Result<String, DecodeError> {
    let url = Url::parse(link.trim()).map_err(|e| DecodeError::InvalidLink(e.to_string()))?;
    url.query_pairs()
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.trim().is_empty())
        .ok_or(DecodeError::MissingData)
}

/// Accept either a full verification link or a bare token.
pub fn extract_token(input: &str) -> Result<String, DecodeError> {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        token_from_url(input)
    } else {
        Ok(input.to_string())
    }
}

/// Explorer page for a transaction.
pub fn explorer_txn_url(network: Network, txn_hash: &str) -> String {
    format!("{EXPLORER_URL}/txn/{txn_hash}?network={network}")
}

/// Explorer page for an account.
pub fn explorer_account_url(network: Network, address: &str) -> String {
    format!("{EXPLORER_URL}/account/{address}?network={network}")
}
