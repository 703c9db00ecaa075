//! Token codec — canonical JSON wrapped in URL-safe base64.
//!
//! `encode` emits the URL-safe alphabet without padding, so a token can sit
//! in a query string without escaping. `decode` also accepts tokens written
//! with the standard alphabet (`+`, `/`, `=`), including a `+` that a form
//! decoder turned into a space.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::Value;

use veridia_types::Network;

use crate::claim::{ClaimKind, LandClaim};
use crate::error::{DecodeError, EncodeError};

/// Longest token `encode` will produce and `decode` will accept.
pub const MAX_TOKEN_LEN: usize = 8 * 1024;

/// Encode a claim into a URL-safe token. Deterministic.
///
/// Fails if the token would exceed [`MAX_TOKEN_LEN`], so every token this
/// returns decodes back to `claim`.
pub fn encode(claim: &LandClaim) -> Result<String, EncodeError> {
    let json = serde_json::to_vec(claim).expect("LandClaim is always serializable to JSON");
    let token = URL_SAFE_NO_PAD.encode(json);
    if token.len() > MAX_TOKEN_LEN {
        return Err(EncodeError::TooLong {
            len: token.len(),
            max: MAX_TOKEN_LEN,
        });
    }
    Ok(token)
}

/// Decode a token back into a claim.
///
/// All-or-nothing: any failure yields a [`DecodeError`] and no claim.
pub fn decode(token: &str) -> Result<LandClaim, DecodeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(DecodeError::TooLong {
            len: token.len(),
            max: MAX_TOKEN_LEN,
        });
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(to_url_safe_alphabet(token))
        .map_err(|e| DecodeError::Transport(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|_| DecodeError::Utf8)?;

    let value: Value =
        serde_json::from_str(&text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    check_discriminators(&value)?;

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
}

fn to_url_safe_alphabet(token: &str) -> String {
    token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' | ' ' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

// Checked before full deserialization so the caller learns which rule failed.
fn check_discriminators(value: &Value) -> Result<(), DecodeError> {
    let object = value
        .as_object()
        .ok_or_else(|| DecodeError::Malformed("expected a JSON object".to_string()))?;

    match object.get("landId") {
        Some(id) if id.as_u64().is_some_and(|n| n > 0) => {}
        Some(id) => return Err(DecodeError::InvalidLandId(id.to_string())),
        None => return Err(DecodeError::InvalidLandId("missing".to_string())),
    }

    let kind = object.get("type").and_then(Value::as_str).unwrap_or_default();
    if kind != ClaimKind::LandRegistry.as_str() {
        return Err(DecodeError::WrongType(kind.to_string()));
    }

    let network = object
        .get("network")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Network::from_tag(network).map_err(|_| DecodeError::UnknownNetwork(network.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;
    use veridia_types::LandId;

    fn claim() -> LandClaim {
        LandClaim {
            land_id: LandId::new(42).unwrap(),
            owner: "0xabc".into(),
            jurisdiction: "Lagos, Nigeria".into(),
            metadata_hash: "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi".into(),
            contract_address: "0xa8d945729fbf3ba5863909c8470ac6db2621b3d27b20813378e2dc38a716460b"
                .into(),
            timestamp: "2024-05-01T12:00:00.000Z".into(),
            transaction_hash: Some("0xfeed".into()),
            network: Network::Devnet,
            kind: ClaimKind::LandRegistry,
        }
    }

    fn token_for(value: &Value) -> String {
        URL_SAFE_NO_PAD.encode(value.to_string())
    }

    #[test]
    fn roundtrip() {
        let c = claim();
        assert_eq!(decode(&encode(&c).unwrap()).unwrap(), c);
    }

    #[test]
    fn roundtrip_without_transaction_hash() {
        let c = LandClaim {
            transaction_hash: None,
            ..claim()
        };
        let token = encode(&c).unwrap();
        assert_eq!(decode(&token).unwrap(), c);
    }

    #[test]
    fn token_is_url_safe() {
        let c = LandClaim {
            jurisdiction: "Île-Ifẹ̀, Ọ̀ṣun ~?&=/+".into(),
            ..claim()
        };
        let token = encode(&c).unwrap();
        assert!(token
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'));
        assert_eq!(decode(&token).unwrap(), c);
    }

    #[test]
    fn deterministic() {
        assert_eq!(encode(&claim()).unwrap(), encode(&claim()).unwrap());
    }

    #[test]
    fn accepts_standard_alphabet_tokens() {
        // What a browser's btoa(JSON.stringify(..)) produces.
        let json = serde_json::to_string(&claim()).unwrap();
        let legacy = STANDARD.encode(&json);
        assert_eq!(decode(&legacy).unwrap(), claim());

        // A `+` mangled into a space by form decoding still decodes.
        let mangled = legacy.replace('+', " ");
        assert_eq!(decode(&mangled).unwrap(), claim());
    }

    #[test]
    fn rejects_invalid_transport() {
        assert!(matches!(
            decode("not-base64!!"),
            Err(DecodeError::Transport(_))
        ));
        assert_eq!(decode(""), Err(DecodeError::Empty));
        assert_eq!(decode("   "), Err(DecodeError::Empty));
    }

    #[test]
    fn rejects_oversized_token() {
        let token = "A".repeat(MAX_TOKEN_LEN + 1);
        assert!(matches!(decode(&token), Err(DecodeError::TooLong { .. })));
    }

    // Base64 without padding: 4 chars per 3 bytes, rounded up.
    fn token_len_for_json(json_len: usize) -> usize {
        (json_len * 4).div_ceil(3)
    }

    #[test]
    fn limit_applies_to_both_sides() {
        let base_json = serde_json::to_string(&LandClaim {
            jurisdiction: String::new(),
            ..claim()
        })
        .unwrap()
        .len();
        // Largest jurisdiction whose token still fits.
        let max_json = MAX_TOKEN_LEN * 3 / 4;
        let fits = LandClaim {
            jurisdiction: "x".repeat(max_json - base_json),
            ..claim()
        };
        let token = encode(&fits).unwrap();
        assert!(token.len() <= MAX_TOKEN_LEN);
        assert!(token.len() > MAX_TOKEN_LEN - 4);
        assert_eq!(decode(&token).unwrap(), fits);

        let over = LandClaim {
            jurisdiction: "x".repeat(max_json - base_json + 1),
            ..claim()
        };
        assert_eq!(
            encode(&over),
            Err(EncodeError::TooLong {
                len: token_len_for_json(max_json + 1),
                max: MAX_TOKEN_LEN,
            })
        );

        let huge = LandClaim {
            jurisdiction: "x".repeat(7000),
            ..claim()
        };
        assert!(matches!(encode(&huge), Err(EncodeError::TooLong { .. })));
    }

    #[test]
    fn rejects_non_utf8() {
        let token = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
        assert_eq!(decode(&token), Err(DecodeError::Utf8));
    }

    #[test]
    fn rejects_non_json_and_non_object() {
        let token = URL_SAFE_NO_PAD.encode("hello world");
        assert!(matches!(decode(&token), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            decode(&token_for(&json!([1, 2, 3]))),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_positive_land_ids() {
        for bad in [json!(0), json!(-5), json!(1.5), json!("42"), Value::Null] {
            let mut value = serde_json::to_value(claim()).unwrap();
            value["landId"] = bad;
            assert!(
                matches!(decode(&token_for(&value)), Err(DecodeError::InvalidLandId(_))),
                "{value}"
            );
        }

        let mut value = serde_json::to_value(claim()).unwrap();
        value.as_object_mut().unwrap().remove("landId");
        assert_eq!(
            decode(&token_for(&value)),
            Err(DecodeError::InvalidLandId("missing".into()))
        );
    }

    #[test]
    fn rejects_foreign_discriminators() {
        let mut value = serde_json::to_value(claim()).unwrap();
        value["type"] = json!("vehicle_registry");
        assert_eq!(
            decode(&token_for(&value)),
            Err(DecodeError::WrongType("vehicle_registry".into()))
        );

        let mut value = serde_json::to_value(claim()).unwrap();
        value["network"] = json!("ethereum-mainnet");
        assert_eq!(
            decode(&token_for(&value)),
            Err(DecodeError::UnknownNetwork("ethereum-mainnet".into()))
        );
    }

    #[test]
    fn rejects_missing_fields() {
        let mut value = serde_json::to_value(claim()).unwrap();
        value.as_object_mut().unwrap().remove("owner");
        assert!(matches!(
            decode(&token_for(&value)),
            Err(DecodeError::Malformed(_))
        ));

        let mut value = serde_json::to_value(claim()).unwrap();
        value["jurisdiction"] = json!(7);
        assert!(matches!(
            decode(&token_for(&value)),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut value = serde_json::to_value(claim()).unwrap();
        value["issuer"] = json!("registrar-office");
        assert_eq!(decode(&token_for(&value)).unwrap(), claim());
    }
}
