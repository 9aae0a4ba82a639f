//! Request signing
//!
//! Signed requests carry a `timestamp` (ms) and a `signature` parameter. The
//! signature is the hex HMAC-SHA256 of the form-encoded parameters that
//! precede it, keyed with the API secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_PARAM: &str = "signature";
pub const TIMESTAMP_PARAM: &str = "timestamp";
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Mandatory parameter 'signature' was not sent")]
    Missing,

    #[error("Signature is not valid hex")]
    Malformed,

    #[error("Signature for this request is not valid.")]
    Mismatch,
}

/// Form-encode parameters in the order given
pub fn canonical_query(params: &[(String, String)]) -> String {
    // Encoding string pairs cannot fail.
    serde_urlencoded::to_string(params).unwrap_or_default()
}

/// Hex HMAC-SHA256 of `payload`
pub fn sign(secret: &str, payload: &str) -> String {
    let mut mac = mac_for(secret);
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Append `timestamp` and `signature` to the parameter list
pub fn sign_params(secret: &str, params: &mut Vec<(String, String)>, timestamp_ms: i64) {
    params.push((TIMESTAMP_PARAM.to_string(), timestamp_ms.to_string()));
    let signature = sign(secret, &canonical_query(params));
    params.push((SIGNATURE_PARAM.to_string(), signature));
}

/// Check the `signature` parameter against every other parameter, in order.
///
/// Comparison is constant time.
pub fn verify_params(secret: &str, params: &[(String, String)]) -> Result<(), SignatureError> {
    let signature = params
        .iter()
        .find(|(key, _)| key == SIGNATURE_PARAM)
        .map(|(_, value)| value.as_str())
        .ok_or(SignatureError::Missing)?;

    let expected = hex::decode(signature).map_err(|_| SignatureError::Malformed)?;

    let signed: Vec<(String, String)> = params
        .iter()
        .filter(|(key, _)| key != SIGNATURE_PARAM)
        .cloned()
        .collect();

    let mut mac = mac_for(secret);
    mac.update(canonical_query(&signed).as_bytes());
    mac.verify_slice(&expected).map_err(|_| SignatureError::Mismatch)
}

fn mac_for(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_known_vector() {
        // Published example from the Binance API documentation
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let payload = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            sign(secret, payload),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_signed_params_verify() {
        let mut p = params(&[("symbol", "BTCUSDT"), ("side", "BUY"), ("quantity", "0.01")]);
        sign_params("mock_secret", &mut p, 1_700_000_000_000);

        assert_eq!(p[p.len() - 2].0, TIMESTAMP_PARAM);
        assert_eq!(p[p.len() - 1].0, SIGNATURE_PARAM);
        assert_eq!(verify_params("mock_secret", &p), Ok(()));
    }

    #[test]
    fn test_tampered_params_fail() {
        let mut p = params(&[("symbol", "BTCUSDT"), ("quantity", "0.01")]);
        sign_params("mock_secret", &mut p, 1_700_000_000_000);

        p[1].1 = "100".to_string();
        assert_eq!(verify_params("mock_secret", &p), Err(SignatureError::Mismatch));
    }

    #[test]
    fn test_wrong_secret_and_missing_signature() {
        let mut p = params(&[("orderId", "1001")]);
        sign_params("mock_secret", &mut p, 1);
        assert_eq!(verify_params("other", &p), Err(SignatureError::Mismatch));

        let unsigned = params(&[("orderId", "1001")]);
        assert_eq!(verify_params("mock_secret", &unsigned), Err(SignatureError::Missing));

        let garbage = params(&[("orderId", "1001"), ("signature", "zz")]);
        assert_eq!(verify_params("mock_secret", &garbage), Err(SignatureError::Malformed));
    }
}
