//! Slack webhook signature verification.
//!
//! Slack signs every webhook with HMAC-SHA256 over `v0:<timestamp>:<body>`
//! using the app's signing secret, and sends the result as `v0=<hex>` in
//! the `X-Slack-Signature` header:
//! <https://api.slack.com/authentication/verifying-requests-from-slack>
//!
//! Verification is the first step in webhook processing; invalid signatures
//! must be rejected before any payload parsing.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use super::error::SlackError;

/// Maximum age of a request timestamp before it is considered a replay.
const MAX_TIMESTAMP_SKEW_SECS: i64 = 300;

/// Compute the expected signature header value for a timestamp and body.
///
/// Returns a string in the format `v0=<hex>`. Exposed so tests can sign
/// the requests they build.
#[must_use]
pub fn compute_signature(signing_secret: &SecretString, timestamp: &str, body: &str) -> String {
    let sig_basestring = format!("v0:{timestamp}:{body}");

    let mut mac = Hmac::<Sha256>::new_from_slice(signing_secret.expose_secret().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(sig_basestring.as_bytes());

    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}

/// Verify a Slack webhook signature.
///
/// # Arguments
///
/// * `signing_secret` - The app's signing secret
/// * `timestamp` - The `X-Slack-Request-Timestamp` header value
/// * `body` - The raw request body
/// * `signature` - The `X-Slack-Signature` header value
///
/// # Errors
///
/// Returns `SlackError::InvalidSignature` if the timestamp is malformed,
/// outside the replay window, or the signature does not match.
pub fn verify_signature(
    signing_secret: &SecretString,
    timestamp: &str,
    body: &str,
    signature: &str,
) -> Result<(), SlackError> {
    // Check timestamp to prevent replay attacks
    let ts: i64 = timestamp
        .parse()
        .map_err(|_| SlackError::InvalidSignature("Invalid timestamp".to_string()))?;

    let now_secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|e| SlackError::InvalidSignature(e.to_string()))?
        .as_secs();

    let now = i64::try_from(now_secs)
        .map_err(|_| SlackError::InvalidSignature("System time overflow".to_string()))?;

    if (now - ts).abs() > MAX_TIMESTAMP_SKEW_SECS {
        return Err(SlackError::InvalidSignature(
            "Request timestamp too old".to_string(),
        ));
    }

    let expected = compute_signature(signing_secret, timestamp, body);

    // Constant-time comparison
    if !constant_time_compare(&expected, signature) {
        return Err(SlackError::InvalidSignature(
            "Signature mismatch".to_string(),
        ));
    }

    Ok(())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("test-signing-secret".to_string())
    }

    fn current_timestamp() -> String {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time before epoch")
            .as_secs()
            .to_string()
    }

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(!constant_time_compare("hello", "helloo"));
    }

    #[test]
    fn test_signature_verification_valid() {
        let timestamp = current_timestamp();
        let body = "payload=%7B%22type%22%3A%22block_actions%22%7D";
        let signature = compute_signature(&secret(), &timestamp, body);

        assert!(verify_signature(&secret(), &timestamp, body, &signature).is_ok());
    }

    #[test]
    fn test_signature_verification_invalid_signature() {
        let timestamp = current_timestamp();

        let result = verify_signature(&secret(), &timestamp, "body", "v0=invalid_signature_hash");
        assert!(matches!(result, Err(SlackError::InvalidSignature(_))));
    }

    #[test]
    fn test_signature_verification_invalid_timestamp() {
        let result = verify_signature(&secret(), "not-a-number", "body", "v0=sig");
        assert!(matches!(result, Err(SlackError::InvalidSignature(_))));
    }

    #[test]
    fn test_signature_verification_old_timestamp() {
        // Timestamp from 10 minutes ago
        let old_timestamp = (std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time before epoch")
            .as_secs()
            - 600)
            .to_string();

        let body = "payload=x";
        let signature = compute_signature(&secret(), &old_timestamp, body);

        let result = verify_signature(&secret(), &old_timestamp, body, &signature);
        assert!(result.is_err());
        // Should fail due to old timestamp, not signature mismatch
    }

    #[test]
    fn test_signature_verification_tampered_body() {
        let timestamp = current_timestamp();
        let signature = compute_signature(&secret(), &timestamp, "original=body");

        let result = verify_signature(&secret(), &timestamp, "tampered=body", &signature);
        assert!(result.is_err());
    }

    #[test]
    fn test_signature_verification_wrong_secret() {
        let timestamp = current_timestamp();
        let body = "payload=x";
        let signature = compute_signature(&secret(), &timestamp, body);

        let other = SecretString::from("another-signing-secret".to_string());
        assert!(verify_signature(&other, &timestamp, body, &signature).is_err());
    }

    #[test]
    fn test_compute_signature_deterministic() {
        let sig1 = compute_signature(&secret(), "12345", "body");
        let sig2 = compute_signature(&secret(), "12345", "body");
        assert_eq!(sig1, sig2);
        assert!(sig1.starts_with("v0="));
    }
}
