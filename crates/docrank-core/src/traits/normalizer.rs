/// Turns raw text into a canonical, index-safe token string.
///
/// Implementations must be deterministic and idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub trait INormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}
