use serde::{Deserialize, Serialize};

/// Bearer-token claims. Sessions are stateless: the token carries the user
/// id and role for 7 days, the extractor re-fetches the user row on every
/// request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}
