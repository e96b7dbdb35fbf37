//! Bearer token material.

use std::fmt;

use zeroize::Zeroize;

/// A session's bearer access token.
///
/// The secret is zeroized on drop and never printed through `Debug`.
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
}

impl AccessToken {
    /// Wraps raw token material.
    #[must_use]
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Copies the secret out for use as an `Authorization` bearer value.
    #[must_use]
    pub fn reveal(&self) -> String {
        self.secret.clone()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}
