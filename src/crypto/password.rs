//! Master password handling shared by the cipher pipeline and the stego
//! engines.

use zeroize::Zeroizing;

/// A master password or per-step override key.
///
/// Stores the password in a [`Zeroizing`] buffer so it is wiped from memory
/// on drop, and never prints its contents via `Debug`.
#[derive(Clone)]
pub struct Password {
    inner: Zeroizing<String>,
}

impl Password {
    /// Creates a new password from a string.
    pub fn new<S: Into<String>>(password: S) -> Self {
        Self {
            inner: Zeroizing::new(password.into()),
        }
    }

    /// Returns the password as a UTF-8 string slice, as consumed by PBKDF2.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the password as raw UTF-8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Returns true if the password is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_secret() {
        let password = Password::new("secret");
        let debug = format!("{:?}", password);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("len"));
    }

    #[test]
    fn from_str_and_string() {
        let a: Password = "test".into();
        let b: Password = String::from("test").into();
        assert_eq!(a.as_str(), "test");
        assert_eq!(b.as_str(), "test");
    }

    #[test]
    fn empty_detection() {
        assert!(Password::new("").is_empty());
        assert!(!Password::new("x").is_empty());
    }
}
