//! Credential records and their one-line text encoding.
//!
//! Each record is stored as `username,password_hash,email`. The format has
//! no escaping, so usernames and e-mails must not contain separators.
//! Argon2 PHC strings contain commas themselves, which is why the hash is
//! taken as everything between the first and the last comma.

/// Characters that would break the line format.
const FORBIDDEN: [char; 3] = [',', '\n', '\r'];

/// One registered user.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    pub password_hash: String,
    pub email: String,
}

// Keep hashes and e-mails out of debug output.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("email", &"<redacted>")
            .finish()
    }
}

impl CredentialRecord {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            email: email.into(),
        }
    }

    /// Encode as a single line (without the trailing newline).
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{},{},{}", self.username, self.password_hash, self.email)
    }

    /// Decode one stored line.
    ///
    /// Returns `None` for blank lines and lines without at least one comma.
    /// Two-field lines (`username,hash`) decode with an empty e-mail.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            return None;
        }

        let first = line.find(',')?;
        let last = line.rfind(',')?;
        let username = &line[..first];

        if first == last {
            let hash = &line[first + 1..];
            if hash.is_empty() {
                return None;
            }
            return Some(Self::new(username, hash, ""));
        }

        let hash = &line[first + 1..last];
        if hash.is_empty() {
            return None;
        }
        let email = &line[last + 1..];
        Some(Self::new(username, hash, email))
    }
}

/// Reject values that cannot be stored without corrupting the file.
///
/// Empty values are allowed.
///
/// # Errors
/// Returns a message naming the offending field.
pub fn validate_field(name: &str, value: &str) -> Result<(), String> {
    if value.contains(FORBIDDEN) {
        return Err(format!("{name} must not contain commas or line breaks"));
    }
    Ok(())
}
