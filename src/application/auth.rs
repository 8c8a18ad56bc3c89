//! Authentication service: registration, login and logout.
//!
//! Passwords are hashed here before they reach the store; stores never see
//! plaintext.

use std::sync::Arc;

use crate::domain::password::{self, PasswordError};
use crate::domain::{validate_field, CredentialRecord, Session};
use crate::ports::CredentialStore;

/// Errors from authentication use cases.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown user or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("{0}")]
    InvalidField(String),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Credential store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    fn store<E>(e: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(e))
    }
}

/// Service for user registration and login.
pub struct AuthService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> Clone for AuthService<S>
where
    S: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> AuthService<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Empty values are accepted; separator characters and duplicate
    /// usernames are not.
    ///
    /// # Errors
    /// Returns `InvalidField`, `UsernameTaken`, or a hashing/store failure.
    pub fn register(&self, username: &str, password: &str, email: &str) -> Result<(), AuthError> {
        validate_field("Username", username).map_err(AuthError::InvalidField)?;
        validate_field("Email", email).map_err(AuthError::InvalidField)?;

        let hash = password::hash_password(password)?;
        let created = self
            .store
            .register(&CredentialRecord::new(username, hash, email))
            .map_err(AuthError::store)?;
        if !created {
            tracing::info!("Registration rejected: username already exists");
            return Err(AuthError::UsernameTaken);
        }

        tracing::info!("Registered new user {:?}", username);
        Ok(())
    }

    /// Check a username/password pair against the store.
    ///
    /// Records are scanned in file order; the first record with a matching
    /// username and a verifying hash wins. An empty store never verifies.
    /// An unknown username still runs one Argon2 verification.
    ///
    /// # Errors
    /// Returns error only if the store exists but cannot be read.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let records = self.store.records().map_err(AuthError::store)?;
        let mut candidates = records.iter().filter(|r| r.username == username).peekable();

        if candidates.peek().is_none() {
            // Unknown users cost one Argon2 verification like known ones.
            password::verify_dummy(password);
            return Ok(false);
        }

        Ok(candidates.any(|r| password::verify_password(password, &r.password_hash)))
    }

    /// Authenticate `session` if the credentials verify.
    ///
    /// On failure the session is left unchanged.
    ///
    /// # Errors
    /// Returns `InvalidCredentials` on any mismatch.
    pub fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if !self.verify(username, password)? {
            tracing::info!("Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        session.authenticate(username);
        tracing::info!("User {:?} logged in", username);
        Ok(())
    }

    /// Return `session` to anonymous.
    pub fn logout(&self, session: &mut Session) {
        if let Some(user) = session.username() {
            tracing::info!("User {:?} logged out", user);
        }
        session.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FlatFileCredentialStore;
    use tempfile::{tempdir, TempDir};

    fn service() -> (TempDir, AuthService<FlatFileCredentialStore>) {
        let temp = tempdir().expect("tempdir");
        let store = FlatFileCredentialStore::new(temp.path().join("users.txt"));
        (temp, AuthService::new(Arc::new(store)))
    }

    #[test]
    fn test_register_then_verify() {
        let (_temp, auth) = service();
        auth.register("alice", "secret1", "a@x.com").expect("register");

        assert!(auth.verify("alice", "secret1").expect("verify"));
        assert!(!auth.verify("alice", "wrong").expect("verify"));
        assert!(!auth.verify("bob", "secret1").expect("verify"));
    }

    #[test]
    fn test_verify_empty_store() {
        let (_temp, auth) = service();
        assert!(!auth.verify("alice", "secret1").expect("verify"));
    }

    #[test]
    fn test_stored_hash_is_not_plaintext() {
        let (temp, auth) = service();
        auth.register("alice", "secret1", "a@x.com").expect("register");

        let content = std::fs::read_to_string(temp.path().join("users.txt")).expect("read");
        assert!(content.starts_with("alice,$argon2id$"));
        assert!(content.trim_end().ends_with(",a@x.com"));
        assert!(!content.contains("secret1"));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (_temp, auth) = service();
        auth.register("alice", "secret1", "a@x.com").expect("register");

        let err = auth
            .register("alice", "other", "b@x.com")
            .expect_err("duplicate must fail");
        assert!(matches!(err, AuthError::UsernameTaken));
        assert!(!auth.verify("alice", "other").expect("verify"));
    }

    #[test]
    fn test_separator_characters_rejected() {
        let (_temp, auth) = service();
        assert!(matches!(
            auth.register("al,ice", "pw", "a@x.com"),
            Err(AuthError::InvalidField(_))
        ));
        assert!(matches!(
            auth.register("alice", "pw", "a@x.com\nbob"),
            Err(AuthError::InvalidField(_))
        ));
        // Commas in the password are fine: only the hash is stored.
        auth.register("carol", "p,w", "c@x.com").expect("register");
        assert!(auth.verify("carol", "p,w").expect("verify"));
    }

    #[test]
    fn test_empty_fields_accepted() {
        let (_temp, auth) = service();
        auth.register("", "", "").expect("register");
        assert!(auth.verify("", "").expect("verify"));
    }

    #[test]
    fn test_legacy_record_verifies() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("users.txt");
        std::fs::write(
            &path,
            "alice,5b11618c2e44027877d0cd0921ed166b9f176f50587fc91e7534dd2946db77d6,a@x.com\n",
        )
        .expect("write");
        let auth = AuthService::new(Arc::new(FlatFileCredentialStore::new(&path)));

        assert!(auth.verify("alice", "secret1").expect("verify"));
        assert!(!auth.verify("alice", "secret2").expect("verify"));
    }

    #[test]
    fn test_login_logout_session() {
        let (_temp, auth) = service();
        auth.register("alice", "secret1", "a@x.com").expect("register");
        let mut session = Session::new(false);

        let err = auth
            .login(&mut session, "alice", "wrong")
            .expect_err("wrong password");
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!session.is_authenticated());

        let err = auth
            .login(&mut session, "mallory", "secret1")
            .expect_err("unknown user");
        assert_eq!(err.to_string(), "Invalid credentials");

        auth.login(&mut session, "alice", "secret1").expect("login");
        assert_eq!(session.username(), Some("alice"));

        auth.logout(&mut session);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_concurrent_registration_single_winner() {
        let (temp, auth) = service();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let auth = auth.clone();
                std::thread::spawn(move || auth.register("alice", "pw", "a@x.com"))
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, AuthError::UsernameTaken)));

        let content = std::fs::read_to_string(temp.path().join("users.txt")).expect("read");
        assert_eq!(content.lines().filter(|l| l.starts_with("alice,")).count(), 1);
    }

    #[test]
    fn test_registration_survives_non_utf8_line() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("users.txt");
        let mut content =
            b"alice,5b11618c2e44027877d0cd0921ed166b9f176f50587fc91e7534dd2946db77d6,a@x.com\n"
                .to_vec();
        content.extend_from_slice(b"m\xffallory,deadbeef,m@x.com\n");
        std::fs::write(&path, content).expect("write");
        let auth = AuthService::new(Arc::new(FlatFileCredentialStore::new(&path)));

        assert!(auth.verify("alice", "secret1").expect("verify"));
        auth.register("bob", "pw", "b@x.com").expect("register");
        assert!(auth.verify("bob", "pw").expect("verify"));
    }
}
