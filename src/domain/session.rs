//! Session gate: which view the current interactive session may see.

/// The view a session is entitled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Introductory screen, shown until dismissed
    Welcome,
    /// Login / registration
    Gate,
    /// Clinical form and prediction result
    Prediction,
}

/// Per-process session state.
///
/// Owned by the UI and passed to services explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    welcome_enabled: bool,
    welcome_shown: bool,
    user: Option<String>,
}

impl Session {
    /// Start an anonymous session.
    ///
    /// With `show_welcome = false` the introductory screen is skipped entirely.
    #[must_use]
    pub fn new(show_welcome: bool) -> Self {
        Self {
            welcome_enabled: show_welcome,
            welcome_shown: !show_welcome,
            user: None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn welcome_shown(&self) -> bool {
        self.welcome_shown
    }

    /// Name of the logged-in user.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Dismiss the introductory screen. Independent of authentication.
    pub fn dismiss_welcome(&mut self) {
        self.welcome_shown = true;
    }

    /// Mark the session as authenticated for `username`.
    pub fn authenticate(&mut self, username: impl Into<String>) {
        self.user = Some(username.into());
    }

    /// Return to anonymous. The introductory screen is shown again if enabled.
    pub fn logout(&mut self) {
        self.user = None;
        if self.welcome_enabled {
            self.welcome_shown = false;
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        if !self.welcome_shown {
            View::Welcome
        } else if self.is_authenticated() {
            View::Prediction
        } else {
            View::Gate
        }
    }
}
