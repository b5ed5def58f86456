/// Session state as reported by the sign-in provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Loading,
    Authenticated {
        token: String,
        user: Option<String>,
    },
    Unauthenticated,
    /// Provider reported an error; the UI blocks behind a retry screen.
    Error(String),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    /// Bearer token, only while authenticated.
    pub fn token(&self) -> Option<&str> {
        match self {
            AuthState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Avatar initial for the header ("A" when the profile has no name).
    pub fn initial(&self) -> char {
        match self {
            AuthState::Authenticated {
                user: Some(name), ..
            } => name
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('A'),
            _ => 'A',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        let state = AuthState::default();
        assert_eq!(state, AuthState::Loading);
        assert!(!state.is_authenticated());
        assert_eq!(state.token(), None);
    }

    #[test]
    fn test_authenticated_exposes_token() {
        let state = AuthState::Authenticated {
            token: "abc".to_string(),
            user: Some("bob".to_string()),
        };
        assert!(state.is_authenticated());
        assert_eq!(state.token(), Some("abc"));
        assert_eq!(state.initial(), 'B');
    }

    #[test]
    fn test_error_has_no_token() {
        let state = AuthState::Error("boom".to_string());
        assert_eq!(state.token(), None);
        assert_eq!(state.initial(), 'A');
    }
}
