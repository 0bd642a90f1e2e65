use log::warn;
use std::env;

/// Credential and profile claims handed over by the identity provider.
///
/// Loaded once at process start and passed explicitly into every
/// authenticated API call; nothing reads tokens from global state.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub name: String,
    pub email: String,
    pub groups: Vec<String>,
}

impl Session {
    /// Reads the session from the environment (populated by `.env` in
    /// development, by the login wrapper in production).
    pub fn from_env() -> Session {
        let token = env::var("BIRDTAG_TOKEN").unwrap_or_default();
        if token.is_empty() {
            warn!("BIRDTAG_TOKEN is not set; authenticated calls will be anonymous");
        }

        let name = env::var("BIRDTAG_NAME").unwrap_or_else(|_| "Bird Enthusiast".to_string());
        let email = env::var("BIRDTAG_EMAIL").unwrap_or_default();
        let groups = env::var("BIRDTAG_GROUPS")
            .unwrap_or_default()
            .split(',')
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        Session {
            token,
            name,
            email,
            groups,
        }
    }

    pub fn bearer(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(self.token.as_str())
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.groups.iter().any(|g| g == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_groups(groups: &[&str]) -> Session {
        Session {
            token: "tok".to_string(),
            name: "Tester".to_string(),
            email: "t@example.com".to_string(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn test_has_role() {
        let session = session_with_groups(&["admins", "uploaders"]);
        assert!(session.has_role("admins"));
        assert!(!session.has_role("viewers"));
    }

    #[test]
    fn test_bearer_is_none_when_token_empty() {
        let mut session = session_with_groups(&[]);
        assert!(session.bearer().is_some());
        session.token.clear();
        assert!(session.bearer().is_none());
    }
}
