// session.rs — Client-side session state.
//
// Two values survive between calls: the CSRF token and the current workspace
// id. The token comes only from a `/user/me` fetch. The workspace id comes
// from that fetch, from workspace bootstrap, or from an explicit local
// override that the server never hears about.

use vista_model::UserMe;

use crate::transport::{Header, CSRF_TOKEN_HEADER, WORKSPACE_ID_HEADER};

/// Session values held by one client instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    csrf_token: Option<String>,
    current_workspace_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn current_workspace_id(&self) -> Option<&str> {
        self.current_workspace_id.as_deref()
    }

    /// Overwrite both values from a session fetch, including with `None`.
    pub(crate) fn apply_user_me(&mut self, me: &UserMe) {
        self.csrf_token = me.csrf_token.clone();
        self.current_workspace_id = me.current_workspace_id.clone();
    }

    pub(crate) fn set_current_workspace_id(&mut self, id: impl Into<String>) {
        self.current_workspace_id = Some(id.into());
    }

    /// Headers that carry this session on a request.
    pub fn headers(&self) -> Vec<Header> {
        let mut headers = Vec::with_capacity(2);
        if let Some(token) = &self.csrf_token {
            headers.push(Header::new(CSRF_TOKEN_HEADER, token.clone()));
        }
        if let Some(id) = &self.current_workspace_id {
            headers.push(Header::new(WORKSPACE_ID_HEADER, id.clone()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_sends_no_headers() {
        assert!(Session::new().headers().is_empty());
    }

    #[test]
    fn user_me_overwrites_both_values() {
        let mut session = Session::new();
        session.set_current_workspace_id("local");

        session.apply_user_me(&UserMe {
            csrf_token: Some("tok".to_string()),
            current_workspace_id: None,
            ..UserMe::default()
        });

        assert_eq!(session.csrf_token(), Some("tok"));
        assert_eq!(session.current_workspace_id(), None);
        assert_eq!(
            session.headers(),
            vec![Header::new(CSRF_TOKEN_HEADER, "tok")]
        );
    }

    #[test]
    fn override_only_touches_workspace_id() {
        let mut session = Session::new();
        session.apply_user_me(&UserMe {
            csrf_token: Some("tok".to_string()),
            current_workspace_id: Some("w1".to_string()),
            ..UserMe::default()
        });
        session.set_current_workspace_id("w2");

        assert_eq!(session.csrf_token(), Some("tok"));
        assert_eq!(session.current_workspace_id(), Some("w2"));
    }
}
