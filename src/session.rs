//! Session state machine: anonymous or authenticated, nothing between.
//!
//! There is no refreshing or expired state. A failed identity check is
//! indistinguishable from never having logged in, and no retry happens.

use crate::types::User;

/// The client's belief about who is logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated(User),
}

impl Session {
    /// Transition to authenticated with the server-returned user.
    /// Valid from either state (a re-login replaces the bound user).
    pub fn sign_in(&mut self, user: User) {
        *self = Session::Authenticated(user);
    }

    /// Transition to anonymous. Valid from either state.
    pub fn sign_out(&mut self) {
        *self = Session::Anonymous;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// The bound user, if authenticated.
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::Anonymous
    }
}
