use tfy_types::{Comment, Identity, Thread, UserId};

use crate::error::AuthError;

/// A resource with a recorded owner.
pub trait Owned {
    /// Noun used in error messages.
    const KIND: &'static str;

    /// The owning account, if one was recorded.
    fn owner(&self) -> Option<UserId>;
}

impl Owned for Thread {
    const KIND: &'static str = "thread";

    fn owner(&self) -> Option<UserId> {
        Some(self.owner_id)
    }
}

impl Owned for Comment {
    const KIND: &'static str = "comment";

    fn owner(&self) -> Option<UserId> {
        self.author_id
    }
}

/// Allow the operation only if `caller` owns `resource`.
///
/// Callers look the resource up first: a missing resource is reported as
/// not-found before this check runs. Resources with no recorded owner are
/// never modifiable.
pub fn require_ownership<R: Owned>(resource: &R, caller: &Identity) -> Result<(), AuthError> {
    match resource.owner() {
        Some(owner) if owner == caller.id => Ok(()),
        _ => {
            tracing::debug!(kind = R::KIND, caller = %caller.id.short_id(), "ownership check failed");
            Err(AuthError::Forbidden(R::KIND))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> Identity {
        Identity {
            id: UserId::new(),
            email: format!("{name}@x.com"),
            username: Some(name.into()),
        }
    }

    #[test]
    fn owner_may_modify_thread() {
        let alice = identity("alice");
        let thread = Thread::new(&alice, "hi");
        assert!(require_ownership(&thread, &alice).is_ok());
    }

    #[test]
    fn stranger_forbidden_on_thread() {
        let alice = identity("alice");
        let bob = identity("bob");
        let thread = Thread::new(&alice, "hi");
        assert_eq!(
            require_ownership(&thread, &bob).unwrap_err(),
            AuthError::Forbidden("thread")
        );
    }

    #[test]
    fn same_email_different_id_is_forbidden() {
        let alice = identity("alice");
        let mut impostor = identity("alice");
        impostor.email = alice.email.clone();
        let thread = Thread::new(&alice, "hi");
        assert!(require_ownership(&thread, &impostor).is_err());
    }

    #[test]
    fn comment_author_checks() {
        let alice = identity("alice");
        let bob = identity("bob");
        let comment = Comment::new(&alice, "first");
        assert!(require_ownership(&comment, &alice).is_ok());
        assert_eq!(
            require_ownership(&comment, &bob).unwrap_err(),
            AuthError::Forbidden("comment")
        );
    }

    #[test]
    fn unattributed_comment_is_forbidden_to_everyone() {
        let alice = identity("alice");
        let mut comment = Comment::new(&alice, "legacy");
        comment.author_id = None;
        assert!(require_ownership(&comment, &alice).is_err());
    }
}
