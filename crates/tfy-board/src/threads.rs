use std::sync::Arc;

use tfy_gate::require_ownership;
use tfy_store::ThreadStore;
use tfy_types::{Comment, CommentId, Identity, Thread, ThreadId, ThreadPatch};

use crate::error::{BoardError, BoardResult};
use crate::requests::{require_text, NewComment, NewThread};

/// Lifecycle of thread aggregates and their embedded comments.
///
/// Every mutation confirms the thread exists before checking ownership, so
/// a stranger probing a missing id sees `NotFound`, never `Forbidden`.
#[derive(Clone)]
pub struct ThreadManager {
    threads: Arc<dyn ThreadStore>,
}

impl ThreadManager {
    pub fn new(threads: Arc<dyn ThreadStore>) -> Self {
        Self { threads }
    }

    /// Create a thread owned by `caller`.
    pub async fn create(&self, caller: &Identity, request: NewThread) -> BoardResult<Thread> {
        require_text(&request.text, "thread")?;
        let thread = Thread::new(caller, request.text);
        self.threads.insert(thread.clone()).await?;
        tracing::info!(thread = %thread.id.short_id(), owner = %caller.id.short_id(), "thread created");
        Ok(thread)
    }

    pub async fn list(&self) -> BoardResult<Vec<Thread>> {
        Ok(self.threads.list().await?)
    }

    pub async fn show(&self, id: &ThreadId) -> BoardResult<Thread> {
        self.threads
            .find(id)
            .await?
            .ok_or(BoardError::NotFound("thread"))
    }

    /// Apply `patch` to a thread the caller owns.
    pub async fn update(
        &self,
        caller: &Identity,
        id: &ThreadId,
        patch: &ThreadPatch,
    ) -> BoardResult<Thread> {
        let thread = self.show(id).await?;
        require_ownership(&thread, caller)?;
        if let Some(text) = &patch.text {
            require_text(text, "thread")?;
        }

        let updated = self
            .threads
            .apply_patch(id, patch)
            .await?
            .ok_or(BoardError::NotFound("thread"))?;
        tracing::info!(thread = %id.short_id(), "thread updated");
        Ok(updated)
    }

    /// Delete a thread the caller owns, along with its comments and likes.
    pub async fn delete(&self, caller: &Identity, id: &ThreadId) -> BoardResult<()> {
        let thread = self.show(id).await?;
        require_ownership(&thread, caller)?;

        if !self.threads.delete(id).await? {
            return Err(BoardError::NotFound("thread"));
        }
        tracing::info!(thread = %id.short_id(), "thread deleted");
        Ok(())
    }

    /// Append a comment by `caller`. Any authenticated user may comment.
    pub async fn add_comment(
        &self,
        caller: &Identity,
        id: &ThreadId,
        request: NewComment,
    ) -> BoardResult<Comment> {
        self.show(id).await?;
        require_text(&request.text, "comment")?;
        let comment = Comment::new(caller, request.text);
        if !self.threads.push_comment(id, comment.clone()).await? {
            return Err(BoardError::NotFound("thread"));
        }
        tracing::debug!(thread = %id.short_id(), comment = %comment.id.short_id(), "comment added");
        Ok(comment)
    }

    /// Remove a comment the caller wrote.
    pub async fn remove_comment(
        &self,
        caller: &Identity,
        id: &ThreadId,
        comment_id: &CommentId,
    ) -> BoardResult<()> {
        let thread = self.show(id).await?;
        let comment = thread
            .comment(comment_id)
            .ok_or(BoardError::NotFound("comment"))?;
        require_ownership(comment, caller)?;

        self.threads
            .pull_comment(id, comment_id)
            .await?
            .ok_or(BoardError::NotFound("comment"))?;
        tracing::debug!(thread = %id.short_id(), comment = %comment_id.short_id(), "comment removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfy_store::InMemoryThreadStore;
    use tfy_types::UserId;

    fn identity(name: &str) -> Identity {
        Identity {
            id: UserId::new(),
            email: format!("{name}@x.com"),
            username: Some(name.into()),
        }
    }

    fn manager() -> ThreadManager {
        ThreadManager::new(Arc::new(InMemoryThreadStore::new()))
    }

    fn text(s: &str) -> NewThread {
        NewThread { text: s.into() }
    }

    #[tokio::test]
    async fn create_binds_owner() {
        let threads = manager();
        let alice = identity("alice");
        let thread = threads.create(&alice, text("hi")).await.unwrap();
        assert_eq!(thread.owner_id, alice.id);
        assert_eq!(thread.username.as_deref(), Some("alice"));
        assert_eq!(threads.show(&thread.id).await.unwrap(), thread);
        assert_eq!(threads.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_blank_text() {
        let threads = manager();
        let err = threads.create(&identity("alice"), text("  ")).await.unwrap_err();
        assert!(matches!(err, BoardError::BadRequest(_)));
    }

    #[tokio::test]
    async fn only_owner_updates_and_deletes() {
        let threads = manager();
        let alice = identity("alice");
        let bob = identity("bob");
        let thread = threads.create(&alice, text("hi")).await.unwrap();
        let patch = ThreadPatch {
            text: Some("edited".into()),
        };

        assert_eq!(
            threads.update(&bob, &thread.id, &patch).await.unwrap_err(),
            BoardError::Forbidden("thread")
        );
        assert_eq!(
            threads.delete(&bob, &thread.id).await.unwrap_err(),
            BoardError::Forbidden("thread")
        );

        let updated = threads.update(&alice, &thread.id, &patch).await.unwrap();
        assert_eq!(updated.text, "edited");
        assert_eq!(updated.owner_id, alice.id);

        threads.delete(&alice, &thread.id).await.unwrap();
        assert_eq!(
            threads.show(&thread.id).await.unwrap_err(),
            BoardError::NotFound("thread")
        );
    }

    #[tokio::test]
    async fn missing_thread_is_not_found_before_forbidden() {
        let threads = manager();
        let bob = identity("bob");
        let ghost = ThreadId::new();
        assert_eq!(
            threads.delete(&bob, &ghost).await.unwrap_err(),
            BoardError::NotFound("thread")
        );
        assert_eq!(
            threads
                .update(&bob, &ghost, &ThreadPatch::default())
                .await
                .unwrap_err(),
            BoardError::NotFound("thread")
        );
    }

    #[tokio::test]
    async fn comment_lifecycle_and_ownership() {
        let threads = manager();
        let alice = identity("alice");
        let bob = identity("bob");
        let thread = threads.create(&alice, text("hi")).await.unwrap();

        let comment = threads
            .add_comment(&bob, &thread.id, NewComment { text: "nice".into() })
            .await
            .unwrap();
        assert_eq!(comment.author_id, Some(bob.id));

        // The thread owner is not the comment author.
        assert_eq!(
            threads
                .remove_comment(&alice, &thread.id, &comment.id)
                .await
                .unwrap_err(),
            BoardError::Forbidden("comment")
        );

        threads.remove_comment(&bob, &thread.id, &comment.id).await.unwrap();
        assert_eq!(
            threads
                .remove_comment(&bob, &thread.id, &comment.id)
                .await
                .unwrap_err(),
            BoardError::NotFound("comment")
        );
        assert!(threads.show(&thread.id).await.unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn comment_on_missing_thread() {
        let threads = manager();
        let err = threads
            .add_comment(&identity("bob"), &ThreadId::new(), NewComment { text: "x".into() })
            .await
            .unwrap_err();
        assert_eq!(err, BoardError::NotFound("thread"));

        let err = threads
            .add_comment(&identity("bob"), &ThreadId::new(), NewComment { text: "".into() })
            .await
            .unwrap_err();
        assert_eq!(err, BoardError::NotFound("thread"));
    }
}
