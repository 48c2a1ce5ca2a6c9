use std::sync::Arc;

use chrono::Utc;
use tfy_store::ThreadStore;
use tfy_types::{Identity, LikeToggle, ThreadId};

use crate::error::{BoardError, BoardResult};

/// Toggles the caller's like on a thread.
///
/// The presence check and the push or pull run as one store operation, so
/// concurrent toggles by the same caller alternate instead of both adding.
#[derive(Clone)]
pub struct LikeEngine {
    threads: Arc<dyn ThreadStore>,
}

impl LikeEngine {
    pub fn new(threads: Arc<dyn ThreadStore>) -> Self {
        Self { threads }
    }

    pub async fn toggle(&self, caller: &Identity, thread: &ThreadId) -> BoardResult<LikeToggle> {
        let toggled = self
            .threads
            .toggle_like(thread, &caller.id, Utc::now())
            .await?
            .ok_or(BoardError::NotFound("thread"))?;
        tracing::debug!(
            thread = %thread.short_id(),
            user = %caller.id.short_id(),
            liked = toggled.liked,
            "like toggled"
        );
        Ok(toggled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfy_store::InMemoryThreadStore;
    use tfy_types::{Thread, UserId};

    fn identity(name: &str) -> Identity {
        Identity {
            id: UserId::new(),
            email: format!("{name}@x.com"),
            username: None,
        }
    }

    async fn setup() -> (LikeEngine, Arc<InMemoryThreadStore>, ThreadId) {
        let store = Arc::new(InMemoryThreadStore::new());
        let thread = Thread::new(&identity("owner"), "hi");
        let id = thread.id;
        store.insert(thread).await.unwrap();
        (LikeEngine::new(store.clone()), store, id)
    }

    #[tokio::test]
    async fn toggle_flips_membership() {
        let (likes, _, id) = setup().await;
        let alice = identity("alice");

        let first = likes.toggle(&alice, &id).await.unwrap();
        assert!(first.liked);
        assert_eq!(first.likes.len(), 1);
        assert_eq!(first.likes[0].liked_by, alice.id);

        let second = likes.toggle(&alice, &id).await.unwrap();
        assert!(!second.liked);
        assert!(second.likes.is_empty());
    }

    #[tokio::test]
    async fn likes_are_per_user() {
        let (likes, _, id) = setup().await;
        likes.toggle(&identity("alice"), &id).await.unwrap();
        let result = likes.toggle(&identity("bob"), &id).await.unwrap();
        assert!(result.liked);
        assert_eq!(result.likes.len(), 2);
    }

    #[tokio::test]
    async fn toggle_on_missing_thread() {
        let (likes, _, _) = setup().await;
        let err = likes.toggle(&identity("alice"), &ThreadId::new()).await.unwrap_err();
        assert_eq!(err, BoardError::NotFound("thread"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn even_concurrent_toggles_leave_no_like() {
        let (likes, store, id) = setup().await;
        let alice = identity("alice");

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let likes = likes.clone();
                let alice = alice.clone();
                tokio::spawn(async move { likes.toggle(&alice, &id).await })
            })
            .collect();
        let mut liked = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().liked {
                liked += 1;
            }
        }

        assert_eq!(liked, 25);
        let thread = store.find(&id).await.unwrap().unwrap();
        assert!(thread.like_by(&alice.id).is_none());
        assert!(thread.likes.is_empty());
    }
}
