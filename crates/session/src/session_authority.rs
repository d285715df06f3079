//! SessionAuthority - Keeps a session's access context in step with identity

use crate::access_context::AccessContext;
use crate::access_core::AccessCore;
use shared::UserId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Identity change reported by the session provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    SignedIn(UserId),
    SignedOut,
}

/// Owns the access context of one session
///
/// Every identity change bumps the generation. A resolution that finishes
/// after a newer change (or after teardown) is dropped, so the context only
/// ever reflects the latest identity.
pub struct SessionAuthority {
    core: Arc<AccessCore>,
    generation: AtomicU64,
    context: Mutex<AccessContext>,
}

impl SessionAuthority {
    /// Start a session with nobody signed in
    pub fn new(core: Arc<AccessCore>) -> Self {
        let context = core.anonymous();
        Self {
            core,
            generation: AtomicU64::new(0),
            context: Mutex::new(context),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AccessContext> {
        self.context.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current access context
    pub fn context(&self) -> AccessContext {
        self.lock().clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Re-resolve after an identity change
    ///
    /// Returns the context in force once this call finishes. If a newer
    /// identity change overtook this one, that is the newer context.
    pub async fn identity_changed(&self, event: IdentityEvent) -> AccessContext {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let next = match event {
            IdentityEvent::SignedOut => self.core.anonymous(),
            IdentityEvent::SignedIn(user_id) => {
                let resolution = self.core.resolve(&user_id).await;
                self.core.context_for(Some(user_id), resolution.role)
            }
        };

        self.commit(generation, next)
    }

    /// End the session; in-flight resolutions are discarded
    pub fn teardown(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.commit(generation, self.core.anonymous());
        debug!(generation, "session torn down");
    }

    fn commit(&self, generation: u64, next: AccessContext) -> AccessContext {
        let mut current = self.lock();

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                generation,
                latest = self.generation.load(Ordering::SeqCst),
                "discarding stale resolution"
            );
            return current.clone();
        }

        if current.role() != next.role() || current.user_id() != next.user_id() {
            info!(
                user_id = next.user_id().map(|u| u.as_str()).unwrap_or("-"),
                from = current.role().map(|r| r.as_str()).unwrap_or("none"),
                to = next.role().map(|r| r.as_str()).unwrap_or("none"),
                "session role changed"
            );
            self.core
                .audit()
                .log_role_change(next.user_id(), current.role(), next.role());
        }

        *current = next.clone();
        next
    }
}
