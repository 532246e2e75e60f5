//! Session store
//!
//! Holds the signed-in user and notifies subscribers on every change.
//! Listeners run synchronously on the thread that called [`SessionStore::set`],
//! in registration order, after the store lock is released; a listener may
//! therefore read the store or even unsubscribe others.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use kernel::id::UserId;

use crate::models::User;

/// Snapshot of the authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
        }
    }
}

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

#[derive(Default)]
struct Inner {
    state: Session,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared, cloneable handle to the session state
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot
    pub fn get(&self) -> Session {
        lock(&self.inner).state.clone()
    }

    pub fn user(&self) -> Option<User> {
        lock(&self.inner).state.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.inner).state.is_authenticated
    }

    /// Replace the whole state and notify listeners
    pub fn set(&self, state: Session) {
        self.apply(|current| {
            *current = state;
            Some(())
        });
    }

    /// Mutate the state under the lock, then notify outside it
    fn apply<R>(&self, change: impl FnOnce(&mut Session) -> Option<R>) -> Option<R> {
        let (result, snapshot, listeners) = {
            let mut inner = lock(&self.inner);
            let result = change(&mut inner.state)?;
            let listeners: Vec<Listener> =
                inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (result, inner.state.clone(), listeners)
        };

        for listener in listeners {
            listener(&snapshot);
        }
        Some(result)
    }

    pub fn sign_in(&self, user: User) {
        self.set(Session::signed_in(user));
    }

    /// Back to the anonymous state
    pub fn logout(&self) {
        self.set(Session::default());
    }

    /// Apply an optimistic change to the signed-in user
    ///
    /// Returns the updated user, or `None` (without notifying) when nobody is
    /// signed in.
    pub fn patch_user(&self, update: impl FnOnce(&mut User)) -> Option<User> {
        self.apply(|state| {
            let user = state.user.as_mut()?;
            update(user);
            Some(user.clone())
        })
    }

    /// [`patch_user`](Self::patch_user), applied only while `id` is the
    /// signed-in user
    pub fn patch_user_if(&self, id: UserId, update: impl FnOnce(&mut User)) -> Option<User> {
        self.apply(|state| {
            let user = state.user.as_mut().filter(|u| u.id == id)?;
            update(user);
            Some(user.clone())
        })
    }

    /// Register a listener; it stays active until the guard is dropped
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) -> Subscription {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));

        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

/// Guard returned by [`SessionStore::subscribe`]
pub struct Subscription {
    store: Weak<Mutex<Inner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            lock(&inner).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
