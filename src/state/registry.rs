//! The session registry: display name -> online session.
//!
//! One `RwLock` guards the whole map. Every mutation takes it exclusively,
//! every read takes it shared, and nothing touches the map any other way.
//! Display names are only changed while the exclusive lock is held, so a
//! reader can never see a key that differs from its session's name.

use super::Session;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

/// Whether `name` is shaped like a remote address.
///
/// Fresh sessions are keyed by their address, so no rename may take such a
/// name or a later connection from that address would collide with it.
pub fn is_reserved(name: &str) -> bool {
    name.parse::<SocketAddr>().is_ok()
}

/// Online sessions indexed by display name.
#[derive(Debug, Default)]
pub struct Registry {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session under its current display name.
    ///
    /// No uniqueness check: a new session is named after its remote address,
    /// which no other live connection can share and no rename can take.
    pub fn add(&self, session: &Arc<Session>) {
        let mut sessions = self.sessions.write();
        sessions.insert(session.name(), Arc::clone(session));
    }

    /// Remove a session. Returns `false` if it was not registered.
    ///
    /// The entry is only removed if it still points at this very session, so
    /// a stale handle can never evict whoever holds the name now.
    pub fn remove(&self, session: &Arc<Session>) -> bool {
        let mut sessions = self.sessions.write();
        let name = session.name();
        match sessions.get(&name) {
            Some(current) if Arc::ptr_eq(current, session) => {
                sessions.remove(&name);
                true
            }
            _ => false,
        }
    }

    /// Find an online session by display name.
    pub fn lookup(&self, name: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(name).cloned()
    }

    /// Move a session from its current name to `new_name`.
    ///
    /// Fails without touching anything if `new_name` is taken (including by
    /// the session itself), is [reserved](is_reserved), or if the session is
    /// not registered. The check, the re-keying and the name update happen in
    /// one critical section.
    pub fn rename(&self, session: &Arc<Session>, new_name: &str) -> bool {
        if is_reserved(new_name) {
            return false;
        }
        let mut sessions = self.sessions.write();
        if sessions.contains_key(new_name) {
            return false;
        }

        let old_name = session.name();
        match sessions.get(&old_name) {
            Some(current) if Arc::ptr_eq(current, session) => {}
            _ => return false,
        }

        sessions.remove(&old_name);
        session.set_name(new_name);
        sessions.insert(new_name.to_string(), Arc::clone(session));
        true
    }

    /// Map every online session under a single lock acquisition.
    ///
    /// Names are read while the lock is held, so the result never mixes
    /// states from before and after a concurrent join, leave or rename.
    pub fn snapshot<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(&Arc<Session>) -> T,
    {
        self.sessions.read().values().map(f).collect()
    }

    /// Visit every online session while holding the lock.
    ///
    /// No session can join, leave or be renamed until `f` has seen them all.
    /// `f` must not call back into the registry. Returns the number visited.
    pub fn for_each<F>(&self, mut f: F) -> usize
    where
        F: FnMut(&Arc<Session>),
    {
        let sessions = self.sessions.read();
        for session in sessions.values() {
            f(session);
        }
        sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    #[cfg(test)]
    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sessions.read().keys().cloned().collect();
        names.sort();
        names
    }

    #[cfg(test)]
    /// Whether every key equals the display name of its session.
    pub fn is_consistent(&self) -> bool {
        self.sessions
            .read()
            .iter()
            .all(|(name, session)| *name == session.name())
    }
}
