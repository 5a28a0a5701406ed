//! Local account directory: phone number -> profile, plus the single
//! "current user" session slot. Conflict and bad-credential outcomes are
//! plain `false` returns; callers turn them into messages.

use anyhow::Result;
use chrono::Local;
use std::collections::HashMap;

use crate::{
    db::{KvStore, get_slot, set_slot},
    domain::user::UserProfile,
};

mod digest;

use digest::{hash_password, verify_password};

pub(crate) const USERS_KEY: &str = "wishlink_users";
pub(crate) const CURRENT_USER_KEY: &str = "wishlink_current_user";

fn load_users(store: &dyn KvStore) -> Result<HashMap<String, UserProfile>> {
    get_slot(store, USERS_KEY, HashMap::new())
}

fn persist_users(store: &dyn KvStore, users: &HashMap<String, UserProfile>) -> Result<()> {
    set_slot(store, USERS_KEY, users)
}

fn session(store: &dyn KvStore) -> Result<Option<String>> {
    get_slot(store, CURRENT_USER_KEY, None)
}

fn set_session(store: &dyn KvStore, phone: Option<&str>) -> Result<()> {
    set_slot(store, CURRENT_USER_KEY, &phone)
}

pub(crate) fn is_registered(store: &dyn KvStore, phone: &str) -> Result<bool> {
    Ok(load_users(store)?.contains_key(phone))
}

/// `false` when the phone already has a profile. On success the new
/// account becomes the session user.
pub(crate) fn register(store: &dyn KvStore, phone: &str, password: &str) -> Result<bool> {
    let mut users = load_users(store)?;
    if users.contains_key(phone) {
        return Ok(false);
    }
    users.insert(
        phone.to_string(),
        UserProfile {
            phone: phone.to_string(),
            password_digest: hash_password(password),
            created_at: Local::now().to_rfc3339(),
        },
    );
    persist_users(store, &users)?;
    set_session(store, Some(phone))?;
    Ok(true)
}

/// Unknown phone and wrong password fail the same way.
pub(crate) fn login(store: &dyn KvStore, phone: &str, password: &str) -> Result<bool> {
    let users = load_users(store)?;
    let Some(user) = users.get(phone) else {
        return Ok(false);
    };
    if !verify_password(password, &user.password_digest) {
        return Ok(false);
    }
    set_session(store, Some(phone))?;
    Ok(true)
}

pub(crate) fn logout(store: &dyn KvStore) -> Result<()> {
    set_session(store, None)
}

/// Resolves the session phone against the directory. A session pointing
/// at a phone with no profile counts as logged out.
pub(crate) fn current_user(store: &dyn KvStore) -> Result<Option<UserProfile>> {
    let Some(phone) = session(store)? else {
        return Ok(None);
    };
    Ok(load_users(store)?.remove(&phone))
}

pub(crate) fn change_password(
    store: &dyn KvStore,
    phone: &str,
    old_password: &str,
    new_password: &str,
) -> Result<bool> {
    let mut users = load_users(store)?;
    let Some(user) = users.get_mut(phone) else {
        return Ok(false);
    };
    if !verify_password(old_password, &user.password_digest) {
        return Ok(false);
    }
    user.password_digest = hash_password(new_password);
    persist_users(store, &users)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mem::MemStore;

    #[test]
    fn register_login_change_password_sequence() {
        let store = MemStore::default();
        assert!(register(&store, "5551234567", "abc123").unwrap());
        assert!(login(&store, "5551234567", "abc123").unwrap());
        assert!(!login(&store, "5551234567", "wrong1").unwrap());
        assert!(change_password(&store, "5551234567", "abc123", "xyz789").unwrap());
        assert!(!login(&store, "5551234567", "abc123").unwrap());
        assert!(login(&store, "5551234567", "xyz789").unwrap());
    }

    #[test]
    fn register_rejects_existing_phone() {
        let store = MemStore::default();
        assert!(register(&store, "5551234567", "abc123").unwrap());
        assert!(!register(&store, "5551234567", "other42").unwrap());
        // original credentials still work
        assert!(login(&store, "5551234567", "abc123").unwrap());
    }

    #[test]
    fn register_and_login_set_the_session() {
        let store = MemStore::default();
        register(&store, "5551234567", "abc123").unwrap();
        let user = current_user(&store).unwrap().unwrap();
        assert_eq!(user.phone, "5551234567");

        logout(&store).unwrap();
        assert!(current_user(&store).unwrap().is_none());

        login(&store, "5551234567", "abc123").unwrap();
        assert!(current_user(&store).unwrap().is_some());
    }

    #[test]
    fn failed_login_leaves_session_untouched() {
        let store = MemStore::default();
        register(&store, "5551234567", "abc123").unwrap();
        logout(&store).unwrap();
        assert!(!login(&store, "5551234567", "nope99").unwrap());
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn dangling_session_resolves_to_none() {
        let store = MemStore::default();
        set_slot(&store, CURRENT_USER_KEY, &Some("5550000000")).unwrap();
        assert!(current_user(&store).unwrap().is_none());
    }

    #[test]
    fn change_password_requires_matching_old() {
        let store = MemStore::default();
        register(&store, "5551234567", "abc123").unwrap();
        assert!(!change_password(&store, "5551234567", "bad000", "xyz789").unwrap());
        assert!(!change_password(&store, "5559999999", "abc123", "xyz789").unwrap());
        assert!(login(&store, "5551234567", "abc123").unwrap());
    }

    #[test]
    fn is_registered_reflects_directory() {
        let store = MemStore::default();
        assert!(!is_registered(&store, "5551234567").unwrap());
        register(&store, "5551234567", "abc123").unwrap();
        assert!(is_registered(&store, "5551234567").unwrap());
    }
}
