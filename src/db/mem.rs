use anyhow::Result;
use std::{cell::RefCell, collections::HashMap};

use crate::db::KvStore;

/// In-memory stand-in for the SQLite store.
#[derive(Default)]
pub(crate) struct MemStore {
    slots: RefCell<HashMap<String, String>>,
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
