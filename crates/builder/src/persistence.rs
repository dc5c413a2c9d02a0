//! Saving and loading the form and logic documents
//!
//! Both documents are written whole under their own key. A corrupt document
//! is not fatal on load: the repository logs it and falls back to a fresh
//! form or an empty logic store.

use contracts::domain::form::FormDefinition;
use contracts::shared::documents::{FORM_STORAGE_KEY, LOGIC_STORAGE_KEY};

use crate::config::{resolve_storage_dir, Config, StorageConfig};
use crate::error::BuilderResult;
use crate::logic_engine::LogicStore;
use crate::serialization;
use crate::storage::{FileStorage, KeyValueStorage};

pub struct Repository<S: KeyValueStorage> {
    storage: S,
    form_key: String,
    logic_key: String,
}

impl Repository<FileStorage> {
    /// File-backed repository in the configured storage directory
    pub fn open(config: &Config) -> BuilderResult<Self> {
        let dir = resolve_storage_dir(config);
        tracing::info!("Opening form storage in {}", dir.display());
        let storage = FileStorage::open(dir)?;
        Ok(Self::with_config(storage, &config.storage))
    }
}

impl<S: KeyValueStorage> Repository<S> {
    /// Repository using the default storage keys
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            form_key: FORM_STORAGE_KEY.to_string(),
            logic_key: LOGIC_STORAGE_KEY.to_string(),
        }
    }

    /// Repository using the keys from configuration
    pub fn with_config(storage: S, config: &StorageConfig) -> Self {
        Self {
            storage,
            form_key: config.form_key.clone(),
            logic_key: config.logic_key.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    pub fn save_form(&mut self, form: &FormDefinition) -> BuilderResult<()> {
        let payload = serialization::encode(form)?;
        self.storage.set_item(&self.form_key, &payload)?;
        tracing::info!("Saved form {} ({} fields)", form.id, form.len());
        Ok(())
    }

    /// Stored form, `None` when nothing was saved yet
    pub fn try_load_form(&self) -> BuilderResult<Option<FormDefinition>> {
        match self.storage.get_item(&self.form_key)? {
            Some(payload) => serialization::deserialize(&payload).map(Some),
            None => Ok(None),
        }
    }

    /// Stored form, or a fresh one when nothing usable is stored
    pub fn load_form(&self) -> BuilderResult<FormDefinition> {
        match self.try_load_form() {
            Ok(Some(form)) => {
                tracing::info!("Loaded form {} ({} fields)", form.id, form.len());
                Ok(form)
            }
            Ok(None) => Ok(FormDefinition::new()),
            Err(e) if e.is_malformed() => {
                tracing::warn!("Error loading saved form: {}", e);
                Ok(FormDefinition::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save_logic(&mut self, store: &LogicStore) -> BuilderResult<()> {
        let payload = serialization::encode_logic(store)?;
        self.storage.set_item(&self.logic_key, &payload)?;
        tracing::info!("Saved {} logic rule(s)", store.len());
        Ok(())
    }

    pub fn try_load_logic(&self) -> BuilderResult<Option<LogicStore>> {
        match self.storage.get_item(&self.logic_key)? {
            Some(payload) => serialization::deserialize_logic(&payload).map(Some),
            None => Ok(None),
        }
    }

    /// Stored logic rules, or an empty store when nothing usable is stored
    pub fn load_logic(&self) -> BuilderResult<LogicStore> {
        match self.try_load_logic() {
            Ok(Some(store)) => {
                tracing::info!("Loaded {} logic rule(s)", store.len());
                Ok(store)
            }
            Ok(None) => Ok(LogicStore::new()),
            Err(e) if e.is_malformed() => {
                tracing::warn!("Error loading logic rules: {}", e);
                Ok(LogicStore::new())
            }
            Err(e) => Err(e),
        }
    }
}
