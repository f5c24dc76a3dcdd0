use std::sync::Arc;

use crate::{
    constants::SESSION_STORAGE_KEY,
    errors::AppResult,
    models::{domain::Identity, dto::request::LoginRequest},
    repositories::{IdentityRepository, KeyValueStore},
};

pub struct IdentityStore {
    identity: Identity,
    repository: IdentityRepository,
    store: Arc<dyn KeyValueStore>,
}

impl IdentityStore {
    /// Loads the persisted identity; a missing or malformed record means logged out.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let repository = IdentityRepository::identities(Arc::clone(&store));
        let identity = repository.load().unwrap_or_default();
        if identity.is_logged_in {
            log::info!("Restored login for {}", identity.name);
        }
        Self {
            identity,
            repository,
            store,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_logged_in
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Logs in under the trimmed `name`. Validation failures leave the identity unchanged.
    pub fn login(&mut self, name: &str) -> AppResult<&Identity> {
        let request = LoginRequest::new(name);
        request.check()?;

        let identity = Identity::logged_in(&request.name);
        if let Err(e) = self.repository.save(&identity) {
            log::error!("Failed to persist identity: {}", e);
        }
        self.identity = identity;
        log::info!("Logged in as {}", self.identity.name);
        Ok(&self.identity)
    }

    /// Clears the identity and abandons any persisted quiz session.
    pub fn logout(&mut self) {
        log::info!("Logging out {}", self.identity.name);
        self.identity = Identity::default();
        if let Err(e) = self.repository.clear() {
            log::error!("Failed to clear identity record: {}", e);
        }
        if let Err(e) = self.store.remove(SESSION_STORAGE_KEY) {
            log::error!("Failed to clear quiz record: {}", e);
        }
    }
}
