use gloo_storage::{LocalStorage, Storage};

/// Persistent home of the session token. Writes are best effort, a failed write only costs the
/// user a login on the next visit.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// [TokenStore] backed by the browser's local storage under a single fixed key
#[derive(Clone)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self { key: key.into() }
    }
}

/// Token held in a raw storage value. Blank values count as no token.
fn stored_token(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        match LocalStorage::raw().get_item(&self.key) {
            Ok(raw) => stored_token(raw),
            Err(error) => {
                log::warn!("Could not read token under `{}`. {error:?}", self.key);
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Err(error) = LocalStorage::raw().set_item(&self.key, token) {
            log::error!("Could not persist session token. {error:?}");
        }
    }

    fn clear(&self) {
        if let Err(error) = LocalStorage::raw().remove_item(&self.key) {
            log::error!("Could not remove session token. {error:?}");
        }
    }
}
