/// Holds the bearer credential for one client process.
///
/// The process is the unit of isolation (the equivalent of one browser tab):
/// two concurrently running clients are independent sessions with no shared
/// state. At most one credential exists at a time, it never persists, and
/// there is no client-side expiry — invalidity is discovered reactively when
/// an authenticated call fails.
#[derive(Debug, Default)]
pub struct SessionStore {
    token: Option<String>,
}

impl SessionStore {
    pub fn set(&mut self, credential: impl Into<String>) {
        self.token = Some(credential.into());
    }

    pub fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    /// Absence of a credential is the logged-out state.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;

    #[test]
    fn holds_at_most_one_credential() {
        let mut store = SessionStore::default();
        assert!(!store.is_logged_in());

        store.set("first");
        store.set("second");
        assert_eq!(store.get(), Some("second"));
    }

    #[test]
    fn clear_returns_to_logged_out() {
        let mut store = SessionStore::default();
        store.set("token");
        store.clear();
        assert!(store.get().is_none());
        assert!(!store.is_logged_in());

        // Clearing an empty store is a no-op, not an error.
        store.clear();
        assert!(!store.is_logged_in());
    }
}
