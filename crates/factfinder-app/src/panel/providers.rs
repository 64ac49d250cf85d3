//! Provider list and selector cursor

use factfinder_core::Provider;

/// Progress of the provider fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No fetch issued yet
    #[default]
    NotRequested,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Loaded,
    /// The last fetch failed; the list shown is from before it
    Unavailable(String),
}

/// Providers offered by the backend plus the selector's cursor and choice.
///
/// The list itself only changes when a fetch succeeds, and then it is
/// replaced as a whole. Choosing a provider never edits it.
#[derive(Debug, Clone, Default)]
pub struct ProviderList {
    providers: Vec<Provider>,
    status: FetchStatus,
    cursor: usize,
    chosen: Option<Provider>,
}

impl ProviderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Mark a fetch as in flight.
    pub fn begin_fetch(&mut self) {
        self.status = FetchStatus::Loading;
    }

    /// Record a fetch outcome.
    ///
    /// Success replaces the list; failure keeps whatever was there.
    pub fn apply_fetch_result(&mut self, result: Result<Vec<Provider>, String>) {
        match result {
            Ok(providers) => {
                self.providers = providers;
                self.status = FetchStatus::Loaded;
                self.cursor = self.cursor.min(self.providers.len().saturating_sub(1));
            }
            Err(reason) => {
                self.status = FetchStatus::Unavailable(reason);
            }
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted(&self) -> Option<&Provider> {
        self.providers.get(self.cursor)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.providers.len() {
            self.cursor += 1;
        }
    }

    pub fn move_first(&mut self) {
        self.cursor = 0;
    }

    pub fn move_last(&mut self) {
        self.cursor = self.providers.len().saturating_sub(1);
    }

    /// Record the highlighted provider as the user's choice and return it.
    pub fn choose_highlighted(&mut self) -> Option<&Provider> {
        let provider = self.providers.get(self.cursor)?.clone();
        self.chosen = Some(provider);
        self.chosen.as_ref()
    }

    /// Provider most recently chosen, if any.
    pub fn chosen(&self) -> Option<&Provider> {
        self.chosen.as_ref()
    }
}
