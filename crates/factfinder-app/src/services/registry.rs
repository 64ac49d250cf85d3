//! Provider registry client
//!
//! The [`ProviderRegistry`] trait is the panel's only pull-side dependency on
//! the backend. [`BridgeProviderRegistry`] implements it over the WebSocket
//! bridge; tests substitute their own implementation.

use serde_json::{json, Value};

use factfinder_bridge::BridgeHandle;
use factfinder_core::prelude::*;
use factfinder_core::Provider;

/// Backend call returning the provider list.
pub const GET_FACT_PROVIDERS: &str = "GetFactProviders";

/// Backend call selecting a provider by file path.
pub const SET_READ_PLAN: &str = "SetReadPlan";

/// Backend call opening the provider folder in the OS file browser.
pub const OPEN_FACT_PROVIDER_FOLDER: &str = "OpenFactProviderFolder";

/// Fact provider operations
#[trait_variant::make(ProviderRegistry: Send)]
pub trait LocalProviderRegistry {
    /// Fetch every available provider, in backend order.
    ///
    /// Fails with [`Error::RegistryUnavailable`]; never returns a partial list.
    async fn fetch_providers(&self) -> Result<Vec<Provider>>;

    /// Tell the backend which provider to read with.
    async fn select_provider(&self, file_path: &str) -> Result<()>;

    /// Ask the backend to reveal the provider folder.
    async fn request_open_provider_folder(&self) -> Result<()>;
}

/// Registry backed by the WebSocket bridge
#[derive(Debug, Clone)]
pub struct BridgeProviderRegistry {
    handle: BridgeHandle,
}

impl BridgeProviderRegistry {
    pub fn new(handle: BridgeHandle) -> Self {
        Self { handle }
    }
}

impl ProviderRegistry for BridgeProviderRegistry {
    async fn fetch_providers(&self) -> Result<Vec<Provider>> {
        let value = self
            .handle
            .request(GET_FACT_PROVIDERS, json!([]))
            .await
            .map_err(|e| Error::registry_unavailable(e.to_string()))?;
        decode_provider_list(value)
    }

    async fn select_provider(&self, file_path: &str) -> Result<()> {
        self.handle
            .request(SET_READ_PLAN, json!([file_path]))
            .await?;
        Ok(())
    }

    async fn request_open_provider_folder(&self) -> Result<()> {
        self.handle
            .request(OPEN_FACT_PROVIDER_FOLDER, json!([]))
            .await?;
        Ok(())
    }
}

/// Decode a `GetFactProviders` result. `null` reads as an empty list.
fn decode_provider_list(value: Value) -> Result<Vec<Provider>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value)
        .map_err(|e| Error::registry_unavailable(format!("unexpected provider list: {e}")))
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory registry that records every call.

    use std::sync::{Arc, Mutex};

    use tokio::sync::mpsc;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RegistryCall {
        Fetch,
        Select(String),
        OpenFolder,
    }

    #[derive(Clone)]
    pub struct FakeRegistry {
        fetch_result: Arc<Mutex<std::result::Result<Vec<Provider>, String>>>,
        select_fails: bool,
        calls: mpsc::UnboundedSender<RegistryCall>,
    }

    impl FakeRegistry {
        pub fn new(
            providers: Vec<Provider>,
        ) -> (Self, mpsc::UnboundedReceiver<RegistryCall>) {
            Self::build(Ok(providers), false)
        }

        pub fn unavailable(reason: &str) -> (Self, mpsc::UnboundedReceiver<RegistryCall>) {
            Self::build(Err(reason.to_string()), true)
        }

        fn build(
            fetch_result: std::result::Result<Vec<Provider>, String>,
            select_fails: bool,
        ) -> (Self, mpsc::UnboundedReceiver<RegistryCall>) {
            let (calls, rx) = mpsc::unbounded_channel();
            (
                Self {
                    fetch_result: Arc::new(Mutex::new(fetch_result)),
                    select_fails,
                    calls,
                },
                rx,
            )
        }

        pub fn set_fetch_result(&self, result: std::result::Result<Vec<Provider>, String>) {
            *self.fetch_result.lock().unwrap() = result;
        }
    }

    impl ProviderRegistry for FakeRegistry {
        async fn fetch_providers(&self) -> Result<Vec<Provider>> {
            let _ = self.calls.send(RegistryCall::Fetch);
            self.fetch_result
                .lock()
                .unwrap()
                .clone()
                .map_err(Error::registry_unavailable)
        }

        async fn select_provider(&self, file_path: &str) -> Result<()> {
            let _ = self.calls.send(RegistryCall::Select(file_path.to_string()));
            if self.select_fails {
                return Err(Error::bridge("select rejected"));
            }
            Ok(())
        }

        async fn request_open_provider_folder(&self) -> Result<()> {
            let _ = self.calls.send(RegistryCall::OpenFolder);
            Ok(())
        }
    }
}
