//! Service layer - traits over backend operations
//!
//! Handlers never talk to the bridge directly; spawned tasks go through these
//! traits so tests can swap in in-memory implementations.

pub mod registry;

pub use registry::{
    BridgeProviderRegistry, LocalProviderRegistry, ProviderRegistry, GET_FACT_PROVIDERS,
    OPEN_FACT_PROVIDER_FOLDER, SET_READ_PLAN,
};
