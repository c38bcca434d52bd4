pub mod client;
pub mod collect;
pub mod credential;
pub mod dialect;
pub mod error;
pub mod normalize;
pub mod scope;

pub use client::PlaceSearchClient;
pub use collect::{CollectError, CollectOptions, Collector};
pub use credential::{Credential, CredentialPool};
pub use dialect::{PoiPage, ProviderDialect};
pub use error::SearchError;
pub use normalize::normalize_poi;
pub use scope::SearchScope;
