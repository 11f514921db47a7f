// src/gateways/mod.rs
//
// Gateway layer - trait seams over the external APIs.
//
// Gateways are transport + payload mapping only: no supersession logic,
// no fallback policy, no result caching. Services own the policy.

pub mod catalog_gateway;
pub mod geolocation_gateway;
pub mod search_gateway;

pub use catalog_gateway::{CrossReferenceGateway, DetailsGateway, TmdbCatalogGateway};
pub use geolocation_gateway::{
    CityLabelGateway, DevicePositionSource, IpstackGateway, UnavailableDevicePosition,
};
pub use search_gateway::{OmdbSearchGateway, SearchGateway};

#[cfg(test)]
pub use catalog_gateway::{MockCrossReferenceGateway, MockDetailsGateway};
#[cfg(test)]
pub use geolocation_gateway::{MockCityLabelGateway, MockDevicePositionSource};
#[cfg(test)]
pub use search_gateway::MockSearchGateway;
