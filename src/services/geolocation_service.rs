// src/services/geolocation_service.rs
//
// Geolocation Resolver - layered best-effort fallback.
//
// Tier 1: device-reported position. Tier 2: external city-label lookup
// (coordinates advisory). Any tier's failure falls through; the resolver
// always terminates with a label and never surfaces an error. It runs
// independently of the search/resolution flow and must never block it.

use std::sync::Arc;

use crate::events::{EventBus, LocationResolved};
use crate::gateways::{CityLabelGateway, DevicePositionSource};

const SOURCE_IP_LOOKUP: &str = "ip_lookup";
const SOURCE_DEFAULT: &str = "default";

pub struct GeolocationService {
    device_position: Arc<dyn DevicePositionSource>,
    /// `None` = feature disabled (no API key configured): resolve
    /// immediately to the default label without any external call.
    city_labels: Option<Arc<dyn CityLabelGateway>>,
    default_label: String,
    event_bus: Arc<EventBus>,
}

impl GeolocationService {
    pub fn new(
        device_position: Arc<dyn DevicePositionSource>,
        city_labels: Option<Arc<dyn CityLabelGateway>>,
        default_label: String,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            device_position,
            city_labels,
            default_label,
            event_bus,
        }
    }

    /// Resolve the location label. Never fails outward.
    pub async fn resolve_location(&self) -> String {
        let Some(city_labels) = &self.city_labels else {
            log::debug!("geolocation disabled; using default label");
            return self.fall_back();
        };

        let position = match self.device_position.current_position().await {
            Ok(position) => position,
            Err(e) => {
                log::warn!("device position unavailable: {e}");
                return self.fall_back();
            }
        };

        match city_labels.city_label(position).await {
            Ok(label) => {
                self.event_bus.emit(LocationResolved::new(
                    label.clone(),
                    SOURCE_IP_LOOKUP.to_string(),
                ));
                label
            }
            Err(e) => {
                log::warn!("city label lookup failed: {e}");
                self.fall_back()
            }
        }
    }

    fn fall_back(&self) -> String {
        self.event_bus.emit(LocationResolved::new(
            self.default_label.clone(),
            SOURCE_DEFAULT.to_string(),
        ));
        self.default_label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use crate::error::AppError;
    use crate::gateways::{MockCityLabelGateway, MockDevicePositionSource, UnavailableDevicePosition};
    use std::sync::Mutex;

    fn bus_with_source_capture() -> (Arc<EventBus>, Arc<Mutex<Vec<String>>>) {
        let bus = Arc::new(EventBus::new());
        let sources = Arc::new(Mutex::new(Vec::new()));
        let sources_clone = Arc::clone(&sources);
        bus.subscribe::<LocationResolved, _>(move |event| {
            sources_clone.lock().unwrap().push(event.source.clone());
        });
        (bus, sources)
    }

    #[tokio::test]
    async fn device_position_unavailable_falls_back_to_default() {
        let (bus, sources) = bus_with_source_capture();
        // The label gateway must never be consulted: no expectations set
        let city_labels = MockCityLabelGateway::new();
        let service = GeolocationService::new(
            Arc::new(UnavailableDevicePosition),
            Some(Arc::new(city_labels)),
            "Select your location".to_string(),
            bus,
        );

        let label = service.resolve_location().await;
        assert_eq!(label, "Select your location");
        assert_eq!(*sources.lock().unwrap(), vec!["default".to_string()]);
    }

    #[tokio::test]
    async fn label_service_error_falls_back_to_default() {
        let (bus, sources) = bus_with_source_capture();

        let mut device = MockDevicePositionSource::new();
        device
            .expect_current_position()
            .times(1)
            .returning(|| Ok(Coordinates { latitude: 12.97, longitude: 77.59 }));

        let mut city_labels = MockCityLabelGateway::new();
        city_labels
            .expect_city_label()
            .times(1)
            .returning(|_| Err(AppError::Other("service unreachable".to_string())));

        let service = GeolocationService::new(
            Arc::new(device),
            Some(Arc::new(city_labels)),
            "Select your location".to_string(),
            bus,
        );

        let label = service.resolve_location().await;
        assert_eq!(label, "Select your location");
        assert_eq!(*sources.lock().unwrap(), vec!["default".to_string()]);
    }

    #[tokio::test]
    async fn successful_lookup_returns_city_label() {
        let (bus, sources) = bus_with_source_capture();

        let mut device = MockDevicePositionSource::new();
        device
            .expect_current_position()
            .times(1)
            .returning(|| Ok(Coordinates { latitude: 12.97, longitude: 77.59 }));

        let mut city_labels = MockCityLabelGateway::new();
        city_labels
            .expect_city_label()
            .times(1)
            .returning(|_| Ok("Bengaluru".to_string()));

        let service = GeolocationService::new(
            Arc::new(device),
            Some(Arc::new(city_labels)),
            "Select your location".to_string(),
            bus,
        );

        let label = service.resolve_location().await;
        assert_eq!(label, "Bengaluru");
        assert_eq!(*sources.lock().unwrap(), vec!["ip_lookup".to_string()]);
    }

    #[tokio::test]
    async fn disabled_mode_skips_every_tier() {
        let (bus, sources) = bus_with_source_capture();
        // Device source must not be consulted either: no expectations set
        let device = MockDevicePositionSource::new();
        let service = GeolocationService::new(
            Arc::new(device),
            None,
            "Select your location".to_string(),
            bus,
        );

        let label = service.resolve_location().await;
        assert_eq!(label, "Select your location");
        assert_eq!(*sources.lock().unwrap(), vec!["default".to_string()]);
    }
}
