use biogate_core::{DeviceId, DeviceStatus};
use serde::{Deserialize, Serialize};

/// Registered IoT device, as persisted in `devices.json` keyed by device ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    #[serde(default)]
    pub status: DeviceStatus,
}

impl DeviceRecord {
    /// New Active device named after its ID, e.g. `IoT Device DEV1234`.
    #[must_use]
    pub fn register(id: &DeviceId) -> Self {
        Self {
            name: format!("IoT Device {id}"),
            status: DeviceStatus::Active,
        }
    }

    pub fn mark_under_attack(&mut self) {
        self.status = DeviceStatus::UnderAttack;
    }

    /// Return the device to Active. Returns `true` if the status changed.
    pub fn restore(&mut self) -> bool {
        let changed = self.status.is_under_attack();
        self.status = DeviceStatus::Active;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_status_changes() {
        let id = DeviceId::new("DEV4321").unwrap();
        let mut device = DeviceRecord::register(&id);
        assert_eq!(device.name, "IoT Device DEV4321");
        assert!(device.status.is_active());

        device.mark_under_attack();
        assert_eq!(
            serde_json::to_value(&device).unwrap()["status"],
            "Under Attack"
        );

        assert!(device.restore());
        assert!(!device.restore());
    }

    #[test]
    fn test_status_defaults_to_active() {
        let device: DeviceRecord = serde_json::from_str(r#"{"name":"Door"}"#).unwrap();
        assert_eq!(device.status, DeviceStatus::Active);
    }
}
