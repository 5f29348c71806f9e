pub mod device;
pub mod log_entry;
pub mod settings;
pub mod timestamp;
pub mod user;

pub use device::DeviceRecord;
pub use log_entry::LogEntry;
pub use settings::Settings;
pub use user::UserRecord;
