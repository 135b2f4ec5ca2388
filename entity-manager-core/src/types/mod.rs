//! Record types exchanged with the backend

mod device_registry;
mod entity;
mod hierarchy;
mod response;
mod view_state;

pub use device_registry::{DeviceInfo, DeviceRegistry, NO_DEVICE_LABEL};
pub use entity::{Entity, EntityId};
pub use hierarchy::{Device, Hierarchy, Integration, NO_DEVICE_KEY};
pub use response::{
    BulkFailure, BulkRenameRequest, BulkRenameResult, BulkResult, RenameRequest, RenameTarget,
};
pub use view_state::ViewState;
