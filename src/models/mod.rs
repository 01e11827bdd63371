pub mod vehicle;

pub use vehicle::{BoundingBox, UNKNOWN, VehicleRecord};
