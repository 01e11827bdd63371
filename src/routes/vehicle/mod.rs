mod handler;
mod model;

pub use handler::get_buses;
pub use model::{BoundsQuery, VehiclesResponse};
