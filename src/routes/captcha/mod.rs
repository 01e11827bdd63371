mod handler;
mod model;

pub use handler::verify_cap;
pub use model::VerifyRequest;
