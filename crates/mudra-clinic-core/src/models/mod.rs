//! Domain models for the clinic portal.

mod appointment;
mod audit;
mod clinic;
mod lab;
mod patient;
mod report;
mod settings;
mod stock;
mod user;

pub use appointment::*;
pub use audit::*;
pub use clinic::*;
pub use lab::*;
pub use patient::*;
pub use report::*;
pub use settings::*;
pub use stock::*;
pub use user::*;
