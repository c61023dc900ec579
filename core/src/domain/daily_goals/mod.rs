pub mod entities;
pub mod errors;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
