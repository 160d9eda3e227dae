pub mod rest;

pub use rest::{routes, ApiState, RestApi};
