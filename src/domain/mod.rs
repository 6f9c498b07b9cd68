// Domain layer - Core business logic

pub mod clip_spec;
pub mod errors;
pub mod model;
pub mod rules;
