// Domain modules: feed locations, operator identity, moderation decisions

pub mod locations;
pub mod operators;
pub mod resolutions;
