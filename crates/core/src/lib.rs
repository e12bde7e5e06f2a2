pub mod alerts;
pub mod behavior;
pub mod monitoring;
pub mod shared;
pub mod tracking;
pub mod zones;
