pub mod restricted_area_checker;
pub mod zone;
pub mod zone_spec;
