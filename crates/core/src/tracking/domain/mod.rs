pub mod detection;
pub mod person_tracker;
pub mod track;
