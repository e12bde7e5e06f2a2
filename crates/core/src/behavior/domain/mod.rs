pub mod behavior_analyzer;
pub mod crowd_detector;
pub mod person_history;
