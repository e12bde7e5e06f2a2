pub mod monitor_config;
pub mod monitor_frame_use_case;
