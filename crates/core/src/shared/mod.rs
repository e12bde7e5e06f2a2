pub mod alert;
pub mod bounding_box;
pub mod constants;
pub mod frame_size;
