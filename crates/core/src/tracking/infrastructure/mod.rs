mod assignment;
pub mod iou_tracker;
