pub mod jsonl_alert_sink;
pub mod threaded_alert_pipeline;
