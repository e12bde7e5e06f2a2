pub mod alert_notifier;
pub mod alert_queue;
pub mod alert_record;
pub mod alert_sink;
pub mod deduplicator;
pub mod priority;
pub mod statistics;
