pub mod reply_interval;
pub mod shutdown;
