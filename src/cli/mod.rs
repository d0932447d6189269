pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod output;
pub mod telemetry;

mod start;
pub use self::start::start;
