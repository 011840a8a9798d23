pub mod analysis;
pub mod config;
pub mod engine;
pub mod event;
pub mod parser;
pub mod profiles;
pub mod replay;
pub mod state;

pub use engine::{AbilityAnalysis, Report};
pub use event::Event;
pub use replay::analyze_log;
