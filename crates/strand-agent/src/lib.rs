//! ReAct agent: reason about which tool to use, act, observe, repeat.

pub mod calculator;
pub mod error;
pub mod lookup;
pub mod react;
pub mod registry;
pub mod tool;

pub use calculator::Calculator;
pub use error::AgentError;
pub use lookup::CapitalLookup;
pub use react::{AgentRun, ReactAgent, TraceEvent};
pub use registry::ToolRegistry;
pub use tool::Tool;
