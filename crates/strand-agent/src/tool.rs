use std::future::Future;
use std::pin::Pin;

use crate::error::AgentError;

pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>>;

/// An action the agent can take. Implementations are dyn-compatible so a
/// registry can hold a mixed set.
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    /// One line shown to the model when it picks an action.
    fn description(&self) -> &'static str;

    /// When true, the tool output becomes the final answer directly.
    fn return_direct(&self) -> bool {
        false
    }

    fn call<'a>(&'a self, input: &'a str) -> ToolFuture<'a>;
}
