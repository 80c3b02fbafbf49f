//! The Thought/Action/Observation loop.

use std::sync::Arc;

use strand_core::prompt::PromptTemplate;
use strand_llm::{LlmProvider, Message};

use crate::error::AgentError;
use crate::registry::ToolRegistry;

const DEFAULT_MAX_ITERATIONS: usize = 3;

const INVALID_FORMAT: &str =
    "Invalid format. Either provide an Action with Action Input, or a Final Answer only.";

const ITERATION_LIMIT_ANSWER: &str = "Agent stopped due to iteration limit.";

const REACT_TEMPLATE: &str = "\
Answer the following questions as best you can. You have access to the following tools.
Only use the information you get from the tools, even if you know the answer.
If the information is not provided by the tools, say you don't know.

{tools}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action

... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Rules:
- If you choose an Action, do NOT include Final Answer in the same step.
- After Action and Action Input, stop and wait for Observation.

Begin!

Question: {input}
Thought:{agent_scratchpad}";

/// What the model decided to do in one step.
#[derive(Debug, PartialEq, Eq)]
enum Decision {
    Act { tool: String, input: String },
    Finish(String),
}

/// One entry of the printable reasoning trace.
#[derive(Debug, Clone)]
pub enum TraceEvent {
    Thought(String),
    Action { tool: String, input: String },
    Observation(String),
    FinalAnswer(String),
}

#[derive(Debug)]
pub struct AgentRun {
    pub answer: String,
    pub trace: Vec<TraceEvent>,
}

pub struct ReactAgent<P> {
    provider: Arc<P>,
    registry: ToolRegistry,
    max_iterations: usize,
    prompt: PromptTemplate,
}

impl<P: LlmProvider> ReactAgent<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, registry: ToolRegistry) -> Self {
        Self {
            provider,
            registry,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            prompt: PromptTemplate::new(REACT_TEMPLATE),
        }
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Override the ReAct prompt; it must keep the `tools`, `tool_names`,
    /// `input`, and `agent_scratchpad` placeholders.
    #[must_use]
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Answer `question`, returning the reasoning trace alongside.
    ///
    /// # Errors
    ///
    /// Returns an error if a model call or a tool invocation fails. Format
    /// violations in model output are handled in the loop, not returned.
    pub async fn run(&self, question: &str) -> Result<AgentRun, AgentError> {
        let tools = self.registry.describe();
        let tool_names = self.registry.names();
        let mut scratchpad = String::new();
        let mut trace = Vec::new();

        for iteration in 0..self.max_iterations {
            let prompt = self.prompt.format(&[
                ("tools", tools.as_str()),
                ("tool_names", tool_names.as_str()),
                ("input", question),
                ("agent_scratchpad", scratchpad.as_str()),
            ])?;

            let response = self.provider.chat(&[Message::user(prompt)]).await?;
            tracing::debug!(iteration, "agent step: {response}");

            if let Some(thought) = leading_thought(&response) {
                trace.push(TraceEvent::Thought(thought));
            }

            match parse_decision(&response) {
                Some(Decision::Finish(answer)) => {
                    trace.push(TraceEvent::FinalAnswer(answer.clone()));
                    return Ok(AgentRun { answer, trace });
                }
                Some(Decision::Act { tool, input }) => {
                    trace.push(TraceEvent::Action {
                        tool: tool.clone(),
                        input: input.clone(),
                    });

                    let observation = match self.registry.find(&tool) {
                        Some(handler) => {
                            let output = handler.call(&input).await?;
                            if handler.return_direct() {
                                trace.push(TraceEvent::FinalAnswer(output.clone()));
                                return Ok(AgentRun {
                                    answer: output,
                                    trace,
                                });
                            }
                            output
                        }
                        None => format!("{tool} is not a valid tool, try one of [{tool_names}]."),
                    };

                    trace.push(TraceEvent::Observation(observation.clone()));
                    scratchpad.push_str(&response);
                    scratchpad.push_str(&format!("\nObservation: {observation}\nThought:"));
                }
                None => {
                    // Format violation: feed the correction back as an
                    // observation instead of failing the run.
                    trace.push(TraceEvent::Observation(INVALID_FORMAT.to_owned()));
                    scratchpad.push_str(&response);
                    scratchpad.push_str(&format!("\nObservation: {INVALID_FORMAT}\nThought:"));
                }
            }
        }

        tracing::warn!(max_iterations = self.max_iterations, "agent hit iteration limit");
        Ok(AgentRun {
            answer: ITERATION_LIMIT_ANSWER.to_owned(),
            trace,
        })
    }
}

/// Text before the first Action/Final Answer marker, i.e. the model's thought.
fn leading_thought(response: &str) -> Option<String> {
    let end = ["\nAction:", "Action:", "Final Answer:"]
        .iter()
        .filter_map(|marker| response.find(marker))
        .min()
        .unwrap_or(response.len());
    let thought = response[..end].trim().trim_start_matches("Thought:").trim();
    if thought.is_empty() {
        None
    } else {
        Some(thought.to_owned())
    }
}

fn parse_decision(response: &str) -> Option<Decision> {
    let action = field_after(response, "Action:");
    let final_answer = response
        .find("Final Answer:")
        .map(|at| response[at + "Final Answer:".len()..].trim().to_owned());

    match (action, final_answer) {
        // An action step must not also carry a final answer.
        (Some(_), Some(_)) => None,
        (None, Some(answer)) => Some(Decision::Finish(answer)),
        (Some(tool), None) => {
            let input = field_after(response, "Action Input:")?;
            Some(Decision::Act { tool, input })
        }
        (None, None) => None,
    }
}

/// Value on the same line as `marker`, e.g. `Action: calculator` → `calculator`.
fn field_after(response: &str, marker: &str) -> Option<String> {
    let at = response.find(marker)?;
    let rest = &response[at + marker.len()..];
    let line = rest.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        None
    } else {
        Some(line.trim_matches('"').to_owned())
    }
}
