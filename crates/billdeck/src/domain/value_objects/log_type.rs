//! LogType - Classification of brain log events

use serde::{Deserialize, Serialize};

use super::descriptor::{Descriptor, Tone};

/// Brain log event type
///
/// Tags the agent has not been taught about yet land in `Other` instead of
/// failing the whole snapshot. Ordering follows declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "String", into = "String")]
pub enum LogType {
    ToolCall,
    ToolResult,
    Thinking,
    Response,
    Session,
    Mcp,
    Error,
    User,
    Cost,
    Status,
    Other(String),
}

impl LogType {
    pub fn as_str(&self) -> &str {
        match self {
            LogType::ToolCall => "tool_call",
            LogType::ToolResult => "tool_result",
            LogType::Thinking => "thinking",
            LogType::Response => "response",
            LogType::Session => "session",
            LogType::Mcp => "mcp",
            LogType::Error => "error",
            LogType::User => "user",
            LogType::Cost => "cost",
            LogType::Status => "status",
            LogType::Other(tag) => tag,
        }
    }

    /// Icon, label and tone for the activity feed
    pub fn descriptor(&self) -> Descriptor {
        match self {
            LogType::ToolCall => Descriptor::new(">", "Tool", Tone::Accent),
            LogType::ToolResult => Descriptor::new("<", "Result", Tone::Green),
            LogType::Thinking => Descriptor::new("~", "Thinking", Tone::Purple),
            LogType::Response => Descriptor::new("#", "Response", Tone::Blue),
            LogType::Session => Descriptor::new("*", "Session", Tone::Muted),
            LogType::Mcp => Descriptor::new("@", "MCP", Tone::Cyan),
            LogType::Error => Descriptor::new("!", "Error", Tone::Red),
            LogType::User => Descriptor::new("?", "User", Tone::Bright),
            LogType::Cost => Descriptor::new("$", "Cost", Tone::Amber),
            LogType::Status => Descriptor::new("%", "Status", Tone::Indigo),
            LogType::Other(tag) => Descriptor::new("-", tag.clone(), Tone::Muted),
        }
    }
}

impl From<String> for LogType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "tool_call" => LogType::ToolCall,
            "tool_result" => LogType::ToolResult,
            "thinking" => LogType::Thinking,
            "response" => LogType::Response,
            "session" => LogType::Session,
            "mcp" => LogType::Mcp,
            "error" => LogType::Error,
            "user" => LogType::User,
            "cost" => LogType::Cost,
            "status" => LogType::Status,
            _ => LogType::Other(tag),
        }
    }
}

impl From<LogType> for String {
    fn from(log_type: LogType) -> Self {
        match log_type {
            LogType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
