// MCP (Model Context Protocol) server exposing weather and blog tools
// to agent clients over stdio

pub mod codec;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::ToolError;
pub use server::McpServer;
