//! Fireberry CRM MCP server.
//!
//! Exposes seven CRM tools over the Model Context Protocol: three metadata
//! reads (object types, fields, picklist values) and four writes (create /
//! update record, create object type, create field). Each tool validates
//! its arguments, performs one upstream REST call, validates the response
//! shape, and returns a normalized payload or a structured error.

pub mod api;
pub mod config;
pub mod error;
pub mod field_types;
pub mod server;
pub mod tools;
pub mod types;
pub mod validate;
