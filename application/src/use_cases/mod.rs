//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod execute_intent;
pub mod execution_context;
pub mod local_tools;
pub mod route_tools;

#[cfg(test)]
pub(crate) mod test_support;
