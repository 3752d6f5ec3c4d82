//! External collaborators: text generation and upload security scanning.
//!
//! Business code talks to these through the [`TextGenerator`] and
//! [`SecurityScanner`] traits so tests can swap in deterministic stubs. The
//! [`Assistant`] facade turns raw generations into typed results and owns
//! the fallback behaviour for every AI-assisted operation.

pub mod assistant;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompts;
pub mod scanner;

pub use assistant::Assistant;
pub use error::AssistError;
pub use generator::{OfflineGenerator, Prompt, TextGenerator};
pub use scanner::{ScanVerdict, SecurityScanner, SimulatedScanner};
