//! resumegraph Extractor
//!
//! Turns a formatted document into a reviewed-ready set of triplets by
//! segmenting it into typed sections and driving the inference service once
//! per section.
//!
//! # Architecture
//!
//! ```text
//! Document → segment() → ExtractionOrchestrator → InferenceService (per section)
//!                                               → GraphExtractionResult
//! ```
//!
//! # Key Properties
//!
//! - **Line partition**: every line of the input belongs to exactly one
//!   section, in document order
//! - **Failure absorption**: one section's inference failure contributes
//!   zero triplets and never aborts the document
//! - **Deterministic ordering**: sections are processed strictly
//!   sequentially, so triplet ordering is reproducible
//!
//! # Example Usage
//!
//! ```
//! use resumegraph_extractor::{ExtractionOrchestrator, OrchestratorConfig};
//! use resumegraph_inference::MockInference;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inference = MockInference::new();
//! let orchestrator = ExtractionOrchestrator::new(inference, OrchestratorConfig::default());
//!
//! let document = "# Jane Doe\n\n## Experience\nEngineer at Acme.\n";
//! let result = orchestrator.extract(document).await?;
//!
//! println!("{}", result.validation_message);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod orchestrator;
mod segment;

pub use config::OrchestratorConfig;
pub use error::ExtractError;
pub use orchestrator::ExtractionOrchestrator;
pub use segment::segment;
