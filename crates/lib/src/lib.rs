//! docbuild-lib: clone a document repository at a fixed revision, build it, and
//! publish the produced artifacts.
//!
//! The pipeline runs five stages in order:
//! - prepare the workspace and take the per-revision lock
//! - fetch the repository and check out the revision
//! - run the build tool in the clone
//! - collect artifacts into the output directory
//! - release the lock

pub mod builder;
pub mod collect;
pub mod consts;
pub mod error;
pub mod fetch;
pub mod lock;
pub mod options;
pub mod pipeline;
pub mod process;
pub mod url;
pub mod workspace;

#[cfg(test)]
pub mod testutil;

pub use error::BuildError;
pub use options::PipelineOptions;
pub use pipeline::{BuildReport, Pipeline, PipelineError, PipelineState, Stage, build_document};
pub use workspace::layout::{ProjectIdentity, WorkspaceLayout};
