mod build;
mod unlock;

pub use build::{BuildArgs, cmd_build};
pub use unlock::cmd_unlock;
