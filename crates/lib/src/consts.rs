/// Extension (without the dot) of the files published to the output directory.
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "pdf";

pub const DEFAULT_GIT_PROGRAM: &str = "git";
pub const DEFAULT_BUILD_PROGRAM: &str = "make";

pub const GIT_PROGRAM_ENV: &str = "DOCBUILD_GIT";
pub const BUILD_PROGRAM_ENV: &str = "DOCBUILD_BUILD_PROGRAM";

pub const VCS_SUFFIX: &str = ".git";
pub const ACCEPTED_URL_PREFIXES: [&str; 2] = ["https://", "git"];

/// Lock files live next to the revision clone as `.<revision>`.
pub const LOCK_FILE_PREFIX: &str = ".";
