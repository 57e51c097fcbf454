//! Builds the effective loader command line for a restart.

use tracing::{debug, warn};

use super::{LaunchLineSpec, LaunchOptionSource, FLAG_PRIORITY};
use crate::platform::PriorityClass;

/// Combines the loader executable, the reported launch options, and the
/// current priority class into a fresh [`LaunchLineSpec`].
///
/// Nothing is cached: the source is consulted on every build so the result
/// reflects the options of the current run.
pub struct LaunchLineBuilder {
    loader_executable: String,
    source: Box<dyn LaunchOptionSource>,
}

impl LaunchLineBuilder {
    /// Create a builder for `loader_executable` reading options from `source`.
    #[must_use]
    pub fn new(loader_executable: impl Into<String>, source: Box<dyn LaunchOptionSource>) -> Self {
        Self {
            loader_executable: loader_executable.into(),
            source,
        }
    }

    /// Build the command line.
    ///
    /// A failing source is not escalated: the line then carries only the
    /// loader executable and the priority flag.
    #[must_use]
    pub fn build(&self, priority: PriorityClass) -> LaunchLineSpec {
        let mut line = LaunchLineSpec::new(self.loader_executable.clone());

        match self.source.launch_options() {
            Ok(options) => {
                debug!(count = options.len(), "launch options recovered");
                for option in &options {
                    line.extend(option.tokens());
                }
            }
            Err(err) => {
                warn!(%err, "launch options unavailable, using minimal command line");
            }
        }

        line.extend([FLAG_PRIORITY.to_owned(), priority.name().to_owned()]);
        line
    }
}

impl std::fmt::Debug for LaunchLineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchLineBuilder")
            .field("loader_executable", &self.loader_executable)
            .finish_non_exhaustive()
    }
}
