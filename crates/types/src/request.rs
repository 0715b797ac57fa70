//! What the user asked `keg install` to do

use serde::{Deserialize, Serialize};

/// One install invocation: requested formula names plus the flags that
/// shape how they are handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRequest {
    /// Requested names, in the order they were given
    pub names: Vec<String>,
    /// Skip the blacklist check
    pub force: bool,
    /// Build from trunk (`--HEAD`)
    pub head: bool,
    /// The lowercase `--head` spelling was used; always rejected
    pub lowercase_head: bool,
}

impl InstallRequest {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    #[must_use]
    pub fn with_head(mut self, head: bool) -> Self {
        self.head = head;
        self
    }

    #[must_use]
    pub fn with_lowercase_head(mut self, lowercase_head: bool) -> Self {
        self.lowercase_head = lowercase_head;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
