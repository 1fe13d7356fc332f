//! Organization, project and stack scoping

use std::fmt;

/// An organization and project holding site stacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    pub organization: String,
    pub project: String,
}

impl ProjectScope {
    pub fn new(organization: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            project: project.into(),
        }
    }

    /// Scope of the named stack within this project
    pub fn stack(&self, name: impl Into<String>) -> StackScope {
        StackScope {
            organization: self.organization.clone(),
            project: self.project.clone(),
            stack: name.into(),
        }
    }
}

/// Fully qualified stack name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackScope {
    pub organization: String,
    pub project: String,
    pub stack: String,
}

impl StackScope {
    pub fn new(
        organization: impl Into<String>,
        project: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            project: project.into(),
            stack: stack.into(),
        }
    }

    /// Path segments identifying the stack
    pub fn segments(&self) -> [&str; 3] {
        [&self.organization, &self.project, &self.stack]
    }
}

impl fmt::Display for StackScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.organization, self.project, self.stack)
    }
}
