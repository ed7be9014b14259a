//! Pipeline document model read by the diff annotator.
//!
//! Steps carry a `(domain, key)`-keyed attribute map; the repository
//! status scan writes each step's change classification under the
//! `("git", "status")` pair, and a document-level version marker with a
//! `git` prefix identifies documents whose backing file is tracked.

use std::collections::HashMap;

use spool_git::ChangeStatus;

/// Attribute domain for version-control annotations.
pub const ATTR_DOMAIN_GIT: &str = "git";
/// Attribute key for the change status within the git domain.
pub const ATTR_KEY_STATUS: &str = "status";

/// Version markers starting with this prefix mean "tracked by Git".
const GIT_VERSION_PREFIX: &str = "git";

/// A step (node) on the design canvas.
#[derive(Debug, Clone, Default)]
pub struct StepNode {
    /// Step name, unique within its document.
    pub name: String,
    /// Canvas position of the step's top-left corner.
    pub position: (i32, i32),
    attributes: HashMap<(String, String), String>,
}

impl StepNode {
    /// Create a step at the given canvas position.
    #[must_use]
    pub fn new(name: impl Into<String>, position: (i32, i32)) -> Self {
        Self {
            name: name.into(),
            position,
            attributes: HashMap::new(),
        }
    }

    /// Read an attribute by domain and key.
    #[must_use]
    pub fn attribute(&self, domain: &str, key: &str) -> Option<&str> {
        self.attributes
            .get(&(domain.to_string(), key.to_string()))
            .map(String::as_str)
    }

    /// Set an attribute.
    pub fn set_attribute(
        &mut self,
        domain: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.attributes
            .insert((domain.into(), key.into()), value.into());
    }

    /// Remove every attribute in a domain.
    pub fn remove_domain(&mut self, domain: &str) {
        self.attributes.retain(|(d, _), _| d != domain);
    }

    /// The step's change status annotation; absence means unchanged.
    #[must_use]
    pub fn change_status(&self) -> Option<ChangeStatus> {
        self.attribute(ATTR_DOMAIN_GIT, ATTR_KEY_STATUS)
            .and_then(ChangeStatus::from_label)
    }

    /// Annotate the step with a change status.
    pub fn set_change_status(&mut self, status: ChangeStatus) {
        self.set_attribute(ATTR_DOMAIN_GIT, ATTR_KEY_STATUS, status.as_str());
    }
}

/// A transformation or job document holding the steps drawn on the
/// canvas.
#[derive(Debug, Clone, Default)]
pub struct PipelineDoc {
    /// Document name.
    pub name: String,
    /// Steps in canvas order.
    pub steps: Vec<StepNode>,
    version: Option<String>,
}

impl PipelineDoc {
    /// Create an empty document.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            version: None,
        }
    }

    /// The document's version marker, if any.
    #[must_use]
    pub fn version_marker(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Set or clear the version marker.
    pub fn set_version_marker(&mut self, marker: Option<String>) {
        self.version = marker;
    }

    /// Whether the document's backing file is under Git.
    #[must_use]
    pub fn is_git_tracked(&self) -> bool {
        self.version
            .as_deref()
            .is_some_and(|v| v.starts_with(GIT_VERSION_PREFIX))
    }

    /// Find a step by name.
    #[must_use]
    pub fn find_step(&self, name: &str) -> Option<&StepNode> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Find a step by name, mutably.
    pub fn find_step_mut(&mut self, name: &str) -> Option<&mut StepNode> {
        self.steps.iter_mut().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_round_trip() {
        let mut step = StepNode::new("Filter rows", (10, 20));
        assert_eq!(step.attribute("git", "status"), None);

        step.set_attribute("git", "status", "changed");
        assert_eq!(step.attribute("git", "status"), Some("changed"));
        assert_eq!(step.attribute("other", "status"), None);
    }

    #[test]
    fn test_change_status_typed_accessors() {
        let mut step = StepNode::new("Sort", (0, 0));
        assert_eq!(step.change_status(), None);

        step.set_change_status(ChangeStatus::Added);
        assert_eq!(step.change_status(), Some(ChangeStatus::Added));
        assert_eq!(step.attribute(ATTR_DOMAIN_GIT, ATTR_KEY_STATUS), Some("added"));
    }

    #[test]
    fn test_unknown_status_label_reads_as_none() {
        let mut step = StepNode::new("Sort", (0, 0));
        step.set_attribute(ATTR_DOMAIN_GIT, ATTR_KEY_STATUS, "bogus");
        assert_eq!(step.change_status(), None);
    }

    #[test]
    fn test_remove_domain_keeps_other_domains() {
        let mut step = StepNode::new("Sort", (0, 0));
        step.set_change_status(ChangeStatus::Removed);
        step.set_attribute("notes", "owner", "jane");

        step.remove_domain(ATTR_DOMAIN_GIT);
        assert_eq!(step.change_status(), None);
        assert_eq!(step.attribute("notes", "owner"), Some("jane"));
    }

    #[test]
    fn test_git_tracked_prefix_check() {
        let mut doc = PipelineDoc::new("sales-load");
        assert!(!doc.is_git_tracked());

        doc.set_version_marker(Some("git: a1b2c3d".to_string()));
        assert!(doc.is_git_tracked());

        doc.set_version_marker(Some("svn: 42".to_string()));
        assert!(!doc.is_git_tracked());

        doc.set_version_marker(None);
        assert!(!doc.is_git_tracked());
    }

    #[test]
    fn test_find_step() {
        let mut doc = PipelineDoc::new("sales-load");
        doc.steps.push(StepNode::new("Input", (0, 0)));
        doc.steps.push(StepNode::new("Output", (100, 0)));

        assert!(doc.find_step("Input").is_some());
        assert!(doc.find_step("Missing").is_none());

        doc.find_step_mut("Output")
            .unwrap()
            .set_change_status(ChangeStatus::Changed);
        assert_eq!(
            doc.find_step("Output").unwrap().change_status(),
            Some(ChangeStatus::Changed)
        );
    }
}
