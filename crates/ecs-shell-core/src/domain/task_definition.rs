use serde::{Deserialize, Serialize};

/// One container in a task definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDefinition {
    pub name: String,

    /// ECS treats a missing flag as `false` for our purposes.
    #[serde(default)]
    pub essential: bool,
}

impl ContainerDefinition {
    pub fn new(name: impl Into<String>, essential: bool) -> Self {
        Self {
            name: name.into(),
            essential,
        }
    }

    pub fn essential(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn non_essential(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

/// Template (family + revision) a task was started from.
///
/// The names listed here are not guaranteed to match the containers actually
/// present on a running task. Callers intersect, they do not assume equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub arn: String,
    pub family: String,
    pub revision: u32,

    #[serde(default)]
    pub container_definitions: Vec<ContainerDefinition>,
}

impl TaskDefinition {
    pub fn new(family: impl Into<String>, revision: u32) -> Self {
        let family = family.into();
        Self {
            arn: format!("{family}:{revision}"),
            family,
            revision,
            container_definitions: Vec::new(),
        }
    }

    pub fn with_container(mut self, def: ContainerDefinition) -> Self {
        self.container_definitions.push(def);
        self
    }

    pub fn essential_names(&self) -> impl Iterator<Item = &str> {
        self.container_definitions
            .iter()
            .filter(|d| d.essential)
            .map(|d| d.name.as_str())
    }
}
