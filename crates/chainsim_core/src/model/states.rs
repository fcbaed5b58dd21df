//! The ordered set of labels a chain can occupy

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::StateId;
use crate::error::{ConfigError, ConsistencyError};

/// Ordered, duplicate-free list of state labels.
///
/// Order fixes the transition matrix row for each label. The label lookup map
/// is built once here so simulation never rescans the list. Serializes as the
/// plain label list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StateSpace {
    labels: Vec<String>,
    index: FxHashMap<String, StateId>,
}

impl StateSpace {
    pub fn new<I, S>(labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(ConfigError::EmptyStates);
        }

        if labels.len() > u16::MAX as usize {
            return Err(ConfigError::TooManyStates(labels.len()));
        }

        let mut index = FxHashMap::default();
        for (i, label) in labels.iter().enumerate() {
            let id = StateId(i as u16);
            if index.insert(label.clone(), id).is_some() {
                return Err(ConfigError::DuplicateState(label.clone()));
            }
        }

        Ok(Self { labels, index })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Row index for a label
    pub fn id_of(&self, label: &str) -> Result<StateId, ConsistencyError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| ConsistencyError::UnknownLabel(label.to_string()))
    }

    pub fn label(&self, id: StateId) -> Result<&str, ConsistencyError> {
        self.labels
            .get(id.index())
            .map(String::as_str)
            .ok_or(ConsistencyError::UnknownState(id))
    }

    pub fn contains(&self, id: StateId) -> bool {
        id.index() < self.labels.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.labels.len()).map(|i| StateId(i as u16))
    }
}

impl TryFrom<Vec<String>> for StateSpace {
    type Error = ConfigError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<StateSpace> for Vec<String> {
    fn from(space: StateSpace) -> Self {
        space.labels
    }
}
