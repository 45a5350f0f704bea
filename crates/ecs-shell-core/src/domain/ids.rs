//! Identifiers used by the ECS control plane.
//!
//! ECS は同じリソースを ARN (`arn:aws:ecs:...:task/cluster/abc123`) でも
//! 短い ID (`abc123`) でも返すため、比較の前に末尾のセグメントへ正規化します。

use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns the text after the final `/`, or the whole string when there is none.
pub fn last_segment(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

name_type!(
    /// Short task id (the trailing segment of a task ARN).
    TaskId
);

name_type!(
    /// Cluster name as the user typed it (name or ARN both work for the CLI).
    ClusterName
);

name_type!(ServiceName);

impl TaskId {
    /// Normalize a task ARN (or an already-short id) to its trailing segment.
    pub fn from_arn(arn: &str) -> Self {
        Self::new(last_segment(arn))
    }
}

/// Reference to a task definition as carried by a running task.
///
/// Usually a full ARN like
/// `arn:aws:ecs:us-east-1:123456789012:task-definition/web:42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDefinitionRef(String);

impl TaskDefinitionRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `family:revision` (or just `family` when the reference has no revision).
    pub fn family_revision(&self) -> &str {
        last_segment(&self.0)
    }

    /// Family with the revision stripped.
    pub fn family(&self) -> &str {
        let fr = self.family_revision();
        fr.split(':').next().unwrap_or(fr)
    }
}

impl fmt::Display for TaskDefinitionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::full_arn("arn:aws:ecs:us-east-1:123456789012:task/prod/0a1b2c3d", "0a1b2c3d")]
    #[case::old_format("arn:aws:ecs:us-east-1:123456789012:task/0a1b2c3d", "0a1b2c3d")]
    #[case::already_short("0a1b2c3d", "0a1b2c3d")]
    #[case::trailing_slash("task/prod/", "")]
    fn last_segment_takes_text_after_final_slash(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(last_segment(input), expected);
        assert_eq!(TaskId::from_arn(input).as_str(), expected);
    }

    #[test]
    fn task_definition_ref_splits_family_and_revision() {
        let r = TaskDefinitionRef::new("arn:aws:ecs:us-east-1:123456789012:task-definition/web:42");
        assert_eq!(r.family_revision(), "web:42");
        assert_eq!(r.family(), "web");

        let bare = TaskDefinitionRef::new("web");
        assert_eq!(bare.family_revision(), "web");
        assert_eq!(bare.family(), "web");
    }

    #[test]
    fn names_display_as_given() {
        assert_eq!(ClusterName::new("prod").to_string(), "prod");
        assert_eq!(ServiceName::from("api").as_str(), "api");
    }
}
