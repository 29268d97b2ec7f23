// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Opaque, stable key identifying one graph member within a run.
///
/// Equality and hashing are the only operations the selector relies on;
/// ordering is used purely for deterministic output.
pub type NodeId = String;

/// The kind of resource a graph member represents.
///
/// `Test` is special: it is the only kind eligible for *indirect*
/// selection (a check node pulled in because its subjects were selected,
/// not because the user named it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Model,
    Test,
    Seed,
    Snapshot,
    Analysis,
    Operation,
    Source,
    Exposure,
}

impl ResourceKind {
    /// Whether members of this kind may be pulled in indirectly when their
    /// parents are selected.
    pub fn can_select_indirectly(self) -> bool {
        matches!(self, ResourceKind::Test)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Model => "model",
            ResourceKind::Test => "test",
            ResourceKind::Seed => "seed",
            ResourceKind::Snapshot => "snapshot",
            ResourceKind::Analysis => "analysis",
            ResourceKind::Operation => "operation",
            ResourceKind::Source => "source",
            ResourceKind::Exposure => "exposure",
        };
        f.write_str(s)
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "model" => Ok(ResourceKind::Model),
            "test" => Ok(ResourceKind::Test),
            "seed" => Ok(ResourceKind::Seed),
            "snapshot" => Ok(ResourceKind::Snapshot),
            "analysis" => Ok(ResourceKind::Analysis),
            "operation" => Ok(ResourceKind::Operation),
            "source" => Ok(ResourceKind::Source),
            "exposure" => Ok(ResourceKind::Exposure),
            other => Err(format!(
                "invalid resource kind: {other} (expected one of \"model\", \
                 \"test\", \"seed\", \"snapshot\", \"analysis\", \"operation\", \
                 \"source\", \"exposure\")"
            )),
        }
    }
}
