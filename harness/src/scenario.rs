//! `ScenarioV1`: JSON description of a grid search run.
//!
//! ```json
//! {
//!   "schema_version": "scenario.v1",
//!   "scenario_id": "corridor",
//!   "map": ["....", ".##.", "...."],
//!   "spacing": 1.0,
//!   "start": [0, 0],
//!   "goal": [3, 2],
//!   "algorithm": "astar",
//!   "heuristic": {"kind": "cross_product", "weight": 0.001},
//!   "max_expansions": 500
//! }
//! ```
//!
//! `spacing` defaults to 1.0, `algorithm` to `"astar"`, `heuristic` to
//! Manhattan and `max_expansions` to unbounded. Unknown fields are rejected.

use serde_json::{Map, Value};

use tilepath_kernel::graph::grid::GridGraph;
use tilepath_kernel::proof::canon::{canonical_json_bytes, CanonError};
use tilepath_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use tilepath_search::error::SearchError;
use tilepath_search::heuristic::{
    CrossProductHeuristic, Heuristic, ManhattanHeuristic, ZeroHeuristic,
    DEFAULT_CROSS_PRODUCT_WEIGHT,
};

use crate::contract::WorldError;
use crate::worlds::grid::GridWorld;

pub const SCENARIO_SCHEMA_VERSION: &str = "scenario.v1";

const KNOWN_FIELDS: [&str; 9] = [
    "algorithm",
    "goal",
    "heuristic",
    "map",
    "max_expansions",
    "scenario_id",
    "schema_version",
    "spacing",
    "start",
];

/// Why a scenario was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// The bytes are not JSON, or the top level is not an object.
    InvalidJson { detail: String },
    UnsupportedSchema { found: String },
    MissingField { field: &'static str },
    UnknownField { field: String },
    InvalidField { field: &'static str, detail: String },
    /// The map, start or goal do not form a valid world.
    World(WorldError),
}

impl From<WorldError> for ScenarioError {
    fn from(e: WorldError) -> Self {
        Self::World(e)
    }
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson { detail } => write!(f, "scenario is not valid JSON: {detail}"),
            Self::UnsupportedSchema { found } => {
                write!(f, "unsupported scenario schema {found:?}, expected {SCENARIO_SCHEMA_VERSION:?}")
            }
            Self::MissingField { field } => write!(f, "scenario field {field:?} is missing"),
            Self::UnknownField { field } => write!(f, "unknown scenario field {field:?}"),
            Self::InvalidField { field, detail } => {
                write!(f, "scenario field {field:?} is invalid: {detail}")
            }
            Self::World(e) => write!(f, "scenario world: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Which search a scenario runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmChoice {
    Dijkstra,
    AStar,
}

impl AlgorithmChoice {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
        }
    }
}

/// Heuristic selection for A* scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HeuristicConfig {
    Zero,
    #[default]
    Manhattan,
    CrossProduct { weight: f64 },
}

impl HeuristicConfig {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Manhattan => "manhattan",
            Self::CrossProduct { .. } => "cross_product",
        }
    }

    /// Instantiate the configured heuristic.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidInput`] for an invalid cross-product weight.
    pub fn build(&self) -> Result<Box<dyn Heuristic>, SearchError> {
        let heuristic: Box<dyn Heuristic> = match *self {
            Self::Zero => Box::new(ZeroHeuristic),
            Self::Manhattan => Box::new(ManhattanHeuristic),
            Self::CrossProduct { weight } => Box::new(CrossProductHeuristic::new(weight)?),
        };
        Ok(heuristic)
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        match self {
            Self::CrossProduct { weight } => {
                serde_json::json!({"kind": self.name(), "weight": weight})
            }
            Self::Zero | Self::Manhattan => serde_json::json!({"kind": self.name()}),
        }
    }

    fn from_json_value(value: &Value) -> Result<Self, ScenarioError> {
        let invalid = |detail: String| ScenarioError::InvalidField {
            field: "heuristic",
            detail,
        };
        let kind = value["kind"]
            .as_str()
            .ok_or_else(|| invalid("expected an object with a string \"kind\"".into()))?;
        match kind {
            "zero" => Ok(Self::Zero),
            "manhattan" => Ok(Self::Manhattan),
            "cross_product" => {
                let weight = match value.get("weight") {
                    None => DEFAULT_CROSS_PRODUCT_WEIGHT,
                    Some(w) => w
                        .as_f64()
                        .ok_or_else(|| invalid("\"weight\" must be a number".into()))?,
                };
                CrossProductHeuristic::new(weight).map_err(|e| invalid(e.to_string()))?;
                Ok(Self::CrossProduct { weight })
            }
            other => Err(invalid(format!("unknown heuristic kind {other:?}"))),
        }
    }
}

/// A validated scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioV1 {
    pub scenario_id: String,
    pub map: Vec<String>,
    pub spacing: f64,
    pub start: (u32, u32),
    pub goal: (u32, u32),
    pub algorithm: AlgorithmChoice,
    pub heuristic: HeuristicConfig,
    pub max_expansions: Option<u64>,
}

impl ScenarioV1 {
    /// Parse scenario JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] for malformed JSON or any invalid field.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ScenarioError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| ScenarioError::InvalidJson {
                detail: e.to_string(),
            })?;
        Self::from_json_value(&value)
    }

    /// # Errors
    ///
    /// Returns [`ScenarioError`] for a missing, unknown or invalid field.
    pub fn from_json_value(value: &Value) -> Result<Self, ScenarioError> {
        let obj = value.as_object().ok_or_else(|| ScenarioError::InvalidJson {
            detail: "top level must be an object".into(),
        })?;
        if let Some(unknown) = obj.keys().find(|k| !KNOWN_FIELDS.contains(&k.as_str())) {
            return Err(ScenarioError::UnknownField {
                field: unknown.clone(),
            });
        }

        let schema = required(obj, "schema_version")?
            .as_str()
            .unwrap_or_default();
        if schema != SCENARIO_SCHEMA_VERSION {
            return Err(ScenarioError::UnsupportedSchema {
                found: schema.to_string(),
            });
        }

        let scenario_id = required(obj, "scenario_id")?
            .as_str()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ScenarioError::InvalidField {
                field: "scenario_id",
                detail: "expected a non-empty string".into(),
            })?
            .to_string();

        let map = required(obj, "map")?
            .as_array()
            .and_then(|rows| {
                rows.iter()
                    .map(|r| r.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| ScenarioError::InvalidField {
                field: "map",
                detail: "expected an array of strings".into(),
            })?;

        let spacing = match obj.get("spacing") {
            None => 1.0,
            Some(v) => v.as_f64().ok_or_else(|| ScenarioError::InvalidField {
                field: "spacing",
                detail: "expected a number".into(),
            })?,
        };

        let algorithm = match obj.get("algorithm").map(Value::as_str) {
            None | Some(Some("astar")) => AlgorithmChoice::AStar,
            Some(Some("dijkstra")) => AlgorithmChoice::Dijkstra,
            Some(other) => {
                return Err(ScenarioError::InvalidField {
                    field: "algorithm",
                    detail: format!("expected \"dijkstra\" or \"astar\", got {other:?}"),
                })
            }
        };

        let heuristic = match obj.get("heuristic") {
            None => HeuristicConfig::default(),
            Some(v) => HeuristicConfig::from_json_value(v)?,
        };

        let max_expansions = match obj.get("max_expansions") {
            None | Some(Value::Null) => None,
            Some(v) => Some(v.as_u64().filter(|n| *n > 0).ok_or_else(|| {
                ScenarioError::InvalidField {
                    field: "max_expansions",
                    detail: "expected a positive integer".into(),
                }
            })?),
        };

        Ok(Self {
            scenario_id,
            map,
            spacing,
            start: cell(obj, "start")?,
            goal: cell(obj, "goal")?,
            algorithm,
            heuristic,
            max_expansions,
        })
    }

    /// Build the grid world this scenario describes.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::World`] for a malformed map or a start/goal
    /// cell that is out of bounds or a wall.
    pub fn build_world(&self) -> Result<GridWorld, ScenarioError> {
        let grid = GridGraph::from_ascii(self.map.as_slice(), self.spacing).map_err(WorldError::from)?;
        Ok(GridWorld::new(
            self.scenario_id.clone(),
            grid,
            self.start,
            self.goal,
        )?)
    }

    /// Canonical form with every default filled in.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        serde_json::json!({
            "algorithm": self.algorithm.as_str(),
            "goal": [self.goal.0, self.goal.1],
            "heuristic": self.heuristic.to_json_value(),
            "map": self.map,
            "max_expansions": self.max_expansions,
            "scenario_id": self.scenario_id,
            "schema_version": SCENARIO_SCHEMA_VERSION,
            "spacing": self.spacing,
            "start": [self.start.0, self.start.1],
        })
    }

    /// Content hash of the canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if `spacing` is not finite.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::ScenarioConfig, &bytes))
    }
}

fn required<'v>(obj: &'v Map<String, Value>, field: &'static str) -> Result<&'v Value, ScenarioError> {
    obj.get(field).ok_or(ScenarioError::MissingField { field })
}

fn cell(obj: &Map<String, Value>, field: &'static str) -> Result<(u32, u32), ScenarioError> {
    let invalid = || ScenarioError::InvalidField {
        field,
        detail: "expected [x, y] with non-negative integers".into(),
    };
    let pair = required(obj, field)?.as_array().ok_or_else(invalid)?;
    let [x, y] = pair.as_slice() else {
        return Err(invalid());
    };
    let coord = |v: &Value| v.as_u64().and_then(|n| u32::try_from(n).ok());
    match (coord(x), coord(y)) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(invalid()),
    }
}
