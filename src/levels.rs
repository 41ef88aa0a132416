//! Level catalog
//!
//! Levels are authored as JSON: `{ "levels": [[obstacle, ...], ...] }`, where
//! each obstacle is an object with its rectangle (`x`, `y`, `w`, `h`) and a
//! `kind` tag selecting the kind-specific fields. Every field a kind needs must
//! be present; nothing about a trap is ever defaulted.

use serde::Deserialize;

use crate::consts::NUM_LEVELS;
use crate::error::{LevelError, LevelResult};
use crate::sim::{Behavior, Obstacle, Rect, TriggerZone};

/// Built-in levels shipped with the game
const BUILTIN_LEVELS: &str = include_str!("../assets/levels.json");

/// Kind-specific part of an obstacle descriptor
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum KindDef {
    Platform,
    Goal {
        #[serde(default)]
        reversed: bool,
        #[serde(default)]
        hidden: bool,
    },
    Danger {
        #[serde(default)]
        invisible: bool,
    },
    MovingPlatform {
        speed: f32,
        min_x: f32,
        max_x: f32,
    },
    CollapsingPlatform {
        fall_speed: f32,
    },
    VanishingPlatform {
        shrink_rate: f32,
    },
    FallingCeiling {
        trigger: TriggerZone,
        fall_speed: f32,
        boost_depth: f32,
        boosted_fall_speed: f32,
    },
}

/// One obstacle as written in a level file
#[derive(Debug, Clone, Deserialize)]
struct ObstacleDef {
    #[serde(flatten)]
    rect: Rect,
    #[serde(flatten)]
    kind: KindDef,
}

impl ObstacleDef {
    fn into_obstacle(self) -> Obstacle {
        let rect = self.rect;
        match self.kind {
            KindDef::Platform => Obstacle::platform(rect),
            KindDef::Goal { reversed, hidden } => {
                Obstacle::new(rect, Behavior::Goal { reversed, hidden })
            }
            KindDef::Danger { invisible } => Obstacle::new(rect, Behavior::Danger { invisible }),
            KindDef::MovingPlatform { speed, min_x, max_x } => {
                Obstacle::moving_platform(rect, speed, min_x, max_x)
            }
            KindDef::CollapsingPlatform { fall_speed } => {
                Obstacle::collapsing_platform(rect, fall_speed)
            }
            KindDef::VanishingPlatform { shrink_rate } => {
                Obstacle::vanishing_platform(rect, shrink_rate)
            }
            KindDef::FallingCeiling {
                trigger,
                fall_speed,
                boost_depth,
                boosted_fall_speed,
            } => Obstacle::falling_ceiling(
                rect,
                trigger,
                fall_speed,
                boost_depth,
                boosted_fall_speed,
            ),
        }
    }
}

/// Keys shared by every descriptor
const COMMON_KEYS: [&str; 5] = ["kind", "x", "y", "w", "h"];

/// Reject keys the descriptor's kind does not define.
///
/// `deny_unknown_fields` cannot be combined with the flattened tagged enum
/// in `ObstacleDef`, so the key set is checked on the raw object. Non-objects
/// and unknown or missing kinds are left for serde to report.
fn check_keys(value: &serde_json::Value) -> Result<(), String> {
    let Some(fields) = value.as_object() else {
        return Ok(());
    };
    let Some(kind) = fields.get("kind").and_then(|k| k.as_str()) else {
        return Ok(());
    };
    let allowed: &[&str] = match kind {
        "platform" => &[],
        "goal" => &["reversed", "hidden"],
        "danger" => &["invisible"],
        "moving_platform" => &["speed", "min_x", "max_x"],
        "collapsing_platform" => &["fall_speed"],
        "vanishing_platform" => &["shrink_rate"],
        "falling_ceiling" => &["trigger", "fall_speed", "boost_depth", "boosted_fall_speed"],
        _ => return Ok(()),
    };
    match fields
        .keys()
        .find(|key| !COMMON_KEYS.contains(&key.as_str()) && !allowed.contains(&key.as_str()))
    {
        Some(key) => Err(format!("unknown field `{key}` for kind `{kind}`")),
        None => Ok(()),
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDoc {
    levels: Vec<Vec<serde_json::Value>>,
}

/// Immutable obstacle list for one level, in authored order
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTemplate {
    obstacles: Vec<Obstacle>,
}

impl LevelTemplate {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Parse and validate one level's descriptors
    fn from_values(level: u32, values: Vec<serde_json::Value>) -> LevelResult<Self> {
        let obstacles = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let malformed = |reason: String| LevelError::MalformedTemplate {
                    level,
                    index,
                    reason,
                };
                check_keys(&value).map_err(malformed)?;
                let def: ObstacleDef =
                    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
                let obstacle = def.into_obstacle();
                obstacle.validate().map_err(malformed)?;
                Ok(obstacle)
            })
            .collect::<LevelResult<Vec<_>>>()?;
        Ok(Self { obstacles })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Fresh runtime copy of the obstacles with authored trap state
    pub fn instantiate(&self) -> Vec<Obstacle> {
        self.obstacles.clone()
    }
}

/// Mapping from level number (1-based) to template
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelTemplate>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelTemplate>) -> LevelResult<Self> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        Ok(Self { levels })
    }

    /// Parse a catalog document, failing on the first malformed obstacle
    pub fn from_json(json: &str) -> LevelResult<Self> {
        let doc: CatalogDoc = serde_json::from_str(json)?;
        let levels = doc
            .levels
            .into_iter()
            .zip(1..)
            .map(|(values, level)| LevelTemplate::from_values(level, values))
            .collect::<LevelResult<Vec<_>>>()?;
        Self::new(levels)
    }

    /// The levels shipped with the game
    pub fn builtin() -> LevelResult<Self> {
        let catalog = Self::from_json(BUILTIN_LEVELS)?;
        if catalog.len() != NUM_LEVELS {
            log::warn!(
                "Built-in catalog has {} levels, expected {}",
                catalog.len(),
                NUM_LEVELS
            );
        }
        Ok(catalog)
    }

    /// Number of levels
    pub fn len(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn contains(&self, level: u32) -> bool {
        (1..=self.len()).contains(&level)
    }

    pub fn template(&self, level: u32) -> LevelResult<&LevelTemplate> {
        if !self.contains(level) {
            return Err(LevelError::InvalidLevel {
                level,
                count: self.len(),
            });
        }
        Ok(&self.levels[(level - 1) as usize])
    }
}
