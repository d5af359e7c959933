//! Data-driven level definitions.
//!
//! A level is an ordered table of placement records. One generic builder turns
//! any table into a [`World`], so adding a level means adding data, not code.
//!
//! Records are positioned from the bottom of the display: `rise` is the
//! distance from the bottom edge to the record's top edge, so the same table
//! works on displays of different heights.
//!
//! ```json
//! { "id": 3, "name": "Demo", "placements": [
//!     { "kind": "platform", "x": 100, "rise": 150 },
//!     { "kind": "player", "x": 600, "rise": 300 },
//!     { "kind": "goal", "x": 5500, "rise": 700 }
//! ] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assets::{require, require_ui, AssetProvider};
use crate::entity::Entity;
use crate::error::{LevelError, StartupError};
use crate::sprite::AnimatedSprite;
use crate::types::{AssetId, DisplayMetrics};
use crate::world::World;

const LEVEL_1: &str = include_str!("../levels/level1.json");
const LEVEL_2: &str = include_str!("../levels/level2.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    Player,
    Goal,
    Enemy,
    Platform,
    /// Animated decoration. Scrolls with the world, never collides.
    Scenery,
}

impl PlacementKind {
    /// Image used when a record does not name one.
    pub fn default_sprite(&self) -> AssetId {
        match self {
            PlacementKind::Player => AssetId::Player,
            PlacementKind::Goal => AssetId::Goal,
            PlacementKind::Enemy => AssetId::Enemy,
            PlacementKind::Platform => AssetId::Platform,
            PlacementKind::Scenery => AssetId::Fire,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PlacementKind,
    pub x: f64,
    pub rise: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<AssetId>,
}

impl Placement {
    pub fn new(kind: PlacementKind, x: f64, rise: f64) -> Self {
        Self {
            kind,
            x,
            rise,
            sprite: None,
        }
    }

    pub fn sprite(&self) -> AssetId {
        self.sprite.unwrap_or_else(|| self.kind.default_sprite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub placements: Vec<Placement>,
}

impl LevelDefinition {
    pub fn from_json(level: u32, json: &str) -> Result<Self, LevelError> {
        let def: LevelDefinition =
            serde_json::from_str(json).map_err(|source| LevelError::Parse { level, source })?;
        if def.id != level {
            return Err(LevelError::Invalid {
                level,
                reason: format!("file declares level {}", def.id),
            });
        }
        def.validate()?;
        Ok(def)
    }

    /// Exactly one player and one goal.
    pub fn validate(&self) -> Result<(), LevelError> {
        for kind in [PlacementKind::Player, PlacementKind::Goal] {
            let count = self.placements.iter().filter(|p| p.kind == kind).count();
            if count != 1 {
                return Err(LevelError::Invalid {
                    level: self.id,
                    reason: format!("expected exactly one {kind:?} record, found {count}"),
                });
            }
        }
        Ok(())
    }

    fn single(&self, kind: PlacementKind) -> Result<&Placement, LevelError> {
        self.placements
            .iter()
            .find(|p| p.kind == kind)
            .ok_or_else(|| LevelError::Invalid {
                level: self.id,
                reason: format!("missing {kind:?} record"),
            })
    }
}

/// Where level tables come from: an optional directory of `level<id>.json`
/// files, then the built-in tables.
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    dir: Option<PathBuf>,
}

impl LevelCatalog {
    pub fn builtin() -> Self {
        Self { dir: None }
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn builtin_ids() -> &'static [u32] {
        &[1, 2]
    }

    pub fn load(&self, id: u32) -> Result<LevelDefinition, LevelError> {
        if let Some(dir) = &self.dir {
            let path = level_path(dir, id);
            if path.is_file() {
                debug!(level = id, path = %path.display(), "loading level file");
                let json = std::fs::read_to_string(&path)
                    .map_err(|source| LevelError::Io { path, source })?;
                return LevelDefinition::from_json(id, &json);
            }
        }

        match id {
            1 => LevelDefinition::from_json(1, LEVEL_1),
            2 => LevelDefinition::from_json(2, LEVEL_2),
            _ => Err(LevelError::UnknownLevel(id)),
        }
    }
}

pub fn level_path(dir: &Path, id: u32) -> PathBuf {
    dir.join(format!("level{id}.json"))
}

/// Build the world for `def`, resolving every image it needs.
///
/// Fails on the first missing image, including HUD images, so a level that
/// cannot be drawn never starts.
pub fn build_world(
    def: &LevelDefinition,
    metrics: DisplayMetrics,
    assets: &dyn AssetProvider,
    now_ms: u64,
) -> Result<World, StartupError> {
    def.validate()?;
    require_ui(assets)?;

    let bottom = metrics.height as f64;
    let place = |p: &Placement| -> Result<Entity, StartupError> {
        let bitmap = require(assets, p.sprite())?;
        Ok(Entity::new(
            bitmap.id,
            p.x,
            bottom - p.rise,
            bitmap.frame_width(),
            bitmap.height,
        ))
    };

    let player = place(def.single(PlacementKind::Player)?)?;
    let goal = place(def.single(PlacementKind::Goal)?)?;
    let mut world = World::new(def.id, metrics, player, goal);

    for p in &def.placements {
        match p.kind {
            PlacementKind::Player | PlacementKind::Goal => {}
            PlacementKind::Platform => {
                world.add_platform(place(p)?);
            }
            PlacementKind::Enemy => {
                world.add_enemy(place(p)?);
            }
            PlacementKind::Scenery => {
                let sheet = require(assets, p.sprite())?;
                if sheet.frame_count == 0 {
                    return Err(LevelError::Invalid {
                        level: def.id,
                        reason: format!("scenery sprite {} has no frames", sheet.id.as_str()),
                    }
                    .into());
                }
                world.add_scenery(AnimatedSprite::new(place(p)?, sheet.frame_count, now_ms));
            }
        }
    }

    info!(level = def.id, name = %def.name, "level loaded");
    world.log_summary();
    Ok(world)
}
