use std::fs;

use flummi::core::level::level_path;
use flummi::core::{
    build_world, AssetError, AssetProvider, LevelCatalog, LevelDefinition, LevelError, Placement,
    PlacementKind, StartupError,
};
use flummi::term::BuiltinAssets;
use flummi::types::{AssetId, Bitmap, DisplayMetrics};

const METRICS: DisplayMetrics = DisplayMetrics::new(2400, 1200, 0);

#[test]
fn level_one_is_placed_from_the_bottom() {
    let def = LevelCatalog::builtin().load(1).unwrap();
    let world = build_world(&def, METRICS, &BuiltinAssets::new(), 0).unwrap();

    assert_eq!(world.level_id(), 1);
    assert_eq!(world.player().position(), (600.0, 900.0));
    assert_eq!((world.player().width(), world.player().height()), (100, 120));
    assert_eq!(world.goal().position(), (5500.0, 500.0));
    assert_eq!(world.platforms().len(), 6);
    assert_eq!(world.enemies().len(), 1);
    assert_eq!(world.scroll_offset(), 0.0);

    let fire = &world.scenery().as_slice()[0];
    assert_eq!(fire.frame_count(), 4);
    assert_eq!(fire.entity.width(), 100);
}

#[test]
fn level_two_builds() {
    let def = LevelCatalog::builtin().load(2).unwrap();
    let world = build_world(&def, METRICS, &BuiltinAssets::new(), 0).unwrap();
    assert_eq!(world.enemies().len(), 6);
    assert_eq!(world.platforms().len(), 8);
}

#[test]
fn unknown_level_fails_fast() {
    let err = LevelCatalog::builtin().load(9).unwrap_err();
    assert!(matches!(err, LevelError::UnknownLevel(9)));
}

#[test]
fn missing_level_image_blocks_start() {
    let def = LevelCatalog::builtin().load(1).unwrap();
    let assets = BuiltinAssets::new().without(AssetId::Enemy);
    let err = build_world(&def, METRICS, &assets, 0).unwrap_err();
    assert!(matches!(
        err,
        StartupError::Asset(AssetError::Missing(AssetId::Enemy))
    ));
}

#[test]
fn missing_hud_image_blocks_start() {
    let def = LevelCatalog::builtin().load(1).unwrap();
    let assets = BuiltinAssets::new().without(AssetId::YouWin);
    assert!(build_world(&def, METRICS, &assets, 0).is_err());

    let assets = BuiltinAssets::new().without(AssetId::Background);
    assert!(matches!(
        build_world(&def, METRICS, &assets, 0),
        Err(StartupError::Asset(AssetError::Missing(AssetId::Background)))
    ));
}

#[test]
fn directory_levels_take_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let custom = LevelDefinition {
        id: 1,
        name: "Override".into(),
        placements: vec![
            Placement::new(PlacementKind::Player, 10.0, 200.0),
            Placement::new(PlacementKind::Goal, 900.0, 200.0),
        ],
    };
    fs::write(level_path(dir.path(), 1), serde_json::to_string(&custom).unwrap()).unwrap();

    let catalog = LevelCatalog::with_dir(dir.path());
    assert_eq!(catalog.load(1).unwrap(), custom);
    // Not in the directory: falls back to the built-in table.
    assert_eq!(catalog.load(2).unwrap().id, 2);
    assert!(matches!(catalog.load(3), Err(LevelError::UnknownLevel(3))));
}

#[test]
fn malformed_and_inconsistent_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(level_path(dir.path(), 4), "{ nope").unwrap();
    fs::write(
        level_path(dir.path(), 5),
        r#"{ "id": 6, "placements": [] }"#,
    )
    .unwrap();
    fs::write(
        level_path(dir.path(), 7),
        r#"{ "id": 7, "placements": [
            { "kind": "player", "x": 0, "rise": 100 },
            { "kind": "player", "x": 5, "rise": 100 },
            { "kind": "goal", "x": 50, "rise": 100 }
        ] }"#,
    )
    .unwrap();

    let catalog = LevelCatalog::with_dir(dir.path());
    assert!(matches!(catalog.load(4), Err(LevelError::Parse { level: 4, .. })));
    assert!(matches!(catalog.load(5), Err(LevelError::Invalid { level: 5, .. })));
    assert!(matches!(catalog.load(7), Err(LevelError::Invalid { level: 7, .. })));
}

#[test]
fn explicit_sprite_overrides_default() {
    let json = r#"{ "id": 3, "placements": [
        { "kind": "player", "x": 0, "rise": 300 },
        { "kind": "goal", "x": 900, "rise": 300 },
        { "kind": "enemy", "x": 500, "rise": 300, "sprite": "fire" }
    ] }"#;
    let def = LevelDefinition::from_json(3, json).unwrap();
    let world = build_world(&def, METRICS, &BuiltinAssets::new(), 0).unwrap();
    let enemy = &world.enemies().as_slice()[0];
    assert_eq!(enemy.sprite, AssetId::Fire);
    assert_eq!(enemy.width(), 100);
}

/// Built-in art, except the fire sheet claims to have no frames.
struct FramelessFire(BuiltinAssets);

impl AssetProvider for FramelessFire {
    fn load_image(&self, id: AssetId) -> Result<Bitmap, AssetError> {
        match id {
            AssetId::Fire => Ok(Bitmap::sheet(AssetId::Fire, 400, 120, 0)),
            other => self.0.load_image(other),
        }
    }
}

#[test]
fn scenery_without_frames_is_rejected() {
    let def = LevelCatalog::builtin().load(1).unwrap();
    let err = build_world(&def, METRICS, &FramelessFire(BuiltinAssets::new()), 0).unwrap_err();
    assert!(matches!(
        err,
        StartupError::Level(LevelError::Invalid { level: 1, .. })
    ));
}
