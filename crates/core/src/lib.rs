//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the simulation of a side-scrolling platformer level:
//! placed objects, sprite animation, gravity and jumping, collisions against
//! platforms, enemies and the goal, and the camera scroll. It has no
//! dependencies on terminals, threads or clocks; time enters only as the
//! `dt`/`now_ms` arguments of [`GameSession::update`].
//!
//! # Module Structure
//!
//! - [`entity`]: positioned, sized objects and their bounding boxes
//! - [`sprite`]: wall-clock paced sprite-sheet animation
//! - [`arena`]: stable per-category storage with typed handles
//! - [`world`]: everything placed in a level plus the scroll offset
//! - [`physics`]: gravity, jump, horizontal motion, scrolling, win/lose
//! - [`level`]: data-driven level tables and the generic world builder
//! - [`session`]: session state machine driven by per-tick input
//! - [`snapshot`]: render-side copy of a tick's result
//!
//! # Example
//!
//! ```
//! use flummi_core::{GameSession, World, Entity};
//! use flummi_types::{AssetId, DisplayMetrics, InputFrame, SessionState};
//!
//! let metrics = DisplayMetrics::new(2400, 1080, 0);
//! let player = Entity::new(AssetId::Player, 600.0, 700.0, 100, 120);
//! let goal = Entity::new(AssetId::Goal, 5500.0, 380.0, 150, 200);
//! let mut world = World::new(1, metrics, player, goal);
//! world.add_platform(Entity::new(AssetId::Platform, 500.0, 800.0, 600, 60));
//!
//! let mut session = GameSession::new(world);
//! session.update(0.03, 30, &InputFrame::default());
//! assert_eq!(session.state(), SessionState::Running);
//! ```

pub mod arena;
pub mod assets;
pub mod entity;
pub mod error;
pub mod level;
pub mod physics;
pub mod session;
pub mod snapshot;
pub mod sprite;
pub mod world;

pub use flummi_types as types;

pub use arena::{Arena, Handle};
pub use assets::AssetProvider;
pub use entity::Entity;
pub use error::{AssetError, LevelError, StartupError};
pub use level::{build_world, LevelCatalog, LevelDefinition, Placement, PlacementKind};
pub use physics::{resting, step, Controls, Scroll, StepOutcome};
pub use session::{GameSession, SessionEvent, SessionEvents};
pub use snapshot::{DrawItem, WorldSnapshot};
pub use sprite::AnimatedSprite;
pub use world::World;
