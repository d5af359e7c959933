//! Image source boundary.

use crate::error::AssetError;
use crate::types::{AssetId, Bitmap};

/// Images the HUD and overlays need even when no level record names them.
pub const UI_ASSETS: [AssetId; 9] = [
    AssetId::Background,
    AssetId::ButtonLeft,
    AssetId::ButtonRight,
    AssetId::ButtonUp,
    AssetId::ButtonPause,
    AssetId::ButtonPlay,
    AssetId::GameOver,
    AssetId::YouWin,
    AssetId::Paused,
];

/// Loads images by identifier. Only sizes are used by the simulation.
pub trait AssetProvider {
    fn load_image(&self, id: AssetId) -> Result<Bitmap, AssetError>;
}

/// Load `id` and reject zero-sized images.
pub fn require(assets: &dyn AssetProvider, id: AssetId) -> Result<Bitmap, AssetError> {
    let bitmap = assets.load_image(id)?;
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(AssetError::Empty {
            id,
            width: bitmap.width,
            height: bitmap.height,
        });
    }
    Ok(bitmap)
}

/// Check that every UI image is present.
pub fn require_ui(assets: &dyn AssetProvider) -> Result<(), AssetError> {
    for id in UI_ASSETS {
        require(assets, id)?;
    }
    Ok(())
}
