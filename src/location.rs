//! Last-known device position, gated by a permission check

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LocationPermission {
    Granted,
    #[default]
    Denied,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LocationError {
    #[error("Location permission not granted.")]
    PermissionDenied,
    #[error("Could not get location. Please turn on GPS and try again.")]
    Unavailable,
    #[error("Failed to get location: {0}")]
    Source(String),
}

/// Something that can report the last known position of this device.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// `Ok(None)` means the source works but has no fix yet.
    async fn last_position(&self) -> Result<Option<Coordinates>, String>;
}

/// A position supplied up front (command line or config).
#[derive(Clone, Debug, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn last_position(&self) -> Result<Option<Coordinates>, String> {
        Ok(self.0)
    }
}

#[derive(Clone)]
pub struct LocationHelper {
    source: Arc<dyn PositionSource>,
    permission: LocationPermission,
}

impl LocationHelper {
    pub fn new(source: Arc<dyn PositionSource>, permission: LocationPermission) -> Self {
        Self { source, permission }
    }

    /// Helper for a fixed position; permission is granted only when a
    /// position exists and the user has not opted out.
    pub fn fixed(position: Option<Coordinates>, deny: bool) -> Self {
        let permission = if position.is_some() && !deny {
            LocationPermission::Granted
        } else {
            LocationPermission::Denied
        };
        Self::new(Arc::new(FixedPosition(position)), permission)
    }

    pub fn has_permission(&self) -> bool {
        self.permission == LocationPermission::Granted
    }

    pub async fn last_location(&self) -> Result<Coordinates, LocationError> {
        if !self.has_permission() {
            tracing::error!("attempted to get location without permission");
            return Err(LocationError::PermissionDenied);
        }
        match self.source.last_position().await {
            Ok(Some(position)) => Ok(position),
            Ok(None) => {
                tracing::error!("last location is unknown");
                Err(LocationError::Unavailable)
            }
            Err(reason) => {
                tracing::error!(%reason, "failed to get location");
                Err(LocationError::Source(reason))
            }
        }
    }
}

impl std::fmt::Debug for LocationHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationHelper")
            .field("permission", &self.permission)
            .finish_non_exhaustive()
    }
}
