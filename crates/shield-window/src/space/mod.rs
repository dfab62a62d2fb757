use serde::{Deserialize, Serialize};

use crate::Result;

#[cfg(target_os = "macos")]
pub mod cgs;

pub mod noop;

/// Opaque window-server session handle. Each space call takes it explicitly so
/// the core logic stays free of hidden global lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub i32);

/// Opaque handle to a virtual desktop ("space").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceId(pub u64);

/// Window-server window number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u32);

/// Reserved space type tag passed to space creation.
pub const SHIELD_SPACE_TYPE: i32 = 1;

/// Absolute display level of the always-visible space tier.
pub const SHIELD_SPACE_LEVEL: i32 = 0;

/// Removal selector meaning "remove the windows from every other space".
pub const REMOVE_FROM_ALL_SPACES: i32 = -1;

/// Narrow seam over the window server's space management.
///
/// The real backend binds undocumented CGS symbols with no stability
/// guarantees, so everything that touches them goes through this trait and can
/// be replaced by a test double or by a public-API implementation later.
pub trait SpaceService: Send + Sync {
    /// Returns the session handle for the current window-server connection.
    fn main_connection(&self) -> Result<ConnectionId>;

    /// Creates a new space of the given type and returns its handle.
    fn create_space(&self, cid: ConnectionId, space_type: i32) -> Result<SpaceId>;

    /// Sets the space's absolute display ordering level.
    fn set_space_level(&self, cid: ConnectionId, space: SpaceId, level: i32) -> Result<()>;

    /// Adds the spaces to the active display set.
    fn show_spaces(&self, cid: ConnectionId, spaces: &[SpaceId]) -> Result<()>;

    /// Moves the windows into the space. A selector of
    /// [`REMOVE_FROM_ALL_SPACES`] also removes them from every space they
    /// previously belonged to.
    fn move_windows_to_space(
        &self,
        cid: ConnectionId,
        space: SpaceId,
        windows: &[WindowId],
        selector: i32,
    ) -> Result<()>;
}

/// Create the platform-appropriate SpaceService.
///
/// On macOS: returns the CGS-backed implementation.
/// On other platforms: returns a no-op implementation.
pub fn create_space_service() -> Box<dyn SpaceService> {
    #[cfg(target_os = "macos")]
    {
        Box::new(cgs::CgsSpaceService::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(noop::NoopSpaceService)
    }
}
