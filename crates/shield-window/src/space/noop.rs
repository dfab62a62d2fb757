//! No-op SpaceService implementation.
//!
//! Used as a fallback on platforms without a window server, or for testing.
//! All operations succeed silently and hand back zero handles.

use crate::Result;

use super::{ConnectionId, SpaceId, SpaceService, WindowId};

/// A space service that does nothing. Every mutation succeeds and every handle
/// returned is zero.
pub struct NoopSpaceService;

impl SpaceService for NoopSpaceService {
    fn main_connection(&self) -> Result<ConnectionId> {
        Ok(ConnectionId(0))
    }

    fn create_space(&self, _cid: ConnectionId, _space_type: i32) -> Result<SpaceId> {
        Ok(SpaceId(0))
    }

    fn set_space_level(&self, _cid: ConnectionId, _space: SpaceId, _level: i32) -> Result<()> {
        Ok(())
    }

    fn show_spaces(&self, _cid: ConnectionId, _spaces: &[SpaceId]) -> Result<()> {
        Ok(())
    }

    fn move_windows_to_space(
        &self,
        _cid: ConnectionId,
        _space: SpaceId,
        _windows: &[WindowId],
        _selector: i32,
    ) -> Result<()> {
        Ok(())
    }
}
