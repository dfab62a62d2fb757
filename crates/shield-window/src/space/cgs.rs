//! CGS-backed SpaceService implementation.
//!
//! Binds the private window-server space API by symbol name. The symbols are
//! resolved at link time against the CoreGraphics framework and are neither
//! versioned nor guaranteed stable across macOS releases, so any of them may
//! break on an OS upgrade. The calls return sentinel zero values on failure
//! instead of errors; those are the only failures this backend can detect.

use objc2::rc::Retained;
use objc2_foundation::{NSArray, NSDictionary, NSNumber};

use crate::errors::ShieldError;
use crate::Result;

use super::{ConnectionId, SpaceId, SpaceService, WindowId};

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGSMainConnectionID() -> i32;
    fn CGSSpaceCreate(cid: i32, space_type: i32, options: *const NSDictionary) -> u64;
    fn CGSSpaceSetAbsoluteLevel(cid: i32, space: u64, level: i32);
    fn CGSShowSpaces(cid: i32, spaces: *const NSArray<NSNumber>);
    fn CGSSpaceAddWindowsAndRemoveFromSpaces(
        cid: i32,
        space: u64,
        windows: *const NSArray<NSNumber>,
        selector: i32,
    );
}

fn number_array(values: impl IntoIterator<Item = u64>) -> Retained<NSArray<NSNumber>> {
    let numbers: Vec<Retained<NSNumber>> =
        values.into_iter().map(NSNumber::new_u64).collect();
    NSArray::from_retained_slice(&numbers)
}

/// Space service backed by the private CGS symbols.
pub struct CgsSpaceService;

impl CgsSpaceService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CgsSpaceService {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceService for CgsSpaceService {
    fn main_connection(&self) -> Result<ConnectionId> {
        let cid = unsafe { CGSMainConnectionID() };
        if cid == 0 {
            return Err(ShieldError::Connection(
                "CGSMainConnectionID returned 0 (no window-server session)".into(),
            ));
        }
        Ok(ConnectionId(cid))
    }

    fn create_space(&self, cid: ConnectionId, space_type: i32) -> Result<SpaceId> {
        let space = unsafe { CGSSpaceCreate(cid.0, space_type, std::ptr::null()) };
        if space == 0 {
            return Err(ShieldError::Space("CGSSpaceCreate returned 0".into()));
        }
        Ok(SpaceId(space))
    }

    fn set_space_level(&self, cid: ConnectionId, space: SpaceId, level: i32) -> Result<()> {
        unsafe { CGSSpaceSetAbsoluteLevel(cid.0, space.0, level) };
        Ok(())
    }

    fn show_spaces(&self, cid: ConnectionId, spaces: &[SpaceId]) -> Result<()> {
        let ids = number_array(spaces.iter().map(|s| s.0));
        unsafe { CGSShowSpaces(cid.0, Retained::as_ptr(&ids)) };
        Ok(())
    }

    fn move_windows_to_space(
        &self,
        cid: ConnectionId,
        space: SpaceId,
        windows: &[WindowId],
        selector: i32,
    ) -> Result<()> {
        let ids = number_array(windows.iter().map(|w| u64::from(w.0)));
        unsafe {
            CGSSpaceAddWindowsAndRemoveFromSpaces(cid.0, space.0, Retained::as_ptr(&ids), selector)
        };
        Ok(())
    }
}
