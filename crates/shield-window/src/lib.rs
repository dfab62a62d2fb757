//! A window that floats over every macOS space.
//!
//! `ShieldWindow` wraps a native window and, each time it is shown, creates a
//! dedicated always-visible space via the private window-server Space API and
//! migrates the window into it. The window stays on screen regardless of which
//! space the user is currently viewing, which is what notch apps, status-bar
//! utilities, and system-UI overlays need.
//!
//! The private API calls live behind the [`SpaceService`] trait so the fragile
//! binding can be swapped or mocked; everything outside `space::cgs` and
//! `window::appkit` compiles on any platform.

pub mod errors;
pub mod space;
pub mod types;
pub mod window;

pub use errors::ShieldError;
pub use space::{
    create_space_service, ConnectionId, SpaceId, SpaceService, WindowId,
    REMOVE_FROM_ALL_SPACES, SHIELD_SPACE_LEVEL, SHIELD_SPACE_TYPE,
};
pub use types::Rect;
pub use window::{BackingStore, HostWindow, ShieldWindow, StyleMask, WindowLevel};

#[cfg(target_os = "macos")]
pub use space::cgs::CgsSpaceService;
#[cfg(target_os = "macos")]
pub use window::appkit::AppKitWindow;

pub type Result<T> = std::result::Result<T, ShieldError>;
