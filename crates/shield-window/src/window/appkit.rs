//! AppKit-backed host window.
//!
//! Thin wrapper around `NSWindow` via objc2. Construction maps the portable
//! parameters onto `initWithContentRect:styleMask:backing:defer:` and, like
//! everything in AppKit, must happen on the main thread.

use objc2::rc::Retained;
use objc2::{MainThreadMarker, MainThreadOnly};
use objc2_app_kit::{NSBackingStoreType, NSWindow, NSWindowStyleMask};
use objc2_foundation::{NSPoint, NSRect, NSSize};

use crate::space::cgs::CgsSpaceService;
use crate::space::WindowId;
use crate::types::Rect;

use super::{BackingStore, HostWindow, ShieldWindow, StyleMask, WindowLevel};

fn appkit_style(style: StyleMask) -> NSWindowStyleMask {
    let mut mask = NSWindowStyleMask::Borderless;
    if style.contains(StyleMask::TITLED) {
        mask |= NSWindowStyleMask::Titled;
    }
    if style.contains(StyleMask::CLOSABLE) {
        mask |= NSWindowStyleMask::Closable;
    }
    if style.contains(StyleMask::MINIATURIZABLE) {
        mask |= NSWindowStyleMask::Miniaturizable;
    }
    if style.contains(StyleMask::RESIZABLE) {
        mask |= NSWindowStyleMask::Resizable;
    }
    mask
}

fn appkit_backing(backing: BackingStore) -> NSBackingStoreType {
    match backing {
        BackingStore::Retained => NSBackingStoreType::Retained,
        BackingStore::Nonretained => NSBackingStoreType::Nonretained,
        BackingStore::Buffered => NSBackingStoreType::Buffered,
    }
}

/// An `NSWindow` exposed through the [`HostWindow`] seam.
pub struct AppKitWindow {
    window: Retained<NSWindow>,
}

impl AppKitWindow {
    /// Creates the underlying `NSWindow` with the given content bounds, style
    /// flags, backing mode, and deferred-creation flag.
    pub fn new(
        mtm: MainThreadMarker,
        bounds: Rect,
        style: StyleMask,
        backing: BackingStore,
        defer: bool,
    ) -> Self {
        let frame = NSRect::new(
            NSPoint::new(bounds.x, bounds.y),
            NSSize::new(bounds.width, bounds.height),
        );
        let window = unsafe {
            let window = NSWindow::initWithContentRect_styleMask_backing_defer(
                NSWindow::alloc(mtm),
                frame,
                appkit_style(style),
                appkit_backing(backing),
                defer,
            );
            // The Retained handle owns the window; AppKit must not also
            // release it when the window closes.
            window.setReleasedWhenClosed(false);
            window
        };
        Self { window }
    }

    /// The wrapped `NSWindow`, for callers that need to set a content view or
    /// otherwise configure it directly.
    pub fn ns_window(&self) -> &NSWindow {
        &self.window
    }
}

impl HostWindow for AppKitWindow {
    fn window_id(&self) -> WindowId {
        WindowId(self.window.windowNumber() as u32)
    }

    fn level(&self) -> WindowLevel {
        if self.window.level() == WindowLevel::Floating.raw() as isize {
            WindowLevel::Floating
        } else {
            WindowLevel::Normal
        }
    }

    fn set_level(&self, level: WindowLevel) {
        self.window.setLevel(level.raw() as isize);
    }

    fn make_key_and_order_front(&self) {
        self.window.makeKeyAndOrderFront(None);
    }
}

impl ShieldWindow<AppKitWindow> {
    /// Creates an AppKit-backed shield window wired to the CGS space service.
    pub fn appkit(
        mtm: MainThreadMarker,
        bounds: Rect,
        style: StyleMask,
        backing: BackingStore,
        defer: bool,
    ) -> Self {
        let window = AppKitWindow::new(mtm, bounds, style, backing, defer);
        Self::new(window, Box::new(CgsSpaceService::new()))
    }
}
