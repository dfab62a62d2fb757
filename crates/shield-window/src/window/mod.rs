use tracing::{debug, warn};

use crate::space::{
    SpaceService, WindowId, REMOVE_FROM_ALL_SPACES, SHIELD_SPACE_LEVEL, SHIELD_SPACE_TYPE,
};

#[cfg(target_os = "macos")]
pub mod appkit;

/// Window decoration flags, bit-compatible with `NSWindowStyleMask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleMask(pub u64);

impl StyleMask {
    pub const BORDERLESS: Self = Self(0);
    pub const TITLED: Self = Self(1 << 0);
    pub const CLOSABLE: Self = Self(1 << 1);
    pub const MINIATURIZABLE: Self = Self(1 << 2);
    pub const RESIZABLE: Self = Self(1 << 3);

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for StyleMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Backing mode for the window's display buffer, raw-compatible with
/// `NSBackingStoreType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackingStore {
    Retained = 0,
    Nonretained = 1,
    Buffered = 2,
}

/// Front-to-back stacking tier, system-wide and independent of space
/// membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLevel {
    Normal,
    /// Above normal application windows, below fixed system-critical levels.
    Floating,
}

impl WindowLevel {
    /// The AppKit window level value for this tier.
    pub fn raw(self) -> i64 {
        match self {
            WindowLevel::Normal => 0,
            WindowLevel::Floating => 3,
        }
    }
}

/// Seam to the native window primitives the shield builds on: the
/// window-server window number, the level attribute, and the standard "make
/// key and order front" call. The shield never alters their contracts, it
/// only sequences them.
pub trait HostWindow {
    fn window_id(&self) -> WindowId;
    fn level(&self) -> WindowLevel;
    fn set_level(&self, level: WindowLevel);
    fn make_key_and_order_front(&self);
}

/// A window pinned above every virtual desktop whenever it is shown.
pub struct ShieldWindow<W: HostWindow> {
    window: W,
    spaces: Box<dyn SpaceService>,
}

impl<W: HostWindow> ShieldWindow<W> {
    /// Wraps a host window. No shield behavior is applied at construction
    /// time; the window acts like a normal window until it is shown.
    pub fn new(window: W, spaces: Box<dyn SpaceService>) -> Self {
        Self { window, spaces }
    }

    /// The wrapped host window.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Makes the window key, orders it to the front, then applies the shield.
    ///
    /// Repeated calls simply recreate the pinning.
    pub fn show_and_activate(&self) {
        self.window.make_key_and_order_front();
        self.apply_shield();
    }

    /// Pins the window above every space.
    ///
    /// Raises the window level to floating, creates a new space at absolute
    /// level 0, shows it, and migrates the window into it while removing it
    /// from every space it previously belonged to. The sequence is linear and
    /// synchronous; failures are logged and never surfaced to the caller.
    ///
    /// Known issue: each call creates a fresh space and there is no disposal
    /// path, so space handles accumulate in the window-server session until
    /// the process exits. Upstream behaves the same way; reuse semantics are
    /// unresolved, so the behavior is reproduced rather than fixed.
    pub fn apply_shield(&self) {
        self.window.set_level(WindowLevel::Floating);

        let cid = match self.spaces.main_connection() {
            Ok(cid) => cid,
            Err(e) => {
                warn!("shield not applied: {e}");
                return;
            }
        };
        let space = match self.spaces.create_space(cid, SHIELD_SPACE_TYPE) {
            Ok(space) => space,
            Err(e) => {
                warn!("shield not applied: {e}");
                return;
            }
        };
        if let Err(e) = self.spaces.set_space_level(cid, space, SHIELD_SPACE_LEVEL) {
            warn!("failed to set space level: {e}");
        }
        if let Err(e) = self.spaces.show_spaces(cid, &[space]) {
            warn!("failed to show shield space: {e}");
        }
        if let Err(e) = self.spaces.move_windows_to_space(
            cid,
            space,
            &[self.window.window_id()],
            REMOVE_FROM_ALL_SPACES,
        ) {
            warn!("failed to move window into shield space: {e}");
        }

        debug!(
            space = space.0,
            window = self.window.window_id().0,
            "shield applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::errors::ShieldError;
    use crate::space::{ConnectionId, SpaceId};
    use crate::Result;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        OrderFront,
        SetLevel(WindowLevel),
        CreateSpace(ConnectionId, i32),
        SetSpaceLevel(ConnectionId, SpaceId, i32),
        ShowSpaces(ConnectionId, Vec<SpaceId>),
        MoveWindows(ConnectionId, SpaceId, Vec<WindowId>, i32),
    }

    type CallLog = Arc<Mutex<Vec<Call>>>;

    struct FakeWindow {
        id: WindowId,
        level: Mutex<WindowLevel>,
        log: CallLog,
    }

    impl FakeWindow {
        fn new(id: WindowId, log: CallLog) -> Self {
            Self {
                id,
                level: Mutex::new(WindowLevel::Normal),
                log,
            }
        }
    }

    impl HostWindow for FakeWindow {
        fn window_id(&self) -> WindowId {
            self.id
        }

        fn level(&self) -> WindowLevel {
            *self.level.lock().unwrap()
        }

        fn set_level(&self, level: WindowLevel) {
            *self.level.lock().unwrap() = level;
            self.log.lock().unwrap().push(Call::SetLevel(level));
        }

        fn make_key_and_order_front(&self) {
            self.log.lock().unwrap().push(Call::OrderFront);
        }
    }

    struct RecordingSpaceService {
        cid: ConnectionId,
        next_space: AtomicU64,
        fail_connection: bool,
        fail_create: bool,
        log: CallLog,
    }

    impl RecordingSpaceService {
        fn new(log: CallLog) -> Self {
            Self {
                cid: ConnectionId(7),
                next_space: AtomicU64::new(1),
                fail_connection: false,
                fail_create: false,
                log,
            }
        }
    }

    impl SpaceService for RecordingSpaceService {
        fn main_connection(&self) -> Result<ConnectionId> {
            if self.fail_connection {
                return Err(ShieldError::Connection("no session".into()));
            }
            Ok(self.cid)
        }

        fn create_space(&self, cid: ConnectionId, space_type: i32) -> Result<SpaceId> {
            if self.fail_create {
                return Err(ShieldError::Space("create returned 0".into()));
            }
            self.log
                .lock()
                .unwrap()
                .push(Call::CreateSpace(cid, space_type));
            Ok(SpaceId(self.next_space.fetch_add(1, Ordering::SeqCst)))
        }

        fn set_space_level(&self, cid: ConnectionId, space: SpaceId, level: i32) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(Call::SetSpaceLevel(cid, space, level));
            Ok(())
        }

        fn show_spaces(&self, cid: ConnectionId, spaces: &[SpaceId]) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(Call::ShowSpaces(cid, spaces.to_vec()));
            Ok(())
        }

        fn move_windows_to_space(
            &self,
            cid: ConnectionId,
            space: SpaceId,
            windows: &[WindowId],
            selector: i32,
        ) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(Call::MoveWindows(cid, space, windows.to_vec(), selector));
            Ok(())
        }
    }

    fn shield_with(
        log: &CallLog,
        spaces: RecordingSpaceService,
    ) -> ShieldWindow<FakeWindow> {
        let window = FakeWindow::new(WindowId(42), Arc::clone(log));
        ShieldWindow::new(window, Box::new(spaces))
    }

    fn shield(log: &CallLog) -> ShieldWindow<FakeWindow> {
        let spaces = RecordingSpaceService::new(Arc::clone(log));
        shield_with(log, spaces)
    }

    #[test]
    fn construction_triggers_no_space_calls() {
        let log: CallLog = Arc::default();
        let _shield = shield(&log);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn show_and_activate_call_sequence() {
        let log: CallLog = Arc::default();
        let shield = shield(&log);
        shield.show_and_activate();

        let cid = ConnectionId(7);
        let space = SpaceId(1);
        let expected = vec![
            Call::OrderFront,
            Call::SetLevel(WindowLevel::Floating),
            Call::CreateSpace(cid, SHIELD_SPACE_TYPE),
            Call::SetSpaceLevel(cid, space, SHIELD_SPACE_LEVEL),
            Call::ShowSpaces(cid, vec![space]),
            Call::MoveWindows(cid, space, vec![WindowId(42)], REMOVE_FROM_ALL_SPACES),
        ];
        assert_eq!(*log.lock().unwrap(), expected);
    }

    #[test]
    fn order_front_precedes_shield_steps() {
        let log: CallLog = Arc::default();
        let shield = shield(&log);
        shield.show_and_activate();

        let calls = log.lock().unwrap();
        assert_eq!(calls[0], Call::OrderFront);
        assert!(!calls[1..].contains(&Call::OrderFront));
    }

    #[test]
    fn level_is_floating_after_apply_shield() {
        let log: CallLog = Arc::default();
        let shield = shield(&log);
        assert_eq!(shield.window().level(), WindowLevel::Normal);

        shield.apply_shield();
        assert_eq!(shield.window().level(), WindowLevel::Floating);

        // Reapplying keeps the level pinned.
        shield.apply_shield();
        assert_eq!(shield.window().level(), WindowLevel::Floating);
    }

    #[test]
    fn reapply_creates_a_fresh_space_each_time() {
        let log: CallLog = Arc::default();
        let shield = shield(&log);
        shield.apply_shield();
        shield.apply_shield();

        let calls = log.lock().unwrap();
        let created: Vec<&Call> = calls
            .iter()
            .filter(|c| matches!(c, Call::CreateSpace(..)))
            .collect();
        assert_eq!(created.len(), 2);

        // The two shows target two distinct spaces; old handles are abandoned.
        let moved: Vec<SpaceId> = calls
            .iter()
            .filter_map(|c| match c {
                Call::MoveWindows(_, space, _, _) => Some(*space),
                _ => None,
            })
            .collect();
        assert_eq!(moved, vec![SpaceId(1), SpaceId(2)]);
    }

    #[test]
    fn connection_failure_is_swallowed() {
        let log: CallLog = Arc::default();
        let mut spaces = RecordingSpaceService::new(Arc::clone(&log));
        spaces.fail_connection = true;
        let shield = shield_with(&log, spaces);

        shield.show_and_activate();

        // The level is still raised, but no space call is attempted.
        assert_eq!(shield.window().level(), WindowLevel::Floating);
        let calls = log.lock().unwrap();
        assert_eq!(
            *calls,
            vec![Call::OrderFront, Call::SetLevel(WindowLevel::Floating)]
        );
    }

    #[test]
    fn create_failure_stops_space_steps() {
        let log: CallLog = Arc::default();
        let mut spaces = RecordingSpaceService::new(Arc::clone(&log));
        spaces.fail_create = true;
        let shield = shield_with(&log, spaces);

        shield.apply_shield();

        let calls = log.lock().unwrap();
        assert_eq!(*calls, vec![Call::SetLevel(WindowLevel::Floating)]);
    }

    #[test]
    fn style_mask_bits() {
        let mask = StyleMask::TITLED | StyleMask::CLOSABLE;
        assert_eq!(mask.bits(), 0b11);
        assert!(mask.contains(StyleMask::TITLED));
        assert!(!mask.contains(StyleMask::RESIZABLE));
        assert!(mask.contains(StyleMask::BORDERLESS));
    }

    #[test]
    fn window_level_raw_values() {
        assert_eq!(WindowLevel::Normal.raw(), 0);
        assert_eq!(WindowLevel::Floating.raw(), 3);
    }
}
