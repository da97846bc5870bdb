// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effect node identity.

use core::fmt;

/// Sentinel value indicating "no input" in wiring fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in an [`EffectGraphStore`](super::EffectGraphStore).
///
/// Contains both a slot index and the store's build serial so that handles
/// from a previous graph build can be detected after a rebuild. Nodes are
/// never destroyed individually; the whole graph is rebuilt, so the serial is
/// per store, not per slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Build serial; must match the store's serial.
    pub(crate) serial: u32,
}

impl NodeId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the build serial.
    #[inline]
    #[must_use]
    pub const fn serial(self) -> u32 {
        self.serial
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@g{})", self.idx, self.serial)
    }
}
