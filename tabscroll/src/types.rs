use core::fmt;

use crate::TabKey;

/// A member of a closed set of navigable views.
///
/// `ALL` must list every value exactly once; it seeds the position store and drives
/// [`crate::ScrollMemory::reset_all_positions`].
pub trait TabId: TabKey + Copy + fmt::Debug + 'static {
    const ALL: &'static [Self];
}

/// The top-level views of the Orbit client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Tab {
    Feed,
    Explore,
    Messages,
    Notifications,
    Connections,
    Profile,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Explore => "explore",
            Self::Messages => "messages",
            Self::Notifications => "notifications",
            Self::Connections => "connections",
            Self::Profile => "profile",
        }
    }
}

impl TabId for Tab {
    const ALL: &'static [Self] = &[
        Self::Feed,
        Self::Explore,
        Self::Messages,
        Self::Notifications,
        Self::Connections,
        Self::Profile,
    ];
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a restore reaches the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestoreMode {
    /// Queue the write until the host runs the next frame (after its layout pass).
    #[default]
    NextFrame,
    /// Write synchronously. Only safe when the surface already has its final size.
    Immediate,
}
