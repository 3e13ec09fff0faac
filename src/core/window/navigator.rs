//=========================================================================
// Navigator
//=========================================================================
//
// Queued navigation requests from windows and listeners to the service.
//
// Architecture:
//   Window::show() / listener ──Navigator::send()──> channel
//                                                       ↓
//   WindowService ──drain_requests()── after each operation settles
//
// Requests are applied in FIFO order once the operation that produced
// them has finished, so navigation never nests inside itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::Sender;
use log::warn;

//=== WindowKey ===========================================================

slotmap::new_key_type! {
    /// Stable handle to a registered window.
    pub struct WindowKey;
}

//=== WindowTarget ========================================================

/// A window addressed either by handle or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowTarget {
    Key(WindowKey),
    Id(String),
}

impl From<WindowKey> for WindowTarget {
    fn from(key: WindowKey) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for WindowTarget {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for WindowTarget {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<&String> for WindowTarget {
    fn from(id: &String) -> Self {
        Self::Id(id.clone())
    }
}

impl fmt::Display for WindowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{:?}", key),
            Self::Id(id) => write!(f, "'{}'", id),
        }
    }
}

//=== NavRequest ==========================================================

/// A deferred navigation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRequest {
    Show { target: WindowTarget, instant: bool },
    Hide { target: WindowTarget, instant: bool },
    Back { instant: bool },
}

//=== Navigator ===========================================================

/// Cloneable handle for queueing navigation requests.
#[derive(Clone)]
pub struct Navigator {
    sender: Sender<NavRequest>,
}

impl Navigator {
    pub(crate) fn new(sender: Sender<NavRequest>) -> Self {
        Self { sender }
    }

    pub fn show(&self, target: impl Into<WindowTarget>, instant: bool) {
        self.send(NavRequest::Show {
            target: target.into(),
            instant,
        });
    }

    pub fn hide(&self, target: impl Into<WindowTarget>, instant: bool) {
        self.send(NavRequest::Hide {
            target: target.into(),
            instant,
        });
    }

    pub fn back(&self, instant: bool) {
        self.send(NavRequest::Back { instant });
    }

    pub fn send(&self, request: NavRequest) {
        if let Err(e) = self.sender.send(request) {
            warn!("Navigation request dropped, service is gone: {:?}", e.into_inner());
        }
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("pending", &self.sender.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
