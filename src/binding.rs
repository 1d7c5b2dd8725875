// Global listener bookkeeping. The shell owns the actual addEventListener /
// removeEventListener calls; the engine tells it when to make them.

use serde::{Deserialize, Serialize};

/// Window-level listeners the shell registers on the engine's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerKind {
    /// `keydown`, used by the open lightbox.
    Keydown,
    /// `pointermove`, used by the evasive control on the gateway.
    Pointermove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerAction {
    Attach,
    Detach,
}

/// Instruction for the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerCommand {
    pub listener: ListenerKind,
    pub action: ListenerAction,
}

/// Tracks one listener registration and emits commands only on edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerBinding {
    kind: ListenerKind,
    attached: bool,
}

impl ListenerBinding {
    pub fn new(kind: ListenerKind) -> Self {
        ListenerBinding {
            kind,
            attached: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Bring the registration in line with `wanted`.
    pub fn sync(&mut self, wanted: bool) -> Option<ListenerCommand> {
        if wanted == self.attached {
            return None;
        }
        self.attached = wanted;
        let action = if wanted {
            ListenerAction::Attach
        } else {
            ListenerAction::Detach
        };
        Some(ListenerCommand {
            listener: self.kind,
            action,
        })
    }

    pub fn dispose(&mut self) -> Option<ListenerCommand> {
        self.sync(false)
    }
}
