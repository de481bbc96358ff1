//! ConnectionStatus - Agent reachability

use serde::{Deserialize, Serialize};

use super::descriptor::{Descriptor, Tone};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Online,
    Offline,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ConnectionStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectionStatus::Online)
    }

    pub fn descriptor(&self) -> Descriptor {
        if self.is_online() {
            Descriptor::new("●", "Online", Tone::Accent)
        } else {
            Descriptor::new("○", "Offline", Tone::Muted)
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Online => write!(f, "online"),
            ConnectionStatus::Offline => write!(f, "offline"),
            ConnectionStatus::Unknown => write!(f, "unknown"),
        }
    }
}
