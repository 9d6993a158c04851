//! The seven playable powers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed playable factions in a session.
///
/// The engine addresses powers by their upper-case names ("FRANCE"),
/// so the string round-trip here must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Power {
    Austria,
    England,
    France,
    Germany,
    Italy,
    Russia,
    Turkey,
}

impl Power {
    /// All powers, in canonical order.
    pub const ALL: [Power; 7] = [
        Power::Austria,
        Power::England,
        Power::France,
        Power::Germany,
        Power::Italy,
        Power::Russia,
        Power::Turkey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Power::Austria => "AUSTRIA",
            Power::England => "ENGLAND",
            Power::France => "FRANCE",
            Power::Germany => "GERMANY",
            Power::Italy => "ITALY",
            Power::Russia => "RUSSIA",
            Power::Turkey => "TURKEY",
        }
    }

    /// Case-insensitive parse; `None` for anything outside the seven.
    pub fn parse(s: &str) -> Option<Power> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AUSTRIA" => Some(Power::Austria),
            "ENGLAND" => Some(Power::England),
            "FRANCE" => Some(Power::France),
            "GERMANY" => Some(Power::Germany),
            "ITALY" => Some(Power::Italy),
            "RUSSIA" => Some(Power::Russia),
            "TURKEY" => Some(Power::Turkey),
            _ => None,
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
