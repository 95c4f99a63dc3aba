//! Command: an intent submitted to a location aggregate.
//!
//! Arguments are carried as raw strings: validating them is part of the
//! decision, so malformed input must be representable.

use serde::{Deserialize, Serialize};

/// State-changing commands accepted by the location aggregate.
///
/// Reading a location (`GetLocation`) is a query and lives in
/// [`decide::get_location`](crate::decide::get_location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationCommand {
    AddLocation {
        location_id: String,
        access_token: String,
    },
    RemoveLocation {
        location_id: String,
    },
    ActivateDevice {
        location_id: String,
        device_id: String,
    },
    AssignRoom {
        location_id: String,
        device_id: String,
        room: String,
    },
    ToggleNightlight {
        location_id: String,
        device_id: String,
    },
}

impl LocationCommand {
    /// The aggregate this command is addressed to.
    #[must_use]
    pub fn location_id(&self) -> &str {
        match self {
            Self::AddLocation { location_id, .. }
            | Self::RemoveLocation { location_id }
            | Self::ActivateDevice { location_id, .. }
            | Self::AssignRoom { location_id, .. }
            | Self::ToggleNightlight { location_id, .. } => location_id,
        }
    }

    /// Variant name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddLocation { .. } => "AddLocation",
            Self::RemoveLocation { .. } => "RemoveLocation",
            Self::ActivateDevice { .. } => "ActivateDevice",
            Self::AssignRoom { .. } => "AssignRoom",
            Self::ToggleNightlight { .. } => "ToggleNightlight",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_route_every_command_by_location_id() {
        let commands = [
            LocationCommand::AddLocation {
                location_id: "loc1".to_string(),
                access_token: "t".to_string(),
            },
            LocationCommand::RemoveLocation {
                location_id: "loc1".to_string(),
            },
            LocationCommand::AssignRoom {
                location_id: "loc1".to_string(),
                device_id: "d".to_string(),
                room: "den".to_string(),
            },
        ];
        assert!(commands.iter().all(|c| c.location_id() == "loc1"));
    }

    #[test]
    fn should_name_command_after_its_variant() {
        let command = LocationCommand::ToggleNightlight {
            location_id: "loc1".to_string(),
            device_id: "d".to_string(),
        };
        assert_eq!(command.name(), "ToggleNightlight");
    }
}
