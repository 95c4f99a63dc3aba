//! Command handling: `decide(state, command) -> event | rejection`.
//!
//! Pure: it reads the current state, never mutates it, and performs no IO.
//! Format validation runs before any existence check.

use crate::command::LocationCommand;
use crate::error::{NotFoundError, Rejection};
use crate::event::LocationEvent;
use crate::id::{AccessToken, LocationId};
use crate::location::{Device, Location};

/// Decide which event, if any, a command produces against `state`.
///
/// `state` is the aggregate addressed by the command's location id (`None`
/// when it does not exist).
///
/// # Errors
///
/// - [`Rejection::Validation`] when `AddLocation` carries a malformed id
///   (checked first) or access token.
/// - [`Rejection::AlreadyExists`] when `AddLocation` targets an existing
///   location; the access token is immutable once set.
/// - [`Rejection::NotFound`] when the location, or the device a command
///   refers to, is missing.
pub fn decide(
    state: Option<&Location>,
    command: &LocationCommand,
) -> Result<LocationEvent, Rejection> {
    match command {
        LocationCommand::AddLocation {
            location_id,
            access_token,
        } => {
            let location_id: LocationId = location_id.parse()?;
            let access_token: AccessToken = access_token.parse()?;
            if existing(state, location_id.as_str()).is_ok() {
                return Err(Rejection::AlreadyExists);
            }
            Ok(LocationEvent::LocationAdded {
                location_id,
                access_token,
            })
        }
        LocationCommand::RemoveLocation { location_id } => {
            let location = existing(state, location_id)?;
            Ok(LocationEvent::LocationRemoved {
                location_id: location.id().clone(),
            })
        }
        LocationCommand::ActivateDevice {
            location_id,
            device_id,
        } => {
            let location = existing(state, location_id)?;
            Ok(LocationEvent::DeviceActivated {
                location_id: location.id().clone(),
                device_id: device_id.clone(),
            })
        }
        LocationCommand::AssignRoom {
            location_id,
            device_id,
            room,
        } => {
            let location = existing(state, location_id)?;
            let device = existing_device(location, device_id)?;
            Ok(LocationEvent::RoomAssigned {
                location_id: location.id().clone(),
                device_id: device.device_id.clone(),
                room: room.clone(),
            })
        }
        LocationCommand::ToggleNightlight {
            location_id,
            device_id,
        } => {
            let location = existing(state, location_id)?;
            let device = existing_device(location, device_id)?;
            Ok(LocationEvent::NightlightToggled {
                location_id: location.id().clone(),
                device_id: device.device_id.clone(),
                nightlight_on: !device.nightlight_on,
            })
        }
    }
}

/// The `GetLocation` query.
///
/// # Errors
///
/// Returns [`NotFoundError::Location`] when the location does not exist.
pub fn get_location<'a>(
    state: Option<&'a Location>,
    location_id: &str,
) -> Result<&'a Location, Rejection> {
    existing(state, location_id)
}

fn existing<'a>(state: Option<&'a Location>, location_id: &str) -> Result<&'a Location, Rejection> {
    state
        .filter(|location| location.id().as_str() == location_id)
        .ok_or(Rejection::NotFound(NotFoundError::Location))
}

fn existing_device<'a>(location: &'a Location, device_id: &str) -> Result<&'a Device, Rejection> {
    location.device(device_id).ok_or_else(|| {
        NotFoundError::Device {
            device_id: device_id.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::evolve::evolve;

    const LOCATION: &str = "customerId1";
    const TOKEN: &str = "accessToken";

    fn add(location_id: &str, access_token: &str) -> LocationCommand {
        LocationCommand::AddLocation {
            location_id: location_id.to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn activate(device_id: &str) -> LocationCommand {
        LocationCommand::ActivateDevice {
            location_id: LOCATION.to_string(),
            device_id: device_id.to_string(),
        }
    }

    fn toggle(device_id: &str) -> LocationCommand {
        LocationCommand::ToggleNightlight {
            location_id: LOCATION.to_string(),
            device_id: device_id.to_string(),
        }
    }

    /// Decide and apply, panicking on rejection.
    fn run(state: Option<Location>, command: &LocationCommand) -> Option<Location> {
        let event = decide(state.as_ref(), command).unwrap();
        evolve(state, &event)
    }

    fn with_devices(ids: &[&str]) -> Option<Location> {
        let mut state = run(None, &add(LOCATION, TOKEN));
        for id in ids {
            state = run(state, &activate(id));
        }
        state
    }

    #[test]
    fn should_emit_location_added_when_arguments_are_valid() {
        let event = decide(None, &add(LOCATION, TOKEN)).unwrap();
        assert_eq!(
            event,
            LocationEvent::LocationAdded {
                location_id: LOCATION.parse().unwrap(),
                access_token: TOKEN.parse().unwrap(),
            }
        );
    }

    #[test]
    fn should_reject_non_alphanumeric_location_id() {
        let result = decide(None, &add("bad/id", TOKEN));
        assert_eq!(
            result,
            Err(Rejection::Validation(
                ValidationError::LocationIdNotAlphanumeric
            ))
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Customer location id must be alphanumeric"
        );
    }

    #[test]
    fn should_reject_non_alphanumeric_access_token() {
        let result = decide(None, &add(LOCATION, "bad/token"));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Access token must be alphanumeric"
        );
    }

    #[test]
    fn should_check_location_id_before_access_token() {
        let result = decide(None, &add("bad id", "bad token"));
        assert_eq!(
            result,
            Err(Rejection::Validation(
                ValidationError::LocationIdNotAlphanumeric
            ))
        );
    }

    #[test]
    fn should_reject_add_when_location_already_exists() {
        let state = with_devices(&[]);
        let result = decide(state.as_ref(), &add(LOCATION, "otherToken"));
        assert_eq!(result, Err(Rejection::AlreadyExists));
    }

    #[test]
    fn should_ignore_state_of_another_location_on_add() {
        let state = with_devices(&[]);
        let result = decide(state.as_ref(), &add("customerId2", TOKEN));
        assert!(matches!(
            result,
            Ok(LocationEvent::LocationAdded { ref location_id, .. }) if location_id.as_str() == "customerId2"
        ));
    }

    #[test]
    fn should_validate_format_before_existence_on_add() {
        let state = with_devices(&[]);
        let result = decide(state.as_ref(), &add(LOCATION, "bad/token"));
        assert_eq!(
            result,
            Err(Rejection::Validation(
                ValidationError::AccessTokenNotAlphanumeric
            ))
        );
    }

    #[test]
    fn should_reject_every_other_command_when_location_missing() {
        let commands = [
            LocationCommand::RemoveLocation {
                location_id: LOCATION.to_string(),
            },
            activate("deviceId1"),
            LocationCommand::AssignRoom {
                location_id: LOCATION.to_string(),
                device_id: "deviceId1".to_string(),
                room: "den".to_string(),
            },
            toggle("deviceId1"),
        ];
        for command in &commands {
            let err = decide(None, command).unwrap_err();
            assert_eq!(err.to_string(), "customerLocation does not exist.");
        }
    }

    #[test]
    fn should_not_match_state_of_another_location() {
        let state = with_devices(&[]);
        let command = LocationCommand::RemoveLocation {
            location_id: "someoneElse".to_string(),
        };
        assert_eq!(
            decide(state.as_ref(), &command),
            Err(Rejection::NotFound(NotFoundError::Location))
        );
    }

    #[test]
    fn should_activate_devices_in_order() {
        let state = with_devices(&["deviceId1", "deviceId2", "deviceId3"]);
        let location = get_location(state.as_ref(), LOCATION).unwrap();

        let ids: Vec<&str> = location
            .devices()
            .iter()
            .map(|d| d.device_id.as_str())
            .collect();
        assert_eq!(ids, ["deviceId1", "deviceId2", "deviceId3"]);
        assert!(
            location
                .devices()
                .iter()
                .all(|d| d.activated && d.room.is_empty() && !d.nightlight_on)
        );
    }

    #[test]
    fn should_accept_reactivation_of_present_device() {
        let state = with_devices(&["deviceId1"]);
        let event = decide(state.as_ref(), &activate("deviceId1")).unwrap();
        assert!(matches!(event, LocationEvent::DeviceActivated { .. }));
    }

    #[test]
    fn should_assign_room_to_one_device_only() {
        let state = with_devices(&["deviceId1", "deviceId2", "deviceId3"]);
        let command = LocationCommand::AssignRoom {
            location_id: LOCATION.to_string(),
            device_id: "deviceId2".to_string(),
            room: "person-cave".to_string(),
        };
        let event = decide(state.as_ref(), &command).unwrap();
        assert_eq!(
            event,
            LocationEvent::RoomAssigned {
                location_id: LOCATION.parse().unwrap(),
                device_id: "deviceId2".to_string(),
                room: "person-cave".to_string(),
            }
        );

        let state = evolve(state, &event);
        let location = get_location(state.as_ref(), LOCATION).unwrap();
        assert_eq!(location.device("deviceId2").unwrap().room, "person-cave");
        assert!(location.device("deviceId1").unwrap().room.is_empty());
        assert!(location.device("deviceId3").unwrap().room.is_empty());
    }

    #[test]
    fn should_reject_room_assignment_for_unknown_device() {
        let state = with_devices(&["deviceId1"]);
        let command = LocationCommand::AssignRoom {
            location_id: LOCATION.to_string(),
            device_id: "ghost".to_string(),
            room: "den".to_string(),
        };
        assert_eq!(
            decide(state.as_ref(), &command),
            Err(Rejection::NotFound(NotFoundError::Device {
                device_id: "ghost".to_string()
            }))
        );
    }

    #[test]
    fn should_invert_nightlight_on_each_toggle() {
        let state = with_devices(&["deviceId1", "deviceId2"]);

        let first = decide(state.as_ref(), &toggle("deviceId2")).unwrap();
        assert_eq!(
            first,
            LocationEvent::NightlightToggled {
                location_id: LOCATION.parse().unwrap(),
                device_id: "deviceId2".to_string(),
                nightlight_on: true,
            }
        );

        let state = evolve(state, &first);
        let second = decide(state.as_ref(), &toggle("deviceId2")).unwrap();
        assert!(matches!(
            second,
            LocationEvent::NightlightToggled {
                nightlight_on: false,
                ..
            }
        ));
    }

    #[test]
    fn should_reject_toggle_for_unknown_device() {
        let state = with_devices(&[]);
        let err = decide(state.as_ref(), &toggle("deviceId9")).unwrap_err();
        assert_eq!(err.to_string(), "device deviceId9 does not exist.");
    }

    #[test]
    fn should_reject_everything_but_add_after_removal() {
        let state = with_devices(&["deviceId1"]);
        let state = run(
            state,
            &LocationCommand::RemoveLocation {
                location_id: LOCATION.to_string(),
            },
        );

        let err = get_location(state.as_ref(), LOCATION).unwrap_err();
        assert_eq!(err.to_string(), "customerLocation does not exist.");
        assert!(decide(state.as_ref(), &activate("deviceId1")).is_err());

        let state = run(state, &add(LOCATION, TOKEN));
        let location = get_location(state.as_ref(), LOCATION).unwrap();
        assert!(location.devices().is_empty());
    }

    #[test]
    fn should_leave_state_untouched_on_rejection() {
        let state = with_devices(&["deviceId1"]);
        let before = state.clone();
        let _ = decide(state.as_ref(), &toggle("missing"));
        assert_eq!(state, before);
    }
}
