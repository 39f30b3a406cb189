//! The subset of the FIT profile needed to recover tracks.
//!
//! The profile names global messages and, for each, the fields that carry
//! meaning for a track along with the scale and offset of their stored values.
//! Anything not listed here is decoded structurally but never interpreted.

/// A global message number the decoder recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// `file_id`, describing the document.
    FileId,
    /// `session`, summarizing the activity.
    Session,
    /// `lap`, summarizing part of the activity.
    Lap,
    /// `record`, a sampled point of the activity.
    Record,
    /// Any other message, of which only the timestamp is read.
    Opaque(u16),
}

impl MessageKind {
    pub fn from_global(global: u16) -> Self {
        match global {
            0 => Self::FileId,
            18 => Self::Session,
            19 => Self::Lap,
            20 => Self::Record,
            _ => Self::Opaque(global),
        }
    }

    /// Whether data records of this message summarize the activity.
    pub fn is_summary(self) -> bool {
        matches!(self, Self::Session | Self::Lap)
    }
}

/// The meaning of a field within its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Seconds since the FIT epoch at which the message was recorded.
    Timestamp,
    /// Seconds since the FIT epoch at which the document was created.
    TimeCreated,
    /// Seconds since the FIT epoch at which the summarized period began.
    StartTime,
    /// Latitude, in semicircles.
    Latitude,
    /// Longitude, in semicircles.
    Longitude,
    /// Altitude in metres, at a 16-bit resolution.
    Altitude,
    /// Altitude in metres, at a 32-bit resolution.
    EnhancedAltitude,
    /// The `sport` enumeration.
    Sport,
}

/// How to interpret the stored value of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldProfile {
    pub role: Role,
    pub scale: f64,
    pub offset: f64,
}

impl FieldProfile {
    const fn new(role: Role) -> Self {
        Self::scaled(role, 1.0, 0.0)
    }

    const fn scaled(role: Role, scale: f64, offset: f64) -> Self {
        Self {
            role,
            scale,
            offset,
        }
    }

    /// Convert a stored value to its real-world value.
    pub fn apply(&self, x: f64) -> f64 {
        x / self.scale - self.offset
    }
}

/// Field number of the timestamp shared by all messages.
pub const TIMESTAMP_FIELD: u8 = 253;

/// Look up the profile of a field, if it carries meaning for a track.
///
/// Timestamps are profiled for every message, including opaque ones, since any
/// of them may anchor a following compressed timestamp.
pub fn field_profile(kind: MessageKind, field: u8) -> Option<FieldProfile> {
    use MessageKind::*;

    Some(match (kind, field) {
        (_, TIMESTAMP_FIELD) => FieldProfile::new(Role::Timestamp),
        (FileId, 4) => FieldProfile::new(Role::TimeCreated),
        (Record, 0) => FieldProfile::new(Role::Latitude),
        (Record, 1) => FieldProfile::new(Role::Longitude),
        (Record, 2) => FieldProfile::scaled(Role::Altitude, 5.0, 500.0),
        (Record, 78) => FieldProfile::scaled(Role::EnhancedAltitude, 5.0, 500.0),
        (Session | Lap, 2) => FieldProfile::new(Role::StartTime),
        (Session, 5) | (Lap, 25) => FieldProfile::new(Role::Sport),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn altitude_is_scaled_and_offset() {
        let profile = field_profile(MessageKind::Record, 2);
        // 2500 / 5 - 500 = 0 m.
        assert_eq!(profile.map(|p| p.apply(2500.0)), Some(0.0));
        assert_eq!(profile.map(|p| p.apply(3000.0)), Some(100.0));
    }

    #[test]
    fn fields_are_scoped_to_their_message() {
        assert_eq!(
            field_profile(MessageKind::Session, 5).map(|p| p.role),
            Some(Role::Sport)
        );
        assert_eq!(field_profile(MessageKind::Lap, 5), None);
        assert_eq!(field_profile(MessageKind::from_global(34), 5), None);
        assert_eq!(
            field_profile(MessageKind::Opaque(21), TIMESTAMP_FIELD).map(|p| p.role),
            Some(Role::Timestamp)
        );
    }
}
