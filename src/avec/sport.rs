//! The `sport` enumeration of the FIT profile.

use core::fmt;

macro_rules! sports {
    ($($variant:ident = $value:literal => $label:literal,)*) => {
        /// The kind of activity a document records.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Sport {
            $(
                #[doc = concat!("`", $label, "`")]
                $variant,
            )*
            /// A value missing from this enumeration.
            Other(u8),
        }

        impl Sport {
            pub fn from_value(x: u8) -> Self {
                match x {
                    $($value => Self::$variant,)*
                    x => Self::Other(x),
                }
            }

            /// The stored value of this sport.
            pub fn value(self) -> u8 {
                match self {
                    $(Self::$variant => $value,)*
                    Self::Other(x) => x,
                }
            }

            /// The profile's name for this sport.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                    Self::Other(_) => "other",
                }
            }
        }
    };
}

sports! {
    Generic = 0 => "generic",
    Running = 1 => "running",
    Cycling = 2 => "cycling",
    Transition = 3 => "transition",
    FitnessEquipment = 4 => "fitness_equipment",
    Swimming = 5 => "swimming",
    Basketball = 6 => "basketball",
    Soccer = 7 => "soccer",
    Tennis = 8 => "tennis",
    AmericanFootball = 9 => "american_football",
    Training = 10 => "training",
    Walking = 11 => "walking",
    CrossCountrySkiing = 12 => "cross_country_skiing",
    AlpineSkiing = 13 => "alpine_skiing",
    Snowboarding = 14 => "snowboarding",
    Rowing = 15 => "rowing",
    Mountaineering = 16 => "mountaineering",
    Hiking = 17 => "hiking",
    Multisport = 18 => "multisport",
    Paddling = 19 => "paddling",
    Flying = 20 => "flying",
    EBiking = 21 => "e_biking",
    Motorcycling = 22 => "motorcycling",
    Boating = 23 => "boating",
    Driving = 24 => "driving",
    Golf = 25 => "golf",
    HangGliding = 26 => "hang_gliding",
    HorsebackRiding = 27 => "horseback_riding",
    Hunting = 28 => "hunting",
    Fishing = 29 => "fishing",
    InlineSkating = 30 => "inline_skating",
    RockClimbing = 31 => "rock_climbing",
    Sailing = 32 => "sailing",
    IceSkating = 33 => "ice_skating",
    SkyDiving = 34 => "sky_diving",
    Snowshoeing = 35 => "snowshoeing",
    Snowmobiling = 36 => "snowmobiling",
    StandUpPaddleboarding = 37 => "stand_up_paddleboarding",
    Surfing = 38 => "surfing",
    Wakeboarding = 39 => "wakeboarding",
    WaterSkiing = 40 => "water_skiing",
    Kayaking = 41 => "kayaking",
    Rafting = 42 => "rafting",
    Windsurfing = 43 => "windsurfing",
    Kitesurfing = 44 => "kitesurfing",
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(x) => write!(f, "other ({x})"),
            _ => f.write_str(self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_round_trip_through_labels() {
        assert_eq!(Sport::from_value(2), Sport::Cycling);
        assert_eq!(Sport::Cycling.label(), "cycling");
        assert_eq!(Sport::from_value(17).value(), 17);
        assert_eq!(Sport::from_value(200), Sport::Other(200));
        assert_eq!(Sport::Other(200).value(), 200);
    }
}
