/*
Copyright 2020 Timo Saarinen

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Process-lifetime lookup tables used by track validation (C2): MID
//! country codes, navigation status, ship type. Read-only, shared across
//! every `Track` without synchronization.

/// Maritime Identification Digits grouped by country. Only a selection of
/// countries is listed, matching the upstream generator this crate is
/// modeled on. Some countries carry more than one MID (e.g. the USA
/// holds five), so membership is checked against the flattened list in
/// [`is_known_mid`].
const MID_TABLE: &[(&str, &[u16])] = &[
    ("Antigua and Barbuda", &[305]),
    ("Bahamas", &[308, 309, 311]),
    ("Belgium", &[205]),
    ("Canada", &[316]),
    ("Germany", &[211, 218]),
    ("Denmark", &[219, 220]),
    ("Spain", &[224, 225]),
    ("France", &[226, 227, 228]),
    ("Finland", &[230]),
    ("United Kingdom", &[232, 233, 234, 235]),
    ("Greece", &[237, 239, 240, 241]),
    ("Netherlands", &[244, 245, 246]),
    ("Italy", &[247]),
    ("Ireland", &[250]),
    ("Iceland", &[251]),
    ("Malta", &[248, 249]),
    ("Norway", &[257, 258, 259]),
    ("Poland", &[261]),
    ("Portugal", &[263]),
    ("Romania", &[264]),
    ("Sweden", &[265, 266]),
    ("Turkey", &[271]),
    ("Ukraine", &[272]),
    ("Russian Federation", &[273]),
    ("Latvia", &[275]),
    ("Estonia", &[276]),
    ("Lithuania", &[277]),
    ("Slovenia", &[278]),
    ("USA", &[338, 366, 367, 368, 369]),
];

/// Returns whether `mid` (the first three digits of an MMSI) belongs to a
/// known country in [`MID_TABLE`].
pub(crate) fn is_known_mid(mid: u16) -> bool {
    MID_TABLE.iter().any(|(_, codes)| codes.contains(&mid))
}

/// Navigational status for AIS message type 1. Only the subset the AIS
/// standard actually defines is valid (9..13 are reserved).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationStatus {
    UnderWayUsingEngine = 0,
    AtAnchor = 1,
    NotUnderCommand = 2,
    RestrictedManoeuverability = 3,
    ConstrainedByHerDraught = 4,
    Moored = 5,
    Aground = 6,
    EngagedInFishing = 7,
    UnderWaySailing = 8,
    AisSartActive = 14,
    Undefined = 15,
}

impl NavigationStatus {
    pub(crate) fn from_u8(value: u8) -> Option<Self> {
        use NavigationStatus::*;
        Some(match value {
            0 => UnderWayUsingEngine,
            1 => AtAnchor,
            2 => NotUnderCommand,
            3 => RestrictedManoeuverability,
            4 => ConstrainedByHerDraught,
            5 => Moored,
            6 => Aground,
            7 => EngagedInFishing,
            8 => UnderWaySailing,
            14 => AisSartActive,
            15 => Undefined,
            _ => return None,
        })
    }
}

/// Ship type codes for AIS message type 5. Only a selection is listed;
/// for the full table see
/// <https://gpsd.gitlab.io/gpsd/AIVDM.html#_aivdmaivdo_sentence_layer>.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipType {
    NotAvailable = 0,
    WingInGround = 20,
    Fishing = 30,
    Towing = 31,
    TowingLengthOver200m = 32,
    DredgingOrUnderwaterOps = 33,
    DivingOps = 34,
    MilitaryOps = 35,
    Sailing = 36,
    PleasureCraft = 37,
    HighSpeedCraft = 40,
    PilotVessel = 50,
    SarVessel = 51,
    Tug = 52,
    PortTender = 53,
    AntiPollutionEquipment = 54,
    LawEnforcement = 55,
    MedicalTransport = 58,
    NonCombatShip = 59,
    Passenger = 60,
    Cargo = 70,
    Tanker = 80,
    OtherType = 90,
}

impl ShipType {
    pub(crate) fn from_u8(value: u8) -> Option<Self> {
        use ShipType::*;
        Some(match value {
            0 => NotAvailable,
            20 => WingInGround,
            30 => Fishing,
            31 => Towing,
            32 => TowingLengthOver200m,
            33 => DredgingOrUnderwaterOps,
            34 => DivingOps,
            35 => MilitaryOps,
            36 => Sailing,
            37 => PleasureCraft,
            40 => HighSpeedCraft,
            50 => PilotVessel,
            51 => SarVessel,
            52 => Tug,
            53 => PortTender,
            54 => AntiPollutionEquipment,
            55 => LawEnforcement,
            58 => MedicalTransport,
            59 => NonCombatShip,
            60 => Passenger,
            70 => Cargo,
            80 => Tanker,
            90 => OtherType,
            _ => return None,
        })
    }
}

/// Returns the first three decimal digits of `mmsi`, i.e. its MID.
///
/// Kept as a small free function (not folded into `is_known_mid`) because
/// loaders that validate MMSIs ahead of `Track` construction want it on
/// its own.
pub fn mid_of(mmsi: u32) -> u16 {
    (mmsi / 1_000_000) as u16
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_mid() {
        assert!(is_known_mid(mid_of(205344990)));
        assert!(!is_known_mid(mid_of(123344990)));
    }

    #[test]
    fn test_mid_of() {
        assert_eq!(mid_of(123456789), 123);
    }

    #[test]
    fn test_nav_status_round_trip() {
        assert_eq!(NavigationStatus::from_u8(15), Some(NavigationStatus::Undefined));
        assert_eq!(NavigationStatus::from_u8(9), None);
    }

    #[test]
    fn test_ship_type_round_trip() {
        assert_eq!(ShipType::from_u8(70), Some(ShipType::Cargo));
        assert_eq!(ShipType::from_u8(1), None);
    }
}
