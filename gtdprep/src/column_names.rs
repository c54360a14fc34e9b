//! This module stores the names of the Global Terrorism Database columns kept by the cleaning
//! pipeline. Note that these must match the header of the upstream GTD export verbatim!

pub const EVENT_ID: &str = "eventid";
pub const YEAR: &str = "iyear";
pub const MONTH: &str = "imonth";
pub const DAY: &str = "iday";
pub const EXTENDED: &str = "extended";

pub const COUNTRY: &str = "country";
pub const COUNTRY_TXT: &str = "country_txt";
pub const REGION: &str = "region";
pub const REGION_TXT: &str = "region_txt";
pub const PROVSTATE: &str = "provstate";
pub const CITY: &str = "city";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

pub const MULTIPLE: &str = "multiple";
pub const SUCCESS: &str = "success";
pub const SUICIDE: &str = "suicide";

pub const ATTACK_TYPE_TXT: &str = "attacktype1_txt";
pub const ATTACK_TYPE: &str = "attacktype1";
pub const TARGET_TYPE: &str = "targtype1";
pub const TARGET_TYPE_TXT: &str = "targtype1_txt";
pub const TARGET: &str = "target1";
pub const NATIONALITY: &str = "natlty1";
pub const NATIONALITY_TXT: &str = "natlty1_txt";

pub const GROUP_NAME: &str = "gname";
pub const N_PERPS: &str = "nperps";
pub const INDIVIDUAL: &str = "individual";

pub const WEAPON_TYPE: &str = "weaptype1";
pub const WEAPON_TYPE_TXT: &str = "weaptype1_txt";
pub const WEAPON_SUBTYPE: &str = "weapsubtype1";
pub const WEAPON_SUBTYPE_TXT: &str = "weapsubtype1_txt";

pub const N_KILL: &str = "nkill";
pub const N_WOUND: &str = "nwound";
pub const DB_SOURCE: &str = "dbsource";

/// The columns written to the cleaned output, in output order.
pub const SELECTED: [&str; 33] = [
    EVENT_ID,
    YEAR,
    MONTH,
    DAY,
    EXTENDED,
    COUNTRY,
    COUNTRY_TXT,
    REGION,
    REGION_TXT,
    PROVSTATE,
    CITY,
    LATITUDE,
    LONGITUDE,
    MULTIPLE,
    SUCCESS,
    SUICIDE,
    ATTACK_TYPE_TXT,
    ATTACK_TYPE,
    TARGET_TYPE,
    TARGET_TYPE_TXT,
    TARGET,
    NATIONALITY,
    NATIONALITY_TXT,
    GROUP_NAME,
    N_PERPS,
    INDIVIDUAL,
    WEAPON_TYPE,
    WEAPON_TYPE_TXT,
    WEAPON_SUBTYPE,
    WEAPON_SUBTYPE_TXT,
    N_KILL,
    N_WOUND,
    DB_SOURCE,
];

/// Owned copy of [`SELECTED`], used as the default column set in `Config`.
pub fn selected() -> Vec<String> {
    SELECTED.iter().map(|c| c.to_string()).collect()
}
