//! Response records.
//!
//! Each struct mirrors one JSON shape returned by the eBird API. Fields the
//! API omits or sends as `null` decode to their zero value, so every record
//! implements `Default`. Serialization uses the API's field names, which makes fixtures
//! easy to write in tests.

use serde::{Deserialize, Deserializer, Serialize};

/// Reads JSON `null` as the field's default, like a missing key.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One observation from the `data/obs` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Observation {
    #[serde(deserialize_with = "null_default")]
    pub species_code: String,
    #[serde(deserialize_with = "null_default")]
    pub com_name: String,
    #[serde(deserialize_with = "null_default")]
    pub sci_name: String,
    #[serde(deserialize_with = "null_default")]
    pub loc_id: String,
    #[serde(deserialize_with = "null_default")]
    pub loc_name: String,
    /// Local date and time, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`.
    #[serde(deserialize_with = "null_default")]
    pub obs_dt: String,
    /// `None` when the species was reported present but not counted.
    pub how_many: Option<u32>,
    #[serde(deserialize_with = "null_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_default")]
    pub lng: f64,
    #[serde(deserialize_with = "null_default")]
    pub obs_valid: bool,
    #[serde(deserialize_with = "null_default")]
    pub obs_reviewed: bool,
    #[serde(deserialize_with = "null_default")]
    pub location_private: bool,
    #[serde(deserialize_with = "null_default")]
    pub sub_id: String,
    #[serde(deserialize_with = "null_default")]
    pub exotic_category: String,
}

/// A location as embedded in checklist feeds and returned by hotspot info.
///
/// The API reports some values twice under different keys (`locId`/`locID`,
/// `name`/`locName`, `latitude`/`lat`); both spellings are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    #[serde(deserialize_with = "null_default")]
    pub loc_id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_default")]
    pub country_code: String,
    #[serde(deserialize_with = "null_default")]
    pub country_name: String,
    #[serde(deserialize_with = "null_default")]
    pub subnational1_name: String,
    #[serde(deserialize_with = "null_default")]
    pub subnational1_code: String,
    #[serde(deserialize_with = "null_default")]
    pub subnational2_code: String,
    #[serde(deserialize_with = "null_default")]
    pub subnational2_name: String,
    #[serde(deserialize_with = "null_default")]
    pub is_hotspot: bool,
    #[serde(deserialize_with = "null_default")]
    pub loc_name: String,
    #[serde(deserialize_with = "null_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_default")]
    pub lng: f64,
    #[serde(deserialize_with = "null_default")]
    pub hierarchical_name: String,
    #[serde(rename = "locID")]
    #[serde(deserialize_with = "null_default")]
    pub loc_id_alt: String,
}

/// Result of the hotspot info lookup.
pub type HotspotInfo = Location;

/// One hotspot from the region and nearby hotspot lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hotspot {
    #[serde(deserialize_with = "null_default")]
    pub loc_id: String,
    #[serde(deserialize_with = "null_default")]
    pub loc_name: String,
    #[serde(deserialize_with = "null_default")]
    pub country_code: String,
    #[serde(deserialize_with = "null_default")]
    pub subnational1_code: String,
    #[serde(deserialize_with = "null_default")]
    pub subnational2_code: String,
    #[serde(deserialize_with = "null_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_default")]
    pub lng: f64,
    #[serde(deserialize_with = "null_default")]
    pub latest_obs_dt: String,
    #[serde(deserialize_with = "null_default")]
    pub num_species_all_time: u32,
}

/// One checklist in a recent or per-date checklist feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistFeedEntry {
    #[serde(deserialize_with = "null_default")]
    pub loc_id: String,
    #[serde(deserialize_with = "null_default")]
    pub sub_id: String,
    #[serde(deserialize_with = "null_default")]
    pub user_display_name: String,
    #[serde(deserialize_with = "null_default")]
    pub num_species: u32,
    #[serde(deserialize_with = "null_default")]
    pub obs_dt: String,
    #[serde(deserialize_with = "null_default")]
    pub obs_time: String,
    #[serde(deserialize_with = "null_default")]
    pub iso_obs_date: String,
    #[serde(rename = "subID")]
    #[serde(deserialize_with = "null_default")]
    pub sub_id_alt: String,
    #[serde(deserialize_with = "null_default")]
    pub loc: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopContributor {
    #[serde(deserialize_with = "null_default")]
    pub profile_handle: String,
    #[serde(deserialize_with = "null_default")]
    pub user_display_name: String,
    #[serde(deserialize_with = "null_default")]
    pub num_species: u32,
    #[serde(deserialize_with = "null_default")]
    pub num_complete_checklists: u32,
    #[serde(deserialize_with = "null_default")]
    pub row_num: u32,
    #[serde(deserialize_with = "null_default")]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegionalStatistics {
    #[serde(deserialize_with = "null_default")]
    pub num_checklists: u32,
    #[serde(deserialize_with = "null_default")]
    pub num_contributors: u32,
    #[serde(deserialize_with = "null_default")]
    pub num_species: u32,
}

/// Full checklist as returned by the checklist view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Checklist {
    #[serde(deserialize_with = "null_default")]
    pub proj_id: String,
    #[serde(deserialize_with = "null_default")]
    pub sub_id: String,
    #[serde(deserialize_with = "null_default")]
    pub protocol_id: String,
    #[serde(deserialize_with = "null_default")]
    pub loc_id: String,
    #[serde(deserialize_with = "null_default")]
    pub group_id: String,
    #[serde(deserialize_with = "null_default")]
    pub duration_hrs: f64,
    #[serde(deserialize_with = "null_default")]
    pub all_obs_reported: bool,
    #[serde(deserialize_with = "null_default")]
    pub creation_dt: String,
    #[serde(deserialize_with = "null_default")]
    pub last_edited_dt: String,
    #[serde(deserialize_with = "null_default")]
    pub obs_dt: String,
    #[serde(deserialize_with = "null_default")]
    pub obs_time_valid: bool,
    #[serde(deserialize_with = "null_default")]
    pub checklist_id: String,
    #[serde(deserialize_with = "null_default")]
    pub num_observers: u32,
    #[serde(deserialize_with = "null_default")]
    pub effort_distance_km: f64,
    #[serde(deserialize_with = "null_default")]
    pub effort_distance_entered_unit: String,
    #[serde(deserialize_with = "null_default")]
    pub subnational1_code: String,
    #[serde(deserialize_with = "null_default")]
    pub submission_method_code: String,
    #[serde(deserialize_with = "null_default")]
    pub submission_method_version: String,
    #[serde(deserialize_with = "null_default")]
    pub user_display_name: String,
    #[serde(deserialize_with = "null_default")]
    pub num_species: u32,
    #[serde(deserialize_with = "null_default")]
    pub submission_method_version_disp: String,
    #[serde(deserialize_with = "null_default")]
    pub sub_aux: Vec<SubAux>,
    /// Free-form auxiliary entries; their shape varies by submission method.
    #[serde(deserialize_with = "null_default")]
    pub sub_aux_ai: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_default")]
    pub obs: Vec<ChecklistObservation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubAux {
    #[serde(deserialize_with = "null_default")]
    pub sub_id: String,
    #[serde(deserialize_with = "null_default")]
    pub field_name: String,
    #[serde(deserialize_with = "null_default")]
    pub entry_method_code: String,
    #[serde(deserialize_with = "null_default")]
    pub aux_code: String,
}

/// A species entry on a checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistObservation {
    #[serde(deserialize_with = "null_default")]
    pub species_code: String,
    #[serde(deserialize_with = "null_default")]
    pub hide_flags: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub obs_dt: String,
    #[serde(deserialize_with = "null_default")]
    pub subnational1_code: String,
    #[serde(deserialize_with = "null_default")]
    pub how_many_atleast: u32,
    #[serde(deserialize_with = "null_default")]
    pub how_many_atmost: u32,
    #[serde(deserialize_with = "null_default")]
    pub sub_id: String,
    #[serde(deserialize_with = "null_default")]
    pub proj_id: String,
    #[serde(deserialize_with = "null_default")]
    pub obs_id: String,
    /// Count as entered, `"X"` for present-only.
    #[serde(deserialize_with = "null_default")]
    pub how_many_str: String,
    #[serde(deserialize_with = "null_default")]
    pub present: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjacentRegion {
    #[serde(deserialize_with = "null_default")]
    pub code: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubRegion {
    #[serde(deserialize_with = "null_default")]
    pub code: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bounds {
    #[serde(deserialize_with = "null_default")]
    pub min_x: f64,
    #[serde(deserialize_with = "null_default")]
    pub max_x: f64,
    #[serde(deserialize_with = "null_default")]
    pub min_y: f64,
    #[serde(deserialize_with = "null_default")]
    pub max_y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionInfo {
    #[serde(deserialize_with = "null_default")]
    pub bounds: Bounds,
    /// Region name, formatted per the `regionNameFormat` option.
    #[serde(deserialize_with = "null_default")]
    pub result: String,
    #[serde(deserialize_with = "null_default")]
    pub code: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub region_type: String,
    #[serde(deserialize_with = "null_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_default")]
    pub latitude: f64,
}

/// An entry of the eBird taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Taxon {
    #[serde(deserialize_with = "null_default")]
    pub sci_name: String,
    #[serde(deserialize_with = "null_default")]
    pub com_name: String,
    #[serde(deserialize_with = "null_default")]
    pub species_code: String,
    #[serde(deserialize_with = "null_default")]
    pub category: String,
    #[serde(deserialize_with = "null_default")]
    pub taxon_order: f64,
    #[serde(deserialize_with = "null_default")]
    pub banding_codes: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub com_name_codes: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub sci_name_codes: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub order: String,
    #[serde(deserialize_with = "null_default")]
    pub family_code: String,
    #[serde(deserialize_with = "null_default")]
    pub family_com_name: String,
    #[serde(deserialize_with = "null_default")]
    pub family_sci_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxonomicGroup {
    #[serde(deserialize_with = "null_default")]
    pub group_name: String,
    #[serde(deserialize_with = "null_default")]
    pub group_order: u32,
    /// Inclusive `[first, last]` taxon-order ranges belonging to the group.
    #[serde(deserialize_with = "null_default")]
    pub taxon_order_bounds: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxonomyVersion {
    #[serde(deserialize_with = "null_default")]
    pub authority_ver: f64,
    #[serde(deserialize_with = "null_default")]
    pub latest: bool,
}

/// A locale in which common names are available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxaLocale {
    #[serde(deserialize_with = "null_default")]
    pub code: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub last_update: String,
}
