//! `ref/*` endpoints: regions, hotspots and the eBird taxonomy.

use crate::client::Client;
use crate::endpoint::Operation;
use crate::error::Result;
use crate::options::RequestOption;
use crate::types::{
    AdjacentRegion, Hotspot, HotspotInfo, RegionInfo, SubRegion, TaxaLocale, Taxon,
    TaxonomicGroup, TaxonomyVersion,
};

// Regions
impl Client {
    /// Name and bounds of a region. Accepts `region_name_format` and `delim`.
    pub fn region_info(&self, region_code: &str, options: &[RequestOption]) -> Result<RegionInfo> {
        self.get(Operation::RegionInfo, &[region_code], options)
    }

    /// Sub-regions of `parent_region_code`.
    ///
    /// `region_type` is one of `country`, `subnational1` or `subnational2`;
    /// the parent may be `world` when listing countries.
    pub fn sub_region_list(
        &self,
        region_type: &str,
        parent_region_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<SubRegion>> {
        self.get(
            Operation::SubRegionList,
            &[region_type, parent_region_code],
            options,
        )
    }

    /// Regions sharing a border with `region_code`.
    pub fn adjacent_regions(
        &self,
        region_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<AdjacentRegion>> {
        self.get(Operation::AdjacentRegions, &[region_code], options)
    }
}

// Hotspots
impl Client {
    /// Hotspots in a region. Accepts `back`.
    pub fn hotspots_in_region(
        &self,
        region_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<Hotspot>> {
        self.get(Operation::HotspotsInRegion, &[region_code], options)
    }

    /// Hotspots around a point.
    ///
    /// Both `lat` and `lng` options are required; `dist` and `back` narrow
    /// the search.
    pub fn nearby_hotspots(&self, options: &[RequestOption]) -> Result<Vec<Hotspot>> {
        self.get(Operation::NearbyHotspots, &[], options)
    }

    pub fn hotspot_info(&self, loc_id: &str, options: &[RequestOption]) -> Result<HotspotInfo> {
        self.get(Operation::HotspotInfo, &[loc_id], options)
    }
}

// Taxonomy
impl Client {
    /// The eBird taxonomy, optionally limited with `species`, `cat`,
    /// `locale` and `version`.
    pub fn ebird_taxonomy(&self, options: &[RequestOption]) -> Result<Vec<Taxon>> {
        self.get(Operation::EbirdTaxonomy, &[], options)
    }

    /// Subspecies and forms recognised for a species.
    pub fn taxonomic_forms(
        &self,
        species_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<String>> {
        self.get(Operation::TaxonomicForms, &[species_code], options)
    }

    pub fn taxa_locale_codes(&self, options: &[RequestOption]) -> Result<Vec<TaxaLocale>> {
        self.get(Operation::TaxaLocaleCodes, &[], options)
    }

    pub fn taxonomy_versions(&self, options: &[RequestOption]) -> Result<Vec<TaxonomyVersion>> {
        self.get(Operation::TaxonomyVersions, &[], options)
    }

    /// Species groups in `merlin` or `ebird` order. Accepts `group_name_locale`.
    pub fn taxonomic_groups(
        &self,
        species_grouping: &str,
        options: &[RequestOption],
    ) -> Result<Vec<TaxonomicGroup>> {
        self.get(Operation::TaxonomicGroups, &[species_grouping], options)
    }
}
