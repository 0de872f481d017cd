//! Static table of eBird API operations.
//!
//! Every operation maps to a path template relative to the API root. `{}`
//! placeholders are filled in order from the caller's path parameters, whose
//! names are listed by [`Operation::path_params`].

use std::fmt;

use crate::error::{Error, Result};

/// One logical eBird API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Operation {
    // data/obs
    RecentObservationsInRegion,
    RecentNotableObservationsInRegion,
    RecentObservationsOfSpeciesInRegion,
    RecentNearbyObservations,
    RecentNearbyObservationsOfSpecies,
    RecentNearbyNotableObservations,
    NearestObservationsOfSpecies,
    HistoricObservationsOnDate,

    // product
    RecentChecklistsFeed,
    Top100,
    ChecklistFeedOnDate,
    RegionalStatisticsOnDate,
    SpeciesListForRegion,
    ViewChecklist,

    // ref/geo, ref/region
    AdjacentRegions,
    RegionInfo,
    SubRegionList,

    // ref/hotspot
    HotspotsInRegion,
    NearbyHotspots,
    HotspotInfo,

    // ref/taxonomy
    EbirdTaxonomy,
    TaxonomicForms,
    TaxaLocaleCodes,
    TaxonomyVersions,
    TaxonomicGroups,
}

impl Operation {
    pub const ALL: [Operation; 25] = [
        Operation::RecentObservationsInRegion,
        Operation::RecentNotableObservationsInRegion,
        Operation::RecentObservationsOfSpeciesInRegion,
        Operation::RecentNearbyObservations,
        Operation::RecentNearbyObservationsOfSpecies,
        Operation::RecentNearbyNotableObservations,
        Operation::NearestObservationsOfSpecies,
        Operation::HistoricObservationsOnDate,
        Operation::RecentChecklistsFeed,
        Operation::Top100,
        Operation::ChecklistFeedOnDate,
        Operation::RegionalStatisticsOnDate,
        Operation::SpeciesListForRegion,
        Operation::ViewChecklist,
        Operation::AdjacentRegions,
        Operation::RegionInfo,
        Operation::SubRegionList,
        Operation::HotspotsInRegion,
        Operation::NearbyHotspots,
        Operation::HotspotInfo,
        Operation::EbirdTaxonomy,
        Operation::TaxonomicForms,
        Operation::TaxaLocaleCodes,
        Operation::TaxonomyVersions,
        Operation::TaxonomicGroups,
    ];

    /// Path template relative to the API root.
    pub const fn template(self) -> &'static str {
        match self {
            Operation::RecentObservationsInRegion => "data/obs/{}/recent",
            Operation::RecentNotableObservationsInRegion => "data/obs/{}/recent/notable",
            Operation::RecentObservationsOfSpeciesInRegion => "data/obs/{}/recent/{}",
            Operation::RecentNearbyObservations => "data/obs/geo/recent",
            Operation::RecentNearbyObservationsOfSpecies => "data/obs/geo/recent/{}",
            Operation::RecentNearbyNotableObservations => "data/obs/geo/recent/notable",
            Operation::NearestObservationsOfSpecies => "data/nearest/geo/recent/{}",
            Operation::HistoricObservationsOnDate => "data/obs/{}/historic/{}/{}/{}",
            Operation::RecentChecklistsFeed => "product/lists/{}",
            Operation::Top100 => "product/top100/{}/{}/{}/{}",
            Operation::ChecklistFeedOnDate => "product/lists/{}/{}/{}/{}",
            Operation::RegionalStatisticsOnDate => "product/stats/{}/{}/{}/{}",
            Operation::SpeciesListForRegion => "product/spplist/{}",
            Operation::ViewChecklist => "product/checklist/view/{}",
            Operation::AdjacentRegions => "ref/adjacent/{}",
            Operation::RegionInfo => "ref/region/info/{}",
            Operation::SubRegionList => "ref/region/list/{}/{}",
            Operation::HotspotsInRegion => "ref/hotspot/{}",
            Operation::NearbyHotspots => "ref/hotspot/geo",
            Operation::HotspotInfo => "ref/hotspot/info/{}",
            Operation::EbirdTaxonomy => "ref/taxonomy/ebird",
            Operation::TaxonomicForms => "ref/taxon/forms/{}",
            Operation::TaxaLocaleCodes => "ref/taxa-locales/ebird",
            Operation::TaxonomyVersions => "ref/taxonomy/versions",
            Operation::TaxonomicGroups => "ref/sppgroup/{}",
        }
    }

    /// Names of the positional path parameters, in template order.
    pub const fn path_params(self) -> &'static [&'static str] {
        match self {
            Operation::RecentObservationsInRegion
            | Operation::RecentNotableObservationsInRegion
            | Operation::RecentChecklistsFeed
            | Operation::SpeciesListForRegion
            | Operation::AdjacentRegions
            | Operation::RegionInfo
            | Operation::HotspotsInRegion => &["regionCode"],
            Operation::RecentObservationsOfSpeciesInRegion => &["regionCode", "speciesCode"],
            Operation::RecentNearbyObservationsOfSpecies
            | Operation::NearestObservationsOfSpecies
            | Operation::TaxonomicForms => &["speciesCode"],
            Operation::HistoricObservationsOnDate
            | Operation::Top100
            | Operation::ChecklistFeedOnDate
            | Operation::RegionalStatisticsOnDate => &["regionCode", "y", "m", "d"],
            Operation::ViewChecklist => &["subId"],
            Operation::SubRegionList => &["regionType", "parentRegionCode"],
            Operation::HotspotInfo => &["locId"],
            Operation::TaxonomicGroups => &["speciesGrouping"],
            Operation::RecentNearbyObservations
            | Operation::RecentNearbyNotableObservations
            | Operation::NearbyHotspots
            | Operation::EbirdTaxonomy
            | Operation::TaxaLocaleCodes
            | Operation::TaxonomyVersions => &[],
        }
    }

    /// Whether the call is rejected locally unless both `lat` and `lng` are set.
    pub const fn requires_coordinates(self) -> bool {
        matches!(
            self,
            Operation::NearbyHotspots | Operation::RecentNearbyObservations
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operation::RecentObservationsInRegion => "recent observations in region",
            Operation::RecentNotableObservationsInRegion => {
                "recent notable observations in region"
            }
            Operation::RecentObservationsOfSpeciesInRegion => {
                "recent observations of species in region"
            }
            Operation::RecentNearbyObservations => "recent nearby observations",
            Operation::RecentNearbyObservationsOfSpecies => {
                "recent nearby observations of species"
            }
            Operation::RecentNearbyNotableObservations => "recent nearby notable observations",
            Operation::NearestObservationsOfSpecies => "nearest observations of species",
            Operation::HistoricObservationsOnDate => "historic observations on date",
            Operation::RecentChecklistsFeed => "recent checklists feed",
            Operation::Top100 => "top 100",
            Operation::ChecklistFeedOnDate => "checklist feed on date",
            Operation::RegionalStatisticsOnDate => "regional statistics on date",
            Operation::SpeciesListForRegion => "species list for region",
            Operation::ViewChecklist => "view checklist",
            Operation::AdjacentRegions => "adjacent regions",
            Operation::RegionInfo => "region info",
            Operation::SubRegionList => "sub region list",
            Operation::HotspotsInRegion => "hotspots in region",
            Operation::NearbyHotspots => "nearby hotspots",
            Operation::HotspotInfo => "hotspot info",
            Operation::EbirdTaxonomy => "eBird taxonomy",
            Operation::TaxonomicForms => "taxonomic forms",
            Operation::TaxaLocaleCodes => "taxa locale codes",
            Operation::TaxonomyVersions => "taxonomy versions",
            Operation::TaxonomicGroups => "taxonomic groups",
        }
    }

    /// Fills the template with percent-encoded path segments.
    ///
    /// Blank or absent segments are rejected with [`Error::MissingParameter`]
    /// naming the parameter; surplus segments with
    /// [`Error::UnexpectedParameters`].
    pub fn resolve(self, segments: &[&str]) -> Result<String> {
        let params = self.path_params();
        if segments.len() > params.len() {
            return Err(Error::UnexpectedParameters {
                operation: self,
                expected: params.len(),
                got: segments.len(),
            });
        }

        let mut path = String::with_capacity(self.template().len() + 16);
        let mut pieces = self.template().split("{}");
        if let Some(head) = pieces.next() {
            path.push_str(head);
        }
        for (i, piece) in pieces.enumerate() {
            let value = segments.get(i).map(|s| s.trim()).unwrap_or_default();
            if value.is_empty() {
                return Err(Error::MissingParameter {
                    operation: self,
                    parameter: params[i],
                });
            }
            path.push_str(&urlencoding::encode(value));
            path.push_str(piece);
        }
        Ok(path)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_matches_template_placeholders() {
        for op in Operation::ALL {
            assert_eq!(
                op.template().matches("{}").count(),
                op.path_params().len(),
                "{op:?}"
            );
        }
    }

    #[test]
    fn resolve_substitutes_in_order() {
        assert_eq!(
            Operation::RecentObservationsOfSpeciesInRegion
                .resolve(&["US-NY", "norcar"])
                .unwrap(),
            "data/obs/US-NY/recent/norcar"
        );
        assert_eq!(
            Operation::Top100.resolve(&["US", "2024", "3", "1"]).unwrap(),
            "product/top100/US/2024/3/1"
        );
        assert_eq!(
            Operation::TaxonomyVersions.resolve(&[]).unwrap(),
            "ref/taxonomy/versions"
        );
    }

    #[test]
    fn resolve_encodes_segments() {
        assert_eq!(
            Operation::RegionInfo.resolve(&["a b/c"]).unwrap(),
            "ref/region/info/a%20b%2Fc"
        );
    }

    #[test]
    fn resolve_rejects_blank_segment_by_name() {
        let err = Operation::RecentObservationsOfSpeciesInRegion
            .resolve(&["US", "  "])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameter {
                operation: Operation::RecentObservationsOfSpeciesInRegion,
                parameter: "speciesCode",
            }
        ));

        let err = Operation::ViewChecklist.resolve(&[""]).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameter {
                parameter: "subId",
                ..
            }
        ));
    }

    #[test]
    fn resolve_rejects_surplus_segments() {
        let err = Operation::AdjacentRegions
            .resolve(&["US", "extra"])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedParameters {
                operation: Operation::AdjacentRegions,
                expected: 1,
                got: 2,
            }
        ));

        let err = Operation::EbirdTaxonomy.resolve(&["x"]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedParameters {
                expected: 0,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn only_two_operations_need_coordinates() {
        let needing: Vec<_> = Operation::ALL
            .into_iter()
            .filter(|op| op.requires_coordinates())
            .collect();
        assert_eq!(
            needing,
            vec![Operation::RecentNearbyObservations, Operation::NearbyHotspots]
        );
    }
}
