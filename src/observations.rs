//! `data/obs` endpoints: recent, notable, nearby and historic observations.

use chrono::NaiveDate;

use crate::client::Client;
use crate::endpoint::Operation;
use crate::error::Result;
use crate::options::RequestOption;
use crate::types::Observation;
use crate::util::date_segments;

impl Client {
    /// Recent observations within a country, subnational or hotspot region.
    ///
    /// Useful options: `back`, `cat`, `hotspot`, `include_provisional`,
    /// `max_results`, `regions`, `spp_locale`.
    pub fn recent_observations_in_region(
        &self,
        region_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<Observation>> {
        self.get(
            Operation::RecentObservationsInRegion,
            &[region_code],
            options,
        )
    }

    /// Recent observations of rare species within a region.
    pub fn recent_notable_observations_in_region(
        &self,
        region_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<Observation>> {
        self.get(
            Operation::RecentNotableObservationsInRegion,
            &[region_code],
            options,
        )
    }

    pub fn recent_observations_of_species_in_region(
        &self,
        region_code: &str,
        species_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<Observation>> {
        self.get(
            Operation::RecentObservationsOfSpeciesInRegion,
            &[region_code, species_code],
            options,
        )
    }

    /// Recent observations around a point.
    ///
    /// Both [`RequestOption::lat`] and [`RequestOption::lng`] must be given,
    /// otherwise the call fails with
    /// [`Error::MissingCoordinates`](crate::Error::MissingCoordinates)
    /// without contacting the server.
    pub fn recent_nearby_observations(
        &self,
        options: &[RequestOption],
    ) -> Result<Vec<Observation>> {
        self.get(Operation::RecentNearbyObservations, &[], options)
    }

    pub fn recent_nearby_observations_of_species(
        &self,
        species_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<Observation>> {
        self.get(
            Operation::RecentNearbyObservationsOfSpecies,
            &[species_code],
            options,
        )
    }

    pub fn recent_nearby_notable_observations(
        &self,
        options: &[RequestOption],
    ) -> Result<Vec<Observation>> {
        self.get(Operation::RecentNearbyNotableObservations, &[], options)
    }

    /// Most recent observations of a species nearest to a point.
    pub fn nearest_observations_of_species(
        &self,
        species_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<Observation>> {
        self.get(
            Operation::NearestObservationsOfSpecies,
            &[species_code],
            options,
        )
    }

    /// Observations reported on a given date in a region.
    pub fn historic_observations_on_date(
        &self,
        region_code: &str,
        date: NaiveDate,
        options: &[RequestOption],
    ) -> Result<Vec<Observation>> {
        let [y, m, d] = date_segments(date);
        self.get(
            Operation::HistoricObservationsOnDate,
            &[region_code, y.as_str(), m.as_str(), d.as_str()],
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn historic_path_uses_date_parts() {
        let client = Client::new("k").unwrap();
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        let [y, m, d] = date_segments(date);
        let url = client
            .request_url(
                Operation::HistoricObservationsOnDate,
                &["US-NY", y.as_str(), m.as_str(), d.as_str()],
                &[],
            )
            .unwrap();
        assert_eq!(url.path(), "/v2/data/obs/US-NY/historic/2023/12/25");
    }
}
