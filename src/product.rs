//! `product` endpoints: the data behind eBird's region and checklist pages.

use chrono::NaiveDate;

use crate::client::Client;
use crate::endpoint::Operation;
use crate::error::Result;
use crate::options::RequestOption;
use crate::types::{Checklist, ChecklistFeedEntry, RegionalStatistics, TopContributor};
use crate::util::date_segments;

impl Client {
    /// Most recently submitted checklists for a region or hotspot.
    pub fn recent_checklists_feed(
        &self,
        region_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<ChecklistFeedEntry>> {
        self.get(Operation::RecentChecklistsFeed, &[region_code], options)
    }

    /// Checklists submitted on a given date. Accepts `max_results` and `sort_key`.
    pub fn checklist_feed_on_date(
        &self,
        region_code: &str,
        date: NaiveDate,
        options: &[RequestOption],
    ) -> Result<Vec<ChecklistFeedEntry>> {
        self.on_date(Operation::ChecklistFeedOnDate, region_code, date, options)
    }

    /// Top contributors for a date, ranked per the `ranked_by` option.
    pub fn top100(
        &self,
        region_code: &str,
        date: NaiveDate,
        options: &[RequestOption],
    ) -> Result<Vec<TopContributor>> {
        self.on_date(Operation::Top100, region_code, date, options)
    }

    pub fn regional_statistics_on_date(
        &self,
        region_code: &str,
        date: NaiveDate,
        options: &[RequestOption],
    ) -> Result<RegionalStatistics> {
        self.on_date(
            Operation::RegionalStatisticsOnDate,
            region_code,
            date,
            options,
        )
    }

    /// Species codes of every species ever reported in a region.
    pub fn species_list_for_region(
        &self,
        region_code: &str,
        options: &[RequestOption],
    ) -> Result<Vec<String>> {
        self.get(Operation::SpeciesListForRegion, &[region_code], options)
    }

    /// A single checklist by submission ID, e.g. `S144646447`.
    pub fn view_checklist(&self, sub_id: &str, options: &[RequestOption]) -> Result<Checklist> {
        self.get(Operation::ViewChecklist, &[sub_id], options)
    }

    fn on_date<T>(
        &self,
        operation: Operation,
        region_code: &str,
        date: NaiveDate,
        options: &[RequestOption],
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let [y, m, d] = date_segments(date);
        self.get(
            operation,
            &[region_code, y.as_str(), m.as_str(), d.as_str()],
            options,
        )
    }
}
