//! Validated query parameters.
//!
//! Options are checked when they are built: a constructor either returns a
//! [`RequestOption`] carrying a value the API accepts, or an [`OptionError`].
//! Options whose type already restricts them (booleans, enums) are
//! infallible.
//!
//! ```
//! use ebird_api::{RequestOption, SortKey};
//!
//! # fn main() -> Result<(), ebird_api::OptionError> {
//! let options = [
//!     RequestOption::back(7)?,
//!     RequestOption::max_results(20)?,
//!     RequestOption::sort_key(SortKey::CreationDt),
//! ];
//! # let _ = options;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::OptionError;

/// A single validated request option.
///
/// Most options become query parameters. [`RequestOption::timeout`] is the
/// exception: it bounds the call it is passed to and is never sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOption {
    name: &'static str,
    value: String,
    target: Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Query,
    Timeout(Duration),
}

impl RequestOption {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            target: Target::Query,
        }
    }

    /// Deadline for this call only, replacing the client's timeout.
    ///
    /// When it expires the blocked call returns
    /// [`Error::Transport`](crate::Error::Transport) with
    /// [`is_timeout`](crate::Error::is_timeout) set.
    pub fn timeout(timeout: Duration) -> Result<Self, OptionError> {
        if timeout.is_zero() {
            return Err(OptionError::new("timeout", "must be greater than zero"));
        }
        Ok(Self {
            name: "timeout",
            value: format!("{}ms", timeout.as_millis()),
            target: Target::Timeout(timeout),
        })
    }

    /// `false` for options that only affect how the call is made.
    pub fn is_query(&self) -> bool {
        self.target == Target::Query
    }

    /// Query parameter name as sent to the API.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Days back to look for observations, 1 to 30.
    pub fn back(days: u32) -> Result<Self, OptionError> {
        check_range("back", days, 1, 30)?;
        Ok(Self::new("back", days.to_string()))
    }

    /// Search radius in kilometers, 0 to 500.
    pub fn dist(km: u32) -> Result<Self, OptionError> {
        check_range("dist", km, 0, 500)?;
        Ok(Self::new("dist", km.to_string()))
    }

    /// Result cap, 1 to 100.
    pub fn max_results(max: u32) -> Result<Self, OptionError> {
        check_range("maxResults", max, 1, 100)?;
        Ok(Self::new("maxResults", max.to_string()))
    }

    pub fn lat(latitude: f64) -> Result<Self, OptionError> {
        check_coordinate("lat", latitude, 90.0)?;
        Ok(Self::new("lat", format!("{latitude:.2}")))
    }

    pub fn lng(longitude: f64) -> Result<Self, OptionError> {
        check_coordinate("lng", longitude, 180.0)?;
        Ok(Self::new("lng", format!("{longitude:.2}")))
    }

    /// Only return observations from hotspots.
    pub fn hotspot(only_hotspots: bool) -> Self {
        Self::new("hotspot", only_hotspots.to_string())
    }

    /// Include observations that have not yet been reviewed.
    pub fn include_provisional(include: bool) -> Self {
        Self::new("includeProvisional", include.to_string())
    }

    /// Taxonomic categories to include.
    pub fn cat(categories: &[Category]) -> Result<Self, OptionError> {
        if categories.is_empty() {
            return Err(OptionError::new("cat", "at least one category is required"));
        }
        Ok(Self::new("cat", join(categories.iter().map(|c| c.as_str()))))
    }

    pub fn sort_key(key: SortKey) -> Self {
        Self::new("sortKey", key.as_str())
    }

    pub fn ranked_by(rank: RankedBy) -> Self {
        Self::new("rankedBy", rank.as_str())
    }

    pub fn region_name_format(format: RegionNameFormat) -> Self {
        Self::new("regionNameFormat", format.as_str())
    }

    /// Restrict taxonomy results to these species codes.
    pub fn species(codes: &[&str]) -> Result<Self, OptionError> {
        let codes = non_blank_list("species", codes)?;
        Ok(Self::new("species", codes))
    }

    /// Up to ten region codes to search (query parameter `r`).
    pub fn regions(codes: &[&str]) -> Result<Self, OptionError> {
        if codes.len() > 10 {
            return Err(OptionError::new(
                "r",
                format!("at most 10 regions are allowed, got {}", codes.len()),
            ));
        }
        let codes = non_blank_list("r", codes)?;
        Ok(Self::new("r", codes))
    }

    /// Locale for common names in taxonomy results.
    pub fn locale(locale: &str) -> Result<Self, OptionError> {
        non_blank("locale", locale).map(|v| Self::new("locale", v))
    }

    /// Locale for common names in observation results.
    pub fn spp_locale(locale: &str) -> Result<Self, OptionError> {
        non_blank("sppLocale", locale).map(|v| Self::new("sppLocale", v))
    }

    pub fn group_name_locale(locale: &str) -> Result<Self, OptionError> {
        non_blank("groupNameLocale", locale).map(|v| Self::new("groupNameLocale", v))
    }

    /// Taxonomy version to query, e.g. `"2023"`.
    pub fn version(version: &str) -> Result<Self, OptionError> {
        non_blank("version", version).map(|v| Self::new("version", v))
    }

    /// Delimiter between region name parts.
    pub fn delim(delimiter: &str) -> Result<Self, OptionError> {
        if delimiter.is_empty() {
            return Err(OptionError::new("delim", "must not be empty"));
        }
        Ok(Self::new("delim", delimiter))
    }
}

fn check_range(option: &'static str, value: u32, min: u32, max: u32) -> Result<(), OptionError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(OptionError::new(
            option,
            format!("{value} is outside {min}..={max}"),
        ))
    }
}

fn check_coordinate(option: &'static str, value: f64, bound: f64) -> Result<(), OptionError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Ok(())
    } else {
        Err(OptionError::new(
            option,
            format!("{value} is outside -{bound}..={bound}"),
        ))
    }
}

fn non_blank(option: &'static str, value: &str) -> Result<String, OptionError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(OptionError::new(option, "must not be empty"));
    }
    Ok(value.to_string())
}

fn non_blank_list(option: &'static str, values: &[&str]) -> Result<String, OptionError> {
    if values.is_empty() {
        return Err(OptionError::new(option, "at least one code is required"));
    }
    let values = values
        .iter()
        .map(|v| non_blank(option, v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(values.join(","))
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(",")
}

/// Query parameters for one request, folded from a sequence of options.
///
/// Later options replace earlier ones with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<&'static str, String>,
    timeout: Option<Duration>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options<'a>(options: impl IntoIterator<Item = &'a RequestOption>) -> Self {
        let mut params = Self::new();
        for option in options {
            params.apply(option);
        }
        params
    }

    pub fn apply(&mut self, option: &RequestOption) {
        match option.target {
            Target::Query => {
                self.params.insert(option.name, option.value.clone());
            }
            Target::Timeout(timeout) => self.timeout = Some(timeout),
        }
    }

    /// Call-scoped deadline, if a [`RequestOption::timeout`] was applied.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident for $option:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = OptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(OptionError::new(
                        $option,
                        format!(
                            "unknown value `{}` (expected one of: {})",
                            other,
                            [$($text),+].join(", ")
                        ),
                    )),
                }
            }
        }
    };
}

string_enum! {
    /// eBird taxonomic category.
    pub enum Category for "cat" {
        Species => "species",
        Slash => "slash",
        Issf => "issf",
        Spuh => "spuh",
        Hybrid => "hybrid",
        Intergrade => "intergrade",
        Form => "form",
        Domestic => "domestic",
    }
}

string_enum! {
    /// Ordering of observation results.
    pub enum SortKey for "sortKey" {
        /// Observation date.
        ObsDt => "obs_dt",
        /// Submission date.
        CreationDt => "creation_dt",
    }
}

string_enum! {
    /// Ranking of the top 100 contributors.
    pub enum RankedBy for "rankedBy" {
        /// Number of species seen.
        Species => "spp",
        /// Number of complete checklists.
        Checklists => "cl",
    }
}

string_enum! {
    pub enum RegionNameFormat for "regionNameFormat" {
        Detailed => "detailed",
        DetailedNoQual => "detailednoqual",
        Full => "full",
        NameQual => "namequal",
        NameOnly => "nameonly",
        RevDetailed => "revdetailed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_options_enforce_ranges() {
        assert_eq!(RequestOption::back(1).unwrap().value(), "1");
        assert_eq!(RequestOption::back(30).unwrap().value(), "30");
        assert!(RequestOption::back(0).is_err());
        assert!(RequestOption::back(31).is_err());

        assert_eq!(RequestOption::dist(0).unwrap().value(), "0");
        assert!(RequestOption::dist(501).is_err());

        assert_eq!(RequestOption::max_results(100).unwrap().name(), "maxResults");
        assert!(RequestOption::max_results(0).is_err());
        assert!(RequestOption::max_results(101).is_err());
    }

    #[test]
    fn coordinates_are_bounded_and_formatted() {
        assert_eq!(RequestOption::lat(42.4567).unwrap().value(), "42.46");
        assert_eq!(RequestOption::lng(-76.5).unwrap().value(), "-76.50");
        assert!(RequestOption::lat(90.01).is_err());
        assert!(RequestOption::lat(-91.0).is_err());
        assert!(RequestOption::lng(180.5).is_err());
        assert!(RequestOption::lat(f64::NAN).is_err());
        assert!(RequestOption::lng(f64::INFINITY).is_err());
    }

    #[test]
    fn rejection_names_the_parameter() {
        let err = RequestOption::max_results(500).unwrap_err();
        assert_eq!(err.option, "maxResults");
        assert_eq!(
            err.to_string(),
            "invalid value for option `maxResults`: 500 is outside 1..=100"
        );
    }

    #[test]
    fn lists_are_joined_and_validated() {
        assert_eq!(
            RequestOption::species(&["bkfbun1", "coatit2"]).unwrap().value(),
            "bkfbun1,coatit2"
        );
        assert!(RequestOption::species(&[]).is_err());
        assert!(RequestOption::species(&["ok", " "]).is_err());

        let eleven = ["US"; 11];
        assert!(RequestOption::regions(&eleven).is_err());
        assert_eq!(
            RequestOption::regions(&["US-NY", "US-NJ"]).unwrap().name(),
            "r"
        );

        assert_eq!(
            RequestOption::cat(&[Category::Species, Category::Issf])
                .unwrap()
                .value(),
            "species,issf"
        );
        assert!(RequestOption::cat(&[]).is_err());
    }

    #[test]
    fn enum_values_parse_and_print() {
        assert_eq!("obs_dt".parse::<SortKey>().unwrap(), SortKey::ObsDt);
        assert_eq!(RankedBy::Checklists.to_string(), "cl");
        assert_eq!(
            RequestOption::region_name_format(RegionNameFormat::NameOnly).value(),
            "nameonly"
        );

        let err = "csv".parse::<RegionNameFormat>().unwrap_err();
        assert_eq!(err.option, "regionNameFormat");
        assert!(err.reason.contains("revdetailed"));
    }

    #[test]
    fn string_options_reject_blank_values() {
        assert!(RequestOption::locale("").is_err());
        assert!(RequestOption::spp_locale("  ").is_err());
        assert_eq!(RequestOption::version(" 2023 ").unwrap().value(), "2023");
        assert_eq!(RequestOption::delim(" ").unwrap().value(), " ");
        assert!(RequestOption::delim("").is_err());
    }

    #[test]
    fn later_options_overwrite_earlier_ones() {
        let options = [
            RequestOption::back(5).unwrap(),
            RequestOption::hotspot(true),
            RequestOption::back(12).unwrap(),
        ];
        let params = QueryParams::from_options(&options);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("back"), Some("12"));
        assert_eq!(params.get("hotspot"), Some("true"));
    }

    #[test]
    fn params_iterate_in_name_order() {
        let options = [
            RequestOption::max_results(3).unwrap(),
            RequestOption::back(2).unwrap(),
            RequestOption::include_provisional(false),
        ];
        let names: Vec<_> = QueryParams::from_options(&options)
            .iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(names, vec!["back", "includeProvisional", "maxResults"]);
    }

    #[test]
    fn timeout_is_call_scoped_not_a_query_parameter() {
        assert!(RequestOption::timeout(Duration::ZERO).is_err());

        let options = [
            RequestOption::timeout(Duration::from_secs(5)).unwrap(),
            RequestOption::back(2).unwrap(),
            RequestOption::timeout(Duration::from_millis(250)).unwrap(),
        ];
        assert!(!options[0].is_query());
        assert!(options[1].is_query());

        let params = QueryParams::from_options(&options);
        assert_eq!(params.len(), 1);
        assert!(!params.contains("timeout"));
        assert_eq!(params.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn unset_options_are_absent() {
        let params = QueryParams::from_options(&[] as &[RequestOption]);
        assert!(params.is_empty());
        assert!(!params.contains("lat"));
    }
}
