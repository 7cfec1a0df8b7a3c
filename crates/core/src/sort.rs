//! Sorting of enriched patient views.

use crate::patient::PatientView;
use crate::PatientError;
use std::str::FromStr;

/// Field a patient list can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Weight,
    Height,
    Bmi,
}

impl SortField {
    pub const ALLOWED: [&'static str; 3] = ["weight", "height", "bmi"];

    fn key(&self, view: &PatientView) -> f64 {
        match self {
            SortField::Weight => view.weight,
            SortField::Height => view.height,
            SortField::Bmi => view.bmi,
        }
    }
}

impl FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(SortField::Weight),
            "height" => Ok(SortField::Height),
            "bmi" => Ok(SortField::Bmi),
            _ => Err(PatientError::InvalidArgument(format!(
                "invalid sort field '{s}', select from {}",
                SortField::ALLOWED.join(", ")
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(PatientError::InvalidArgument(format!(
                "invalid order '{s}', select between asc and desc"
            ))),
        }
    }
}

impl SortOrder {
    /// Parses an optional order, defaulting to ascending.
    pub fn parse_or_default(value: Option<&str>) -> Result<Self, PatientError> {
        value
            .map(str::parse::<SortOrder>)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Sorts views in place by `field`.
///
/// The sort is stable in both directions: views with equal keys keep their incoming order.
pub fn sort_views(views: &mut [PatientView], field: SortField, order: SortOrder) {
    views.sort_by(|a, b| {
        let ordering = field.key(a).total_cmp(&field.key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
