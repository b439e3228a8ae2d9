//! Plan inputs: the texts a document is rendered from, and the form fields a
//! plan is generated from.

use crate::error::TripDocError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw material of one document.
///
/// All bodies are newline-delimited free text as returned by the model. The
/// itinerary is always rendered; hotel and restaurant bodies are optional and
/// their sections are omitted entirely when absent or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelPlan {
    /// Display name printed under the document title.
    pub destination: String,
    /// Day-by-day itinerary text.
    pub itinerary: String,
    /// Hotel records, six lines each.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotels: Option<String>,
    /// Restaurant records, four lines each.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurants: Option<String>,
}

impl TravelPlan {
    pub fn new(destination: impl Into<String>, itinerary: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            itinerary: itinerary.into(),
            hotels: None,
            restaurants: None,
        }
    }

    pub fn with_hotels(mut self, hotels: impl Into<String>) -> Self {
        self.hotels = Some(hotels.into());
        self
    }

    pub fn with_restaurants(mut self, restaurants: impl Into<String>) -> Self {
        self.restaurants = Some(restaurants.into());
        self
    }

    /// Return the body text for a section, or `None` when it is absent or blank.
    pub fn section(&self, section: PlanSection) -> Option<&str> {
        let body = match section {
            PlanSection::Itinerary => Some(self.itinerary.as_str()),
            PlanSection::Hotels => self.hotels.as_deref(),
            PlanSection::Restaurants => self.restaurants.as_deref(),
        };
        body.filter(|b| !b.trim().is_empty())
    }
}

/// One independently generated part of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSection {
    Itinerary,
    Hotels,
    Restaurants,
}

impl fmt::Display for PlanSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlanSection::Itinerary => "itinerary",
            PlanSection::Hotels => "hotel recommendations",
            PlanSection::Restaurants => "restaurant recommendations",
        })
    }
}

/// The trip parameters collected from the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// e.g. "San Francisco"
    pub destination: String,
    /// Number of days, 1–30.
    pub days: u32,
    /// e.g. "Museums, Food, Nature"
    pub interests: String,
    /// e.g. "Kids friendly, less walking"
    pub preferences: String,
    /// Hotel class to recommend (1–5). `None` skips hotel recommendations.
    #[serde(default)]
    pub hotel_stars: Option<u8>,
    /// Preferred cuisines. `None` skips restaurant recommendations.
    #[serde(default)]
    pub cuisines: Option<String>,
}

impl PlanRequest {
    pub const MAX_DAYS: u32 = 30;

    pub fn new(
        destination: impl Into<String>,
        days: u32,
        interests: impl Into<String>,
        preferences: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            days,
            interests: interests.into(),
            preferences: preferences.into(),
            hotel_stars: None,
            cuisines: None,
        }
    }

    pub fn hotel_stars(mut self, stars: u8) -> Self {
        self.hotel_stars = Some(stars);
        self
    }

    pub fn cuisines(mut self, cuisines: impl Into<String>) -> Self {
        self.cuisines = Some(cuisines.into());
        self
    }

    /// Reject requests the generator cannot sensibly answer.
    pub fn validate(&self) -> Result<(), TripDocError> {
        let required = [
            ("destination", &self.destination),
            ("interests", &self.interests),
            ("preferences", &self.preferences),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(TripDocError::InvalidRequest(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
        if self.days == 0 || self.days > Self::MAX_DAYS {
            return Err(TripDocError::InvalidRequest(format!(
                "days must be 1–{}, got {}",
                Self::MAX_DAYS,
                self.days
            )));
        }
        if let Some(stars) = self.hotel_stars {
            if !(1..=5).contains(&stars) {
                return Err(TripDocError::InvalidRequest(format!(
                    "hotel stars must be 1–5, got {stars}"
                )));
            }
        }
        Ok(())
    }
}
