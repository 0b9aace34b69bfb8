//! Display model for search results
//!
//! Rendering is a pure function of the search outcome; front ends only
//! lay out what is produced here.

use serde::Serialize;

use crate::planner::{Assessment, BatchTarget, DailyPoint, DateRange, SearchOutcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub title: String,
    pub cards: Vec<DestinationCard>,
    /// Set instead of cards when nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationCard {
    pub name: String,
    /// "<avg min> – <avg max> °F"
    pub temperature: String,
    /// "<total> mm"
    pub precipitation: String,
    pub score: u8,
    pub chart: Vec<DailyPoint>,
}

impl From<&Assessment> for DestinationCard {
    fn from(assessment: &Assessment) -> Self {
        let weather = &assessment.weather;
        Self {
            name: assessment.name.clone(),
            temperature: format!("{:.1} – {:.1} °F", weather.avg_min_f, weather.avg_max_f),
            precipitation: format!("{:.1} mm", weather.total_rain_mm),
            score: assessment.score,
            chart: weather.daily.clone(),
        }
    }
}

#[must_use]
pub fn render(outcome: &SearchOutcome) -> SearchView {
    match outcome {
        SearchOutcome::Single { range, assessment } => SearchView {
            title: format!("Weather for {} from {}", assessment.name, period(range)),
            cards: vec![DestinationCard::from(assessment)],
            message: None,
        },
        SearchOutcome::Ranked {
            range,
            target,
            results,
        } => {
            let (title, empty_message) = match target {
                BatchTarget::Continent(continent) => (
                    format!(
                        "Top {} destinations in {} ({} to {})",
                        results.len(),
                        continent,
                        range.start_param(),
                        range.end_param()
                    ),
                    "No weather data found for selected continent.",
                ),
                BatchTarget::CityName(query) => (
                    format!(
                        "Destinations matching \"{}\" ({} to {})",
                        query,
                        range.start_param(),
                        range.end_param()
                    ),
                    "No destinations match your preferences.",
                ),
            };

            SearchView {
                title,
                cards: results.iter().map(DestinationCard::from).collect(),
                message: results.is_empty().then(|| empty_message.to_string()),
            }
        }
    }
}

fn period(range: &DateRange) -> String {
    format!("{} to {}", range.start_param(), range.end_param())
}
