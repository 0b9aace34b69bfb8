//! Ranking policies for batch searches

use serde::Serialize;

use super::Assessment;

/// How a batch of assessed destinations is ordered and cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Highest preference score first; equal scores keep encounter order
    ScoreRanked,
    /// Warmest daytime high first, after dropping destinations that are
    /// colder than `min_temp_f` or, with `exclude_rain`, wetter than `rain_limit_mm`
    TemperatureRanked {
        min_temp_f: f64,
        exclude_rain: bool,
        rain_limit_mm: f64,
    },
}

impl RankingPolicy {
    /// Order `candidates` and keep at most `limit`
    #[must_use]
    pub fn rank(&self, mut candidates: Vec<Assessment>, limit: usize) -> Vec<Assessment> {
        match *self {
            RankingPolicy::ScoreRanked => {
                // sort_by is stable, ties keep encounter order
                candidates.sort_by(|a, b| b.score.cmp(&a.score));
            }
            RankingPolicy::TemperatureRanked {
                min_temp_f,
                exclude_rain,
                rain_limit_mm,
            } => {
                candidates.retain(|c| {
                    c.weather.avg_max_f >= min_temp_f
                        && (!exclude_rain || c.weather.total_rain_mm < rain_limit_mm)
                });
                candidates.sort_by(|a, b| b.weather.avg_max_f.total_cmp(&a.weather.avg_max_f));
            }
        }

        candidates.truncate(limit);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::WeatherSummary;

    fn candidate(name: &str, score: u8, avg_max_f: f64, rain: f64) -> Assessment {
        Assessment {
            name: name.to_string(),
            weather: WeatherSummary {
                avg_max_f,
                avg_min_f: avg_max_f - 15.0,
                avg_temp_f: avg_max_f - 7.5,
                total_rain_mm: rain,
                daily: Vec::new(),
            },
            score,
        }
    }

    fn names(ranked: &[Assessment]) -> Vec<&str> {
        ranked.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_score_ranked_is_stable() {
        let candidates = vec![
            candidate("a", 1, 70.0, 0.0),
            candidate("b", 2, 70.0, 0.0),
            candidate("c", 0, 70.0, 0.0),
            candidate("d", 2, 70.0, 0.0),
            candidate("e", 1, 70.0, 0.0),
        ];

        let ranked = RankingPolicy::ScoreRanked.rank(candidates.clone(), 2);
        assert_eq!(names(&ranked), ["b", "d"]);

        let ranked = RankingPolicy::ScoreRanked.rank(candidates, 5);
        assert_eq!(names(&ranked), ["b", "d", "a", "e", "c"]);
    }

    #[test]
    fn test_score_ranked_takes_top_five() {
        let candidates = (0..7)
            .map(|i| candidate(&format!("city{i}"), 1, 60.0, 0.0))
            .collect();
        let ranked = RankingPolicy::ScoreRanked.rank(candidates, 5);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[4].name, "city4");
    }

    #[test]
    fn test_temperature_ranked_filters_and_sorts() {
        let policy = RankingPolicy::TemperatureRanked {
            min_temp_f: 60.0,
            exclude_rain: false,
            rain_limit_mm: 5.0,
        };
        let ranked = policy.rank(
            vec![
                candidate("cool", 0, 55.0, 0.0),
                candidate("hot", 0, 70.0, 12.0),
                candidate("mild", 0, 62.0, 0.0),
            ],
            5,
        );
        assert_eq!(names(&ranked), ["hot", "mild"]);
    }

    #[test]
    fn test_temperature_ranked_rain_cutoff_is_exclusive() {
        let policy = RankingPolicy::TemperatureRanked {
            min_temp_f: 60.0,
            exclude_rain: true,
            rain_limit_mm: 5.0,
        };
        let ranked = policy.rank(
            vec![
                candidate("soaked", 0, 80.0, 5.0),
                candidate("damp", 0, 75.0, 4.9),
                candidate("dry", 0, 65.0, 0.0),
            ],
            5,
        );
        assert_eq!(names(&ranked), ["damp", "dry"]);
    }
}
