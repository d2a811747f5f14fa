//! Static chart datasets handed to the view
//!
//! Nothing here is computed; the series are fixed demo data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
}

/// One chart widget: where it goes, its labels and its series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn plain_charts() -> Vec<ChartSpec> {
    vec![ChartSpec {
        id: "weeklyChart".to_string(),
        kind: ChartKind::Bar,
        labels: labels(&["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]),
        series: vec![Series {
            label: "Distance (km)".to_string(),
            data: vec![3.2, 0.0, 5.1, 2.8, 4.3, 6.7, 3.8],
        }],
    }]
}

pub fn cyberpunk_charts() -> Vec<ChartSpec> {
    vec![ChartSpec {
        id: "neuralChart".to_string(),
        kind: ChartKind::Line,
        labels: labels(&["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"]),
        series: vec![
            Series {
                label: "Neural Activity".to_string(),
                data: vec![85.0, 92.0, 78.0, 96.0, 89.0, 94.0, 87.0],
            },
            Series {
                label: "Quantum Efficiency".to_string(),
                data: vec![78.0, 85.0, 92.0, 88.0, 95.0, 82.0, 91.0],
            },
        ],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_match_label_count() {
        for chart in plain_charts().iter().chain(cyberpunk_charts().iter()) {
            for series in &chart.series {
                assert_eq!(series.data.len(), chart.labels.len(), "{}", chart.id);
            }
        }
    }
}
