//! The four aggregate views derived for the chart sink.
//!
//! Each builder is a pure function over the full dataset and returns a
//! declarative description the rendering surface can draw without any
//! domain knowledge. Outputs are recomputed on every call, never cached.

use serde::Serialize;

use crate::coerce::coerce_field;
use crate::model::Record;
use crate::nutrients::NUTRIENT_KEYS;

const PROTEIN_AXIS: &str = "Protein (g)";
const CARBS_AXIS: &str = "Carbs (g)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Scatter,
    Heatmap,
    Pie,
}

/// Average protein per diet, one bar per diet in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub averages: Vec<f64>,
    pub value_axis: &'static str,
}

/// Protein/carbs point per record; records missing either coordinate are
/// dropped, not zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub kind: ChartKind,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub category: usize,
    pub nutrient: usize,
    pub value: f64,
}

/// Diet x nutrient average matrix as flat cells over the full cross
/// product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub nutrients: Vec<&'static str>,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

/// Record count per diet in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub kind: ChartKind,
    pub slices: Vec<PieSlice>,
}

/// Distinct diet labels in first-seen order.
fn seen_diets(dataset: &[Record]) -> Vec<String> {
    let mut diets: Vec<String> = Vec::new();
    for record in dataset {
        let label = record.diet_label();
        if !diets.contains(&label) {
            diets.push(label);
        }
    }
    diets
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn protein_by_diet(dataset: &[Record]) -> BarChart {
    // A diet gets a group as soon as it is seen, even when the record's
    // protein is non-coercible; such groups average to 0.
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for record in dataset {
        let label = record.diet_label();
        let slot = match groups.iter().position(|(name, _)| *name == label) {
            Some(index) => index,
            None => {
                groups.push((label, Vec::new()));
                groups.len() - 1
            }
        };
        if let Some(protein) = coerce_field(record, NUTRIENT_KEYS[0]) {
            groups[slot].1.push(protein);
        }
    }

    BarChart {
        kind: ChartKind::Bar,
        categories: groups.iter().map(|(name, _)| name.clone()).collect(),
        averages: groups.iter().map(|(_, values)| mean(values)).collect(),
        value_axis: PROTEIN_AXIS,
    }
}

pub fn protein_vs_carbs(dataset: &[Record]) -> ScatterChart {
    let points = dataset
        .iter()
        .filter_map(|record| {
            let protein = coerce_field(record, NUTRIENT_KEYS[0])?;
            let carbs = coerce_field(record, NUTRIENT_KEYS[1])?;
            Some([protein, carbs])
        })
        .collect();

    ScatterChart {
        kind: ChartKind::Scatter,
        x_axis: PROTEIN_AXIS,
        y_axis: CARBS_AXIS,
        points,
    }
}

pub fn diet_nutrient_heatmap(dataset: &[Record]) -> HeatmapChart {
    let diets = seen_diets(dataset);
    let mut cells = Vec::with_capacity(NUTRIENT_KEYS.len() * diets.len());

    for (nutrient_index, key) in NUTRIENT_KEYS.iter().enumerate() {
        // Some records carry the field without its unit suffix
        let bare_key = key.strip_suffix("(g)").unwrap_or(key);
        for (diet_index, diet) in diets.iter().enumerate() {
            let values: Vec<f64> = dataset
                .iter()
                .filter(|record| record.diet_label() == *diet)
                .filter_map(|record| {
                    coerce_field(record, key).or_else(|| coerce_field(record, bare_key))
                })
                .collect();
            cells.push(HeatmapCell {
                category: diet_index,
                nutrient: nutrient_index,
                value: (mean(&values) * 100.0).round() / 100.0,
            });
        }
    }

    HeatmapChart {
        kind: ChartKind::Heatmap,
        categories: diets,
        nutrients: NUTRIENT_KEYS.to_vec(),
        cells,
    }
}

pub fn diet_counts(dataset: &[Record]) -> PieChart {
    let mut slices: Vec<PieSlice> = Vec::new();
    for record in dataset {
        let label = record.diet_label();
        match slices.iter_mut().find(|slice| slice.label == label) {
            Some(slice) => slice.count += 1,
            None => slices.push(PieSlice { label, count: 1 }),
        }
    }

    PieChart {
        kind: ChartKind::Pie,
        slices,
    }
}
