// JSON report of a full comparison.
//
// One entry per vocabulary term in ranked order, carrying the raw counts and
// the intermediate statistic so results can be audited outside this tool.

use serde::Serialize;

use crate::extractor::Analysis;

/// One term's row in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermReport {
    pub term: String,
    pub z_score: f64,
    pub delta: f64,
    pub variance: f64,
    pub count_a: f64,
    pub count_b: f64,
    pub prior: f64,
}

/// Top-level JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub vocab_size: usize,
    pub total_a: f64,
    pub total_b: f64,
    /// All terms, ascending by z-score (most corpus-B-distinctive first)
    pub terms: Vec<TermReport>,
}

impl ComparisonReport {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let terms = analysis
            .ranked
            .iter()
            .filter_map(|ranked| {
                let i = analysis.vocabulary.index_of(&ranked.term)?;
                let stat = analysis.statistics[i];
                Some(TermReport {
                    term: ranked.term.clone(),
                    z_score: stat.z_score,
                    delta: stat.delta,
                    variance: stat.variance,
                    count_a: analysis.counts.counts_a[i],
                    count_b: analysis.counts.counts_b[i],
                    prior: analysis.priors[i],
                })
            })
            .collect();

        Self {
            vocab_size: analysis.vocabulary.len(),
            total_a: analysis.counts.total_a(),
            total_b: analysis.counts.total_b(),
            terms,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
