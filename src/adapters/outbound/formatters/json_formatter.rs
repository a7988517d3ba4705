use crate::application::read_models::{AssetView, ReportReadModel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    tool: Tool,
    summary: Summary<'a>,
    most_referenced: Vec<RankedAsset<'a>>,
    orphaned: Vec<Asset<'a>>,
    cycles: Vec<[Asset<'a>; 2]>,
    cycle_chains: Vec<Vec<Asset<'a>>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    references: Vec<Reference<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<Diagnostic<'a>>,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    timestamp: &'a str,
    scanned_count: usize,
    relationship_count: usize,
    diagnostic_count: usize,
}

#[derive(Debug, Serialize)]
struct Asset<'a> {
    id: &'a str,
    path: &'a str,
}

#[derive(Debug, Serialize)]
struct RankedAsset<'a> {
    #[serde(flatten)]
    asset: Asset<'a>,
    references: usize,
}

#[derive(Debug, Serialize)]
struct Reference<'a> {
    target: Asset<'a>,
    /// `null` when the target is unknown to the build
    referrers: Option<Vec<Asset<'a>>>,
}

#[derive(Debug, Serialize)]
struct Diagnostic<'a> {
    #[serde(flatten)]
    asset: Asset<'a>,
    message: &'a str,
}

/// JsonFormatter adapter for machine-readable dependency reports
///
/// This adapter implements the ReportFormatter port and renders the report
/// as pretty-printed JSON with camelCase keys.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn asset(view: &AssetView) -> Asset<'_> {
        Asset {
            id: &view.id,
            path: &view.path,
        }
    }

    fn assets(views: &[AssetView]) -> Vec<Asset<'_>> {
        views.iter().map(Self::asset).collect()
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let report = JsonReport {
            tool: Tool {
                name: TOOL_NAME,
                version: TOOL_VERSION,
            },
            summary: Summary {
                timestamp: &model.summary.timestamp,
                scanned_count: model.summary.scanned_count,
                relationship_count: model.summary.relationship_count,
                diagnostic_count: model.summary.diagnostic_count,
            },
            most_referenced: model
                .most_referenced
                .iter()
                .map(|entry| RankedAsset {
                    asset: Self::asset(&entry.asset),
                    references: entry.count,
                })
                .collect(),
            orphaned: Self::assets(&model.orphaned),
            cycles: model
                .cycles
                .iter()
                .map(|cycle| [Self::asset(&cycle.first), Self::asset(&cycle.second)])
                .collect(),
            cycle_chains: model
                .cycle_chains
                .iter()
                .map(|chain| Self::assets(chain))
                .collect(),
            references: model
                .references
                .iter()
                .map(|lookup| Reference {
                    target: Self::asset(&lookup.target),
                    referrers: lookup.referrers.as_deref().map(Self::assets),
                })
                .collect(),
            diagnostics: model
                .diagnostics
                .iter()
                .map(|diagnostic| Diagnostic {
                    asset: Self::asset(&diagnostic.asset),
                    message: &diagnostic.message,
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&report)?)
    }
}
