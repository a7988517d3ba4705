use crate::application::read_models::{
    AssetView, CycleView, DiagnosticView, ReferenceView, ReferencedAssetView, ReportReadModel,
    SummaryView,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for the most-referenced ranking
const RANKING_TABLE_HEADER: &str = "| Rank | Asset | References |\n";

/// Markdown table separator line for the ranking
const RANKING_TABLE_SEPARATOR: &str = "|------|-------|------------|\n";

/// Markdown table header for diagnostics
const DIAGNOSTIC_TABLE_HEADER: &str = "| Asset | Problem |\n";

/// Markdown table separator line for diagnostics
const DIAGNOSTIC_TABLE_SEPARATOR: &str = "|-------|---------|\n";

/// Placeholder shown for a lookup target the build never saw
const UNKNOWN_TARGET: &str = "???";

/// MarkdownFormatter adapter for human-readable dependency reports
///
/// This adapter implements the ReportFormatter port for Markdown format.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Renders an asset as inline code, using its display path
    fn asset_label(asset: &AssetView) -> String {
        format!("`{}`", Self::escape_markdown_table_cell(&asset.path))
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, summary: &SummaryView) {
        output.push_str("# Asset Dependency Report\n\n");
        output.push_str(&format!("- **Analyzed at:** {}\n", summary.timestamp));
        output.push_str(&format!("- **Scanned assets:** {}\n", summary.scanned_count));
        output.push_str(&format!(
            "- **Assets with dependencies:** {}\n",
            summary.relationship_count
        ));
        if summary.diagnostic_count > 0 {
            output.push_str(&format!(
                "- **Unresolved assets:** {}\n",
                summary.diagnostic_count
            ));
        }
        output.push('\n');
    }

    fn render_most_referenced(&self, output: &mut String, ranking: &[ReferencedAssetView]) {
        output.push_str("## Most Referenced Assets\n\n");

        if ranking.is_empty() {
            output.push_str("*No asset is referenced by more than one analyzed asset*\n\n");
            return;
        }

        output.push_str(RANKING_TABLE_HEADER);
        output.push_str(RANKING_TABLE_SEPARATOR);
        for (rank, entry) in ranking.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                rank + 1,
                Self::asset_label(&entry.asset),
                entry.count
            ));
        }
        output.push('\n');
    }

    fn render_orphans(&self, output: &mut String, orphans: &[AssetView]) {
        output.push_str("## Unreferenced Assets\n\n");

        if orphans.is_empty() {
            output.push_str("*No unreferenced assets*\n\n");
            return;
        }

        for orphan in orphans {
            output.push_str(&format!("- {}\n", Self::asset_label(orphan)));
        }
        output.push('\n');
    }

    fn render_cycles(&self, output: &mut String, cycles: &[CycleView], chains: &[Vec<AssetView>]) {
        output.push_str("## Circular References\n\n");

        if cycles.is_empty() && chains.is_empty() {
            output.push_str("*No circular references*\n\n");
            return;
        }

        for cycle in cycles {
            output.push_str(&format!(
                "- {} ↔ {}\n",
                Self::asset_label(&cycle.first),
                Self::asset_label(&cycle.second)
            ));
        }
        if !cycles.is_empty() {
            output.push('\n');
        }

        // Pairs already cover two-asset groups
        let longer: Vec<&Vec<AssetView>> = chains.iter().filter(|chain| chain.len() > 2).collect();
        if longer.is_empty() {
            return;
        }

        output.push_str("### Reference Loops\n\n");
        output.push_str("Groups of assets that reach each other through longer reference chains.\n\n");
        for chain in longer {
            let members: Vec<String> = chain.iter().map(Self::asset_label).collect();
            output.push_str(&format!(
                "- {} assets: {}\n",
                chain.len(),
                members.join(", ")
            ));
        }
        output.push('\n');
    }

    fn render_references(&self, output: &mut String, references: &[ReferenceView]) {
        output.push_str("## Reference Lookup\n\n");

        for lookup in references {
            output.push_str(&format!("### {}\n\n", Self::asset_label(&lookup.target)));
            match &lookup.referrers {
                None => output.push_str(&format!("- {}\n", UNKNOWN_TARGET)),
                Some(referrers) if referrers.is_empty() => {
                    output.push_str("*Not referenced by any analyzed asset*\n")
                }
                Some(referrers) => {
                    for referrer in referrers {
                        output.push_str(&format!("- {}\n", Self::asset_label(referrer)));
                    }
                }
            }
            output.push('\n');
        }
    }

    fn render_diagnostics(&self, output: &mut String, diagnostics: &[DiagnosticView]) {
        output.push_str("## Diagnostics\n\n");
        output.push_str(
            "Assets whose dependencies could not be read. They were treated as having none.\n\n",
        );
        output.push_str(DIAGNOSTIC_TABLE_HEADER);
        output.push_str(DIAGNOSTIC_TABLE_SEPARATOR);
        for diagnostic in diagnostics {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::asset_label(&diagnostic.asset),
                Self::escape_markdown_table_cell(&diagnostic.message)
            ));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, &model.summary);
        self.render_most_referenced(&mut output, &model.most_referenced);
        self.render_orphans(&mut output, &model.orphaned);
        self.render_cycles(&mut output, &model.cycles, &model.cycle_chains);

        if !model.references.is_empty() {
            self.render_references(&mut output, &model.references);
        }

        if !model.diagnostics.is_empty() {
            self.render_diagnostics(&mut output, &model.diagnostics);
        }

        Ok(output)
    }
}
