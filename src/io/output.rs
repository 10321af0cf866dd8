use crate::core::{AdGroup, BidPriority};
use crate::pipeline::CampaignPlan;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_plan(&mut self, plan: &CampaignPlan) -> anyhow::Result<()>;
}

/// Pretty JSON of the flat export shape.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_plan(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&plan.to_export())?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_plan(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        self.write_header(plan)?;
        self.write_summary(plan)?;
        self.write_ad_groups(plan)?;
        self.write_themes(plan)?;
        self.write_bids(plan)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", plan.campaign.name)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        let campaign = &plan.campaign;

        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_summary_row("Budget", &format!("{:.2}", campaign.total_budget))?;
        self.write_summary_row(
            "Target conversion rate",
            &format!("{:.1}%", campaign.target_conversion_rate * 100.0),
        )?;
        self.write_summary_row("Ad groups", &campaign.ad_groups.len().to_string())?;
        self.write_summary_row("Keywords", &campaign.total_keywords().to_string())?;
        self.write_summary_row("Average CPC", &format!("{:.2}", campaign.average_cpc()))?;
        self.write_summary_row(
            "Estimated spend",
            &format!("{:.2}", plan.allocation.estimated_spend),
        )?;
        self.write_summary_row("Classifier", plan.classification.final_strategy.as_str())?;
        if let Some(reason) = &plan.classification.fallback_reason {
            self.write_summary_row("Classifier fallback", reason)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary_row(&mut self, metric: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }

    fn write_ad_groups(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        if plan.campaign.ad_groups.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Ad Groups")?;
        writeln!(self.writer)?;
        for group in &plan.campaign.ad_groups {
            writeln!(
                self.writer,
                "### {} ({})",
                group.name,
                group.intent_category.label()
            )?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", group.theme_description)?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "Suggested CPC: {:.2} - {:.2}",
                group.suggested_cpc_range.low, group.suggested_cpc_range.high
            )?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "| Keyword | Volume | Bid Range | Competition | Match | Relevance |"
            )?;
            writeln!(
                self.writer,
                "|---------|--------|-----------|-------------|-------|-----------|"
            )?;
            for kw in &group.keywords {
                writeln!(
                    self.writer,
                    "| {} | {} | {:.2} - {:.2} | {} | {} | {:.2} |",
                    kw.term,
                    kw.metrics.average_monthly_searches,
                    kw.metrics.bid_low,
                    kw.metrics.bid_high,
                    kw.metrics.competition_level,
                    kw.suggested_match_type,
                    kw.relevance_score
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_themes(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        if plan.themes.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Asset Group Themes")?;
        writeln!(self.writer)?;
        for theme in &plan.themes {
            writeln!(
                self.writer,
                "- **{}**: {}",
                theme.name,
                theme.member_terms.join(", ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_bids(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        if plan.bid_suggestions.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Shopping Bids")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Product | CPC | Range | Volume | ROAS | Spend | Priority |"
        )?;
        writeln!(
            self.writer,
            "|---------|-----|-------|--------|------|-------|----------|"
        )?;
        for bid in &plan.bid_suggestions {
            writeln!(
                self.writer,
                "| {} | {:.2} | {:.2} - {:.2} | {} | {:.2} | {:.2} | {} |",
                bid.product_hint,
                bid.suggested_cpc,
                bid.cpc_low,
                bid.cpc_high,
                bid.search_volume,
                bid.roas_score,
                bid.estimated_monthly_spend,
                bid.priority
            )?;
        }
        Ok(())
    }
}

/// Colored summary plus tables.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_plan(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        self.print_header(plan)?;
        self.print_summary(plan)?;
        for group in &plan.campaign.ad_groups {
            self.print_ad_group(group)?;
        }
        self.print_themes(plan)?;
        self.print_bids(plan)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        let title = plan.campaign.name.as_str();
        writeln!(self.writer, "{}", title.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(title.len()).blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        let campaign = &plan.campaign;
        let stats = &plan.stats;

        writeln!(self.writer, "{}", "Summary:".bold())?;
        writeln!(
            self.writer,
            "  Keywords: {} raw, {} qualified, {} allocated",
            stats.raw_records, stats.qualified, stats.allocated_keywords
        )?;
        writeln!(self.writer, "  Ad groups: {}", campaign.ad_groups.len())?;

        let spend = format!("{:.2}", plan.allocation.estimated_spend);
        let spend = if plan.allocation.budget_binding {
            spend.yellow()
        } else {
            spend.green()
        };
        writeln!(
            self.writer,
            "  Estimated spend: {} of {:.2}",
            spend, campaign.total_budget
        )?;
        writeln!(self.writer, "  Average CPC: {:.2}", campaign.average_cpc())?;

        let strategy = plan.classification.final_strategy.as_str();
        match &plan.classification.fallback_reason {
            Some(reason) => writeln!(
                self.writer,
                "  Classifier: {} ({})",
                strategy,
                format!("fallback: {reason}").yellow()
            )?,
            None => writeln!(self.writer, "  Classifier: {strategy}")?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_ad_group(&mut self, group: &AdGroup) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} [{}] CPC {:.2} - {:.2}",
            group.name.bold(),
            group.intent_category.label().cyan(),
            group.suggested_cpc_range.low,
            group.suggested_cpc_range.high
        )?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "Keyword",
            "Volume",
            "Bid Range",
            "Competition",
            "Match",
            "Relevance",
        ]);
        for kw in &group.keywords {
            table.add_row(vec![
                kw.term.clone(),
                kw.metrics.average_monthly_searches.to_string(),
                format!("{:.2} - {:.2}", kw.metrics.bid_low, kw.metrics.bid_high),
                kw.metrics.competition_level.to_string(),
                kw.suggested_match_type.to_string(),
                format!("{:.2}", kw.relevance_score),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_themes(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        if plan.themes.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", "Asset Group Themes:".bold())?;
        for theme in &plan.themes {
            writeln!(
                self.writer,
                "  {}: {}",
                theme.name.cyan(),
                theme.member_terms.join(", ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_bids(&mut self, plan: &CampaignPlan) -> anyhow::Result<()> {
        if plan.bid_suggestions.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", "Shopping Bids:".bold())?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "Product", "CPC", "Range", "Volume", "ROAS", "Spend", "Priority",
        ]);
        for bid in &plan.bid_suggestions {
            table.add_row(vec![
                bid.product_hint.clone(),
                format!("{:.2}", bid.suggested_cpc),
                format!("{:.2} - {:.2}", bid.cpc_low, bid.cpc_high),
                bid.search_volume.to_string(),
                format!("{:.2}", bid.roas_score),
                format!("{:.2}", bid.estimated_monthly_spend),
                priority_label(bid.priority),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

fn priority_label(priority: BidPriority) -> String {
    match priority {
        BidPriority::High => priority.as_str().green().to_string(),
        BidPriority::Medium => priority.as_str().yellow().to_string(),
        BidPriority::Low => priority.as_str().normal().to_string(),
    }
}

pub fn create_writer(format: OutputFormat, out: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::core::{Competition, KeywordRecord, Provenance};
    use crate::pipeline::CampaignPlanner;

    fn plan() -> CampaignPlan {
        let records = vec![
            KeywordRecord::new("cubehq", 1200, 0.5, 1.5, Competition::Low, Provenance::Brand),
            KeywordRecord::new(
                "analytics platform for enterprise",
                4000,
                1.0,
                3.0,
                Competition::Medium,
                Provenance::Verified,
            ),
        ];
        CampaignPlanner::new(&PlannerConfig::default())
            .unwrap()
            .plan_records(&records)
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        {
            let mut writer: Box<dyn OutputWriter + '_> = match format {
                OutputFormat::Json => Box::new(JsonWriter::new(&mut buf)),
                OutputFormat::Markdown => Box::new(MarkdownWriter::new(&mut buf)),
                OutputFormat::Terminal => Box::new(TerminalWriter::new(&mut buf)),
            };
            writer.write_plan(&plan()).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_json_writer_emits_flat_records() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        let groups = value["search_campaign"]["ad_groups"].as_array().unwrap();
        assert_eq!(groups[0]["name"], "Brand Terms");
        assert_eq!(groups[0]["keywords"][0]["match_type"], "exact");
        assert!(value["pmax_themes"].is_array());
        assert!(value["shopping_bids"].is_array());
    }

    #[test]
    fn test_markdown_writer_sections() {
        let md = render(OutputFormat::Markdown);
        assert!(md.starts_with("# SEM Campaign - Search"));
        assert!(md.contains("## Ad Groups"));
        assert!(md.contains("### Brand Terms (Brand Terms)"));
        assert!(md.contains("| cubehq |"));
    }

    #[test]
    fn test_terminal_writer_renders_tables() {
        let out = render(OutputFormat::Terminal);
        assert!(out.contains("Brand Terms"));
        assert!(out.contains("cubehq"));
        assert!(out.contains("Classifier: rule-based"));
    }
}
