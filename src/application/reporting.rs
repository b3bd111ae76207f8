use crate::application::analysis::AnalysisReport;
use crate::domain::performance::PerformanceSnapshot;
use crate::domain::ports::RenderOutcome;
use std::fmt::Write;
use tracing::info;

const RULE_WIDTH: usize = 64;

/// Console summary of one analysis run.
pub struct RunSummary<'a> {
    report: &'a AnalysisReport,
    outcome: Option<&'a RenderOutcome>,
}

impl<'a> RunSummary<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self {
            report,
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: &'a RenderOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Emits the headline numbers through tracing.
    pub fn log(&self) {
        let s = &self.report.snapshot;
        info!(
            "{}: {:.2}% | {}: {:.2}% | spread {:+.2} pts over {} days",
            s.portfolio_label,
            s.portfolio_pct,
            s.market_label,
            s.market_pct,
            s.spread_pct,
            compared_days(s)
        );
    }

    pub fn render(&self) -> String {
        let s = &self.report.snapshot;
        let mut out = String::new();

        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(out, "PERFORMANCE SUMMARY");
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{:<40} | {:>10}", "Series", "Return%");
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{:<40} | {:>9.2}%", s.portfolio_label, s.portfolio_pct);
        let _ = writeln!(out, "{:<40} | {:>9.2}%", s.market_label, s.market_pct);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{:<40} | {:>+10.2}", "Spread (pts)", s.spread_pct);
        let _ = writeln!(out, "{:<40} | {:>10}", "Days compared", compared_days(s));
        let _ = writeln!(
            out,
            "{}",
            if s.outperformed() {
                "Portfolio beat the market"
            } else {
                "Portfolio did not beat the market"
            }
        );

        if !s.windows_match() {
            let _ = writeln!(
                out,
                "Note: portfolio has {} days, market has {}",
                s.portfolio_days, s.market_days
            );
        }

        let holdings: Vec<String> = self
            .report
            .portfolio
            .holdings()
            .map(|(asset, qty)| format!("{}={}", asset, qty))
            .collect();
        let _ = writeln!(out, "Holdings: {}", holdings.join(", "));

        match self.outcome {
            Some(RenderOutcome::Written(path)) => {
                let _ = writeln!(out, "Chart saved to: {}", path.display());
            }
            Some(RenderOutcome::Displayed) => {
                let _ = writeln!(out, "Chart window closed");
            }
            None => {}
        }
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}

/// Days that both series actually cover.
fn compared_days(snapshot: &PerformanceSnapshot) -> usize {
    snapshot.portfolio_days.min(snapshot.market_days)
}
