/// Counters from one research run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub candidates_fetched: u32,
    pub candidates_examined: u32,
    pub render_misses: u32,
    pub extraction_failures: u32,
    pub admitted: u32,
    pub rejected: u32,
    pub filter_errors: u32,
    pub backfilled: u32,
    pub published: u32,
    pub messages_sent: u32,
    pub messages_failed: u32,
    pub messages_skipped: u32,
}

impl RunStats {
    pub fn analyzed(&self) -> u32 {
        self.admitted + self.rejected + self.filter_errors
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Research Run Complete ===")?;
        writeln!(f, "Candidates fetched:  {}", self.candidates_fetched)?;
        writeln!(f, "Candidates examined: {}", self.candidates_examined)?;
        writeln!(f, "Render misses:       {}", self.render_misses)?;
        writeln!(f, "Extraction failures: {}", self.extraction_failures)?;
        writeln!(f, "Products analyzed:   {}", self.analyzed())?;
        writeln!(f, "\nFilter:")?;
        writeln!(f, "  Admitted: {}", self.admitted)?;
        writeln!(f, "  Rejected: {}", self.rejected)?;
        writeln!(f, "  Errors:   {}", self.filter_errors)?;
        writeln!(f, "\nPublished: {} ({} backfilled)", self.published, self.backfilled)?;
        write!(
            f,
            "Messages:  {} sent, {} failed",
            self.messages_sent, self.messages_failed
        )?;
        if self.messages_skipped > 0 {
            write!(f, ", {} skipped (dry run)", self.messages_skipped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_dry_run_only_when_skipping() {
        let stats = RunStats {
            admitted: 2,
            rejected: 1,
            published: 3,
            backfilled: 1,
            messages_sent: 1,
            ..Default::default()
        };
        let text = stats.to_string();
        assert!(text.contains("Products analyzed:   3"));
        assert!(text.contains("Published: 3 (1 backfilled)"));
        assert!(!text.contains("dry run"));

        let dry = RunStats {
            messages_skipped: 1,
            ..Default::default()
        };
        assert!(dry.to_string().contains("1 skipped (dry run)"));
    }
}
