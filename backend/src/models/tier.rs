use std::fmt;

/// One of the four logical storage tiers of the ingestion pipeline.
///
/// The bronze table lands one row roughly per raw ingested record; the three
/// silver tables are derived downstream of bronze and each is expected to
/// receive a copy of every bronze record. Tiers are read-only from this
/// crate's perspective; their lifecycle belongs to the ingestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Bronze,
    SilverRrBucket,
    SilverVitalsBaseline,
    SilverVitalsSwt,
}

impl Tier {
    /// All tiers, in presentation order.
    pub const ALL: [Tier; 4] = [
        Tier::Bronze,
        Tier::SilverRrBucket,
        Tier::SilverVitalsBaseline,
        Tier::SilverVitalsSwt,
    ];

    /// The three silver sub-tiers.
    pub const SILVER: [Tier; 3] = [
        Tier::SilverRrBucket,
        Tier::SilverVitalsBaseline,
        Tier::SilverVitalsSwt,
    ];

    /// Physical table (directory) name used by the ingestion pipeline.
    pub fn table_name(&self) -> &'static str {
        match self {
            Tier::Bronze => "bronze",
            Tier::SilverRrBucket => "silver_rrbucket",
            Tier::SilverVitalsBaseline => "silver_vitalsbaseline",
            Tier::SilverVitalsSwt => "silver_vitalsswt",
        }
    }

    /// Human-readable column label shown by the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze Data",
            Tier::SilverRrBucket => "Silver RRBucket",
            Tier::SilverVitalsBaseline => "Silver VitalsBaseline",
            Tier::SilverVitalsSwt => "Silver VitalSWT",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::Tier;

    #[test]
    fn test_tier_order_and_names() {
        let names: Vec<&str> = Tier::ALL.iter().map(|t| t.table_name()).collect();
        assert_eq!(
            names,
            vec![
                "bronze",
                "silver_rrbucket",
                "silver_vitalsbaseline",
                "silver_vitalsswt"
            ]
        );
    }

    #[test]
    fn test_silver_subset() {
        assert!(Tier::SILVER.iter().all(|t| *t != Tier::Bronze));
        assert_eq!(Tier::SILVER.len(), 3);
    }

    #[test]
    fn test_display_uses_table_name() {
        assert_eq!(Tier::SilverVitalsSwt.to_string(), "silver_vitalsswt");
    }
}
