/// Data layer: campaign records, loading, filtering and KPI summaries.
///
/// Architecture:
/// ```text
///  sfmc_email_campaign_sample.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → CampaignDataset (cached per path)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ CampaignDataset  │  Vec<CampaignRecord>, campaign index, date bounds
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  campaign set ∧ date interval → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  column-wise means → KPI strings
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
