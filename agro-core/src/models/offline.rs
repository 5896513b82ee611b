use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A crop whose advisory data has been saved for offline use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfflineCrop {
    pub crop: String,
    pub size_mb: Decimal,
    pub downloaded_at: DateTime<Utc>,
}
