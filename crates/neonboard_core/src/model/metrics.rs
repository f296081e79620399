//! Simulated business counters shown on stat cards.
//!
//! # Responsibility
//! - Define the site metrics and guestbook metrics records with defaults.
//! - Merge partial numeric patches into those records.
//!
//! # Invariants
//! - Merges never clamp; values may go negative or become inconsistent.
//! - Fields omitted from a patch keep their previous value.

use crate::model::guestbook::{count_by_status, GuestbookPost, PostStatus};
use serde::{Deserialize, Serialize};

/// Generic site metrics for the dashboard home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStats {
    pub visitors: i64,
    pub revenue: i64,
    pub orders: i64,
    /// Conversion rate in percent.
    pub conversion: f64,
}

impl Default for SiteStats {
    fn default() -> Self {
        Self {
            visitors: 12_450,
            revenue: 45_678,
            orders: 892,
            conversion: 3.2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteStatsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitors: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<f64>,
}

impl SiteStats {
    pub fn apply(&mut self, patch: &SiteStatsPatch) {
        if let Some(value) = patch.visitors {
            self.visitors = value;
        }
        if let Some(value) = patch.revenue {
            self.revenue = value;
        }
        if let Some(value) = patch.orders {
            self.orders = value;
        }
        if let Some(value) = patch.conversion {
            self.conversion = value;
        }
    }
}

/// Guestbook counters for the posts management page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestbookStats {
    pub total_posts: i64,
    pub published_posts: i64,
    pub unpublished_posts: i64,
    pub total_views: i64,
    pub total_comments: i64,
    /// Month-over-month growth in percent.
    pub monthly_growth: f64,
}

const DEFAULT_TOTAL_COMMENTS: i64 = 24;
const DEFAULT_MONTHLY_GROWTH: f64 = 12.5;

impl Default for GuestbookStats {
    fn default() -> Self {
        Self::from_posts(&crate::model::guestbook::sample_posts())
    }
}

impl GuestbookStats {
    /// Derives post and view counters from a post list.
    ///
    /// Comments and growth are not carried by posts, so they start from the
    /// fixed sample seeds.
    pub fn from_posts(posts: &[GuestbookPost]) -> Self {
        Self {
            total_posts: posts.len() as i64,
            published_posts: count_by_status(posts, PostStatus::Published) as i64,
            unpublished_posts: count_by_status(posts, PostStatus::Unpublished) as i64,
            total_views: posts.iter().map(|post| post.views as i64).sum(),
            total_comments: DEFAULT_TOTAL_COMMENTS,
            monthly_growth: DEFAULT_MONTHLY_GROWTH,
        }
    }

    pub fn apply(&mut self, patch: &GuestbookStatsPatch) {
        if let Some(value) = patch.total_posts {
            self.total_posts = value;
        }
        if let Some(value) = patch.published_posts {
            self.published_posts = value;
        }
        if let Some(value) = patch.unpublished_posts {
            self.unpublished_posts = value;
        }
        if let Some(value) = patch.total_views {
            self.total_views = value;
        }
        if let Some(value) = patch.total_comments {
            self.total_comments = value;
        }
        if let Some(value) = patch.monthly_growth {
            self.monthly_growth = value;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestbookStatsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_posts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unpublished_posts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_views: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_comments: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_growth: Option<f64>,
}

/// Compact stat-card rendering: `$1.2M` above a million, `12.4K` above a
/// thousand, the plain number otherwise.
pub fn format_stat_value(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        value.to_string()
    }
}
