use serde::{Deserialize, Serialize};

/// A freedom wall post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A gamified challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub completed: bool,
}

/// Counters shown on the admin dashboard tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub flagged_posts: u64,
}

impl DashboardStats {
    pub fn active_share(&self) -> f64 {
        percentage(self.active_users, self.total_users)
    }

    pub fn flagged_share(&self) -> f64 {
        percentage(self.flagged_posts, self.total_posts)
    }
}

/// `part` as a percentage of `whole`, rounded to one decimal; 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / whole as f64).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(5, 5), 100.0);
    }

    #[test]
    fn test_dashboard_stats_tolerate_missing_fields() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"total_users":8,"active_users":2}"#).unwrap();
        assert_eq!(stats.active_share(), 25.0);
        assert_eq!(stats.flagged_share(), 0.0);
    }
}
