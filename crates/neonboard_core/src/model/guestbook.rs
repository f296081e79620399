//! Read-only guestbook sample data and list filtering.
//!
//! # Responsibility
//! - Provide the built-in guestbook posts shown on the management page.
//! - Filter posts by free-text search and publication status.
//!
//! # Invariants
//! - Sample posts are never mutated; callers receive owned copies.
//! - Search is case-insensitive over author and title only.

use serde::{Deserialize, Serialize};

/// Publication state of one guestbook post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Published,
    Unpublished,
    Draft,
}

/// One guestbook entry as displayed in the management list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookPost {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: PostStatus,
    pub views: u64,
    pub likes: u64,
    /// Unix epoch milliseconds.
    pub created_at_ms: i64,
    pub tags: Vec<String>,
}

/// List filter; an empty search and `None` status match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub search: String,
    pub status: Option<PostStatus>,
}

impl PostFilter {
    pub fn matches(&self, post: &GuestbookPost) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || post.author.to_lowercase().contains(needle.as_str())
            || post.title.to_lowercase().contains(needle.as_str());
        let matches_status = self.status.map_or(true, |status| post.status == status);
        matches_search && matches_status
    }
}

/// Returns the posts accepted by `filter`, keeping input order.
pub fn filter_posts<'a>(posts: &'a [GuestbookPost], filter: &PostFilter) -> Vec<&'a GuestbookPost> {
    posts.iter().filter(|post| filter.matches(post)).collect()
}

/// Counts posts carrying `status`.
pub fn count_by_status(posts: &[GuestbookPost], status: PostStatus) -> usize {
    posts.iter().filter(|post| post.status == status).count()
}

/// Built-in sample posts, newest first.
pub fn sample_posts() -> Vec<GuestbookPost> {
    vec![
        post(
            "#GB-001",
            "Hello! Great portfolio",
            "Kim Dev",
            PostStatus::Published,
            (245, 12),
            1_705_276_800_000,
            &["greeting", "portfolio"],
        ),
        post(
            "#GB-002",
            "Question about your React project",
            "Lee Front",
            PostStatus::Published,
            (189, 8),
            1_705_190_400_000,
            &["react", "question"],
        ),
        post(
            "#GB-003",
            "Sharing my TypeScript experience",
            "Park Type",
            PostStatus::Published,
            (156, 15),
            1_705_104_000_000,
            &["typescript", "experience"],
        ),
        post(
            "#GB-004",
            "Next.js performance tips",
            "Choi Perf",
            PostStatus::Unpublished,
            (0, 0),
            1_705_017_600_000,
            &["nextjs", "optimization"],
        ),
        post(
            "#GB-005",
            "Career advice for frontend developers",
            "Jung Career",
            PostStatus::Draft,
            (0, 0),
            1_704_931_200_000,
            &["career", "advice"],
        ),
    ]
}

fn post(
    id: &str,
    title: &str,
    author: &str,
    status: PostStatus,
    (views, likes): (u64, u64),
    created_at_ms: i64,
    tags: &[&str],
) -> GuestbookPost {
    GuestbookPost {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        status,
        views,
        likes,
        created_at_ms,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{count_by_status, filter_posts, sample_posts, PostFilter, PostStatus};

    #[test]
    fn sample_status_counts_match_management_page() {
        let posts = sample_posts();
        assert_eq!(posts.len(), 5);
        assert_eq!(count_by_status(&posts, PostStatus::Published), 3);
        assert_eq!(count_by_status(&posts, PostStatus::Unpublished), 1);
        assert_eq!(count_by_status(&posts, PostStatus::Draft), 1);
    }

    #[test]
    fn search_is_case_insensitive_over_author_and_title() {
        let posts = sample_posts();
        let by_author = filter_posts(
            &posts,
            &PostFilter {
                search: "kim".to_string(),
                status: None,
            },
        );
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].id, "#GB-001");

        let by_title = filter_posts(
            &posts,
            &PostFilter {
                search: "  NEXT.JS ".to_string(),
                status: None,
            },
        );
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "#GB-004");
    }

    #[test]
    fn status_filter_combines_with_search() {
        let posts = sample_posts();
        let filter = PostFilter {
            search: "question".to_string(),
            status: Some(PostStatus::Draft),
        };
        assert!(filter_posts(&posts, &filter).is_empty());

        let published = PostFilter {
            search: String::new(),
            status: Some(PostStatus::Published),
        };
        assert_eq!(filter_posts(&posts, &published).len(), 3);
    }
}
