use crate::db::models::Blog;
use crate::state::AppState;

/// Starter posts, embedded into the binary.
const DEMO_BLOGS: &str = include_str!("../demo_data/blogs.json");

/// Write the starter blog posts if the blog collection is empty.
///
/// Returns how many posts were added.
pub async fn seed_demo_data(state: &AppState) -> usize {
    tracing::info!("Starting demo data seeding...");

    if !state.blogs.get_all().await.is_empty() {
        tracing::info!("Blogs already present, skipping demo data.");
        return 0;
    }

    let blogs: Vec<Blog> = match serde_json::from_str(DEMO_BLOGS) {
        Ok(blogs) => blogs,
        Err(e) => {
            tracing::error!("Failed to parse demo blogs: {}", e);
            return 0;
        }
    };

    let mut added = 0;
    for blog in blogs {
        let title = blog.title_en.clone();
        match state.blogs.insert(blog).await {
            Some(stored) => {
                tracing::info!("Seeded blog '{}'", stored.meta.id);
                added += 1;
            }
            None => tracing::error!("Failed to seed blog '{}'", title),
        }
    }

    tracing::info!("Demo data seeding completed.");
    added
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::config::AdminConfig;
    use crate::storage::client::LocalStorageClient;

    fn state(dir: &tempfile::TempDir) -> AppState {
        AppState::new(
            Arc::new(LocalStorageClient::new(dir.path())),
            AdminConfig::new("admin"),
        )
    }

    #[tokio::test]
    async fn test_seeds_empty_blog_collection() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);

        assert_eq!(seed_demo_data(&state).await, 3);

        let blogs = state.blogs.get_all().await;
        assert_eq!(blogs[0].meta.id, "the-joy-of-giving-community-service-event");
        assert_eq!(blogs[2].meta.order, Some(3));
    }

    #[tokio::test]
    async fn test_seeding_twice_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);

        seed_demo_data(&state).await;
        assert_eq!(seed_demo_data(&state).await, 0);
        assert_eq!(state.blogs.get_all().await.len(), 3);
    }
}
