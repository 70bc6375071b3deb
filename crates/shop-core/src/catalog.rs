//! Pure operations over a loaded post collection.
//!
//! Storage adapters load the whole document, hand the posts to these
//! functions and persist whatever comes back. Nothing here touches the disk.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{Post, PostPage, PostQuery, PostStats, SortBy};

/// Filter, sort and then paginate. `total` and `pages` describe the filtered
/// set; when the query carries no `page`/`limit` pair the whole set is one page.
pub fn query_posts(posts: Vec<Post>, query: &PostQuery) -> PostPage {
    let needle = normalized(query.search.as_deref());

    let mut posts: Vec<Post> = posts
        .into_iter()
        .filter(|p| query.status.matches(p))
        .filter(|p| needle.as_deref().is_none_or(|n| title_matches(p, n)))
        .collect();

    sort_posts(&mut posts, query.sort_by);
    let total = posts.len();

    match (query.page, query.limit) {
        (Some(page), Some(limit)) => {
            let page = page.max(1);
            let limit = limit.max(1);
            let posts = posts
                .into_iter()
                .skip((page - 1).saturating_mul(limit))
                .take(limit)
                .collect();
            PostPage {
                posts,
                total,
                pages: total.div_ceil(limit),
            }
        }
        _ => PostPage {
            posts,
            total,
            pages: 1,
        },
    }
}

pub fn sort_posts(posts: &mut [Post], sort_by: SortBy) {
    match sort_by {
        SortBy::Order => posts.sort_by_key(|p| p.order),
        SortBy::Date => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Title => posts.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Public feed: active posts only, newest first, sliced `[skip, skip + limit)`.
pub fn active_feed(posts: Vec<Post>, skip: usize, limit: usize) -> Vec<Post> {
    let mut active: Vec<Post> = posts.into_iter().filter(|p| p.active).collect();
    sort_posts(&mut active, SortBy::Date);
    active.into_iter().skip(skip).take(limit).collect()
}

pub fn count_active(posts: &[Post]) -> usize {
    posts.iter().filter(|p| p.active).count()
}

pub fn stats(posts: &[Post]) -> PostStats {
    let active = count_active(posts);
    PostStats {
        total: posts.len(),
        active,
        inactive: posts.len() - active,
    }
}

/// Case-insensitive title search over active posts in manual order.
/// A blank query matches nothing.
pub fn search_active(posts: Vec<Post>, query: &str, limit: usize) -> Vec<Post> {
    let Some(needle) = normalized(Some(query)) else {
        return Vec::new();
    };

    let mut posts = posts;
    sort_posts(&mut posts, SortBy::Order);
    posts
        .into_iter()
        .filter(|p| p.active && title_matches(p, &needle))
        .take(limit)
        .collect()
}

/// Position assigned to a freshly created post.
pub fn next_order(posts: &[Post]) -> i64 {
    posts.len() as i64
}

/// Rewrite `order` so the listed ids come first, in the given sequence.
///
/// Posts missing from `ids` follow in their previous relative order. Unknown
/// and repeated ids are ignored. The returned vector is in the new order.
pub fn reorder(mut posts: Vec<Post>, ids: &[String]) -> Vec<Post> {
    sort_posts(&mut posts, SortBy::Order);

    let index: HashMap<String, usize> = posts
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();
    let mut slots: Vec<Option<Post>> = posts.into_iter().map(Some).collect();

    let mut ordered = Vec::with_capacity(slots.len());
    for id in ids {
        if let Some(post) = index.get(id).and_then(|&i| slots[i].take()) {
            ordered.push(post);
        }
    }
    ordered.extend(slots.into_iter().flatten());

    for (position, post) in ordered.iter_mut().enumerate() {
        post.order = position as i64;
    }
    ordered
}

fn normalized(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn title_matches(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusFilter;
    use chrono::{Duration, Utc};

    fn post(id: &str, title: &str, order: i64, active: bool, age_minutes: i64) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            image: format!("/images/posts/{id}.png"),
            yt_url: None,
            product_url: format!("https://example.com/{id}"),
            active,
            created_at: Utc::now() - Duration::minutes(age_minutes),
            order,
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    fn abc() -> Vec<Post> {
        vec![
            post("a", "Alpha", 0, true, 30),
            post("b", "Bravo", 1, false, 20),
            post("c", "Charlie", 2, true, 10),
        ]
    }

    #[test]
    fn test_feed_skips_inactive_and_sorts_by_recency() {
        let feed = active_feed(abc(), 0, 10);
        assert_eq!(ids(&feed), vec!["c", "a"]);
    }

    #[test]
    fn test_feed_window() {
        let feed = active_feed(abc(), 1, 10);
        assert_eq!(ids(&feed), vec!["a"]);
        assert!(active_feed(abc(), 5, 10).is_empty());
    }

    #[test]
    fn test_pages_concatenate_to_full_list() {
        let posts: Vec<Post> = (0..23)
            .map(|i| post(&format!("p{i}"), &format!("Post {i:02}"), 22 - i, i % 3 != 0, i))
            .collect();

        for status in [StatusFilter::All, StatusFilter::Active, StatusFilter::Inactive] {
            let full = query_posts(
                posts.clone(),
                &PostQuery {
                    status,
                    ..Default::default()
                },
            );

            let limit = 5;
            let first = query_posts(
                posts.clone(),
                &PostQuery {
                    page: Some(1),
                    limit: Some(limit),
                    status,
                    ..Default::default()
                },
            );
            assert_eq!(first.pages, full.total.div_ceil(limit));

            let mut joined = Vec::new();
            for page in 1..=first.pages {
                let chunk = query_posts(
                    posts.clone(),
                    &PostQuery {
                        page: Some(page),
                        limit: Some(limit),
                        status,
                        ..Default::default()
                    },
                );
                assert_eq!(chunk.total, full.total);
                joined.extend(chunk.posts);
            }
            assert_eq!(joined, full.posts);
        }
    }

    #[test]
    fn test_sort_modes() {
        let by_order = query_posts(abc(), &PostQuery::default());
        assert_eq!(ids(&by_order.posts), vec!["a", "b", "c"]);

        let by_date = query_posts(
            abc(),
            &PostQuery {
                sort_by: SortBy::Date,
                ..Default::default()
            },
        );
        assert_eq!(ids(&by_date.posts), vec!["c", "b", "a"]);

        let mut posts = abc();
        posts[0].title = "zeta".into();
        let by_title = query_posts(
            posts,
            &PostQuery {
                sort_by: SortBy::Title,
                ..Default::default()
            },
        );
        assert_eq!(ids(&by_title.posts), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_search_is_applied_before_paging() {
        let mut posts = abc();
        posts.push(post("d", "Alphabet Blocks", 3, true, 5));

        let page = query_posts(
            posts,
            &PostQuery {
                page: Some(1),
                limit: Some(1),
                search: Some("ALPHA".into()),
                ..Default::default()
            },
        );
        assert_eq!(page.total, 2);
        assert_eq!(page.pages, 2);
        assert_eq!(ids(&page.posts), vec!["a"]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = query_posts(
            abc(),
            &PostQuery {
                page: Some(4),
                limit: Some(2),
                ..Default::default()
            },
        );
        assert!(page.posts.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);
    }

    #[test]
    fn test_search_matches_case_insensitively_and_caps() {
        let mut posts = vec![
            post("buds", "Wireless Earbuds Pro", 0, true, 1),
            post("cable", "USB Cable", 1, true, 1),
        ];
        assert_eq!(ids(&search_active(posts.clone(), "earbud", 10)), vec!["buds"]);

        for i in 0..15 {
            posts.push(post(&format!("e{i}"), &format!("Earbuds v{i}"), 2 + i, true, 1));
        }
        assert_eq!(search_active(posts, "EARBUD", 10).len(), 10);
    }

    #[test]
    fn test_search_ignores_inactive_and_blank_queries() {
        assert!(search_active(abc(), "bravo", 10).is_empty());
        assert!(search_active(abc(), "   ", 10).is_empty());
    }

    #[test]
    fn test_reorder_full_sequence() {
        let reordered = reorder(abc(), &["c".into(), "a".into(), "b".into()]);
        assert_eq!(ids(&reordered), vec!["c", "a", "b"]);
        let orders: Vec<i64> = reordered.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_appends_omitted_posts_in_prior_order() {
        let mut posts = abc();
        posts.push(post("d", "Delta", 3, true, 1));

        let reordered = reorder(posts, &["d".into(), "b".into(), "ghost".into(), "d".into()]);
        assert_eq!(ids(&reordered), vec!["d", "b", "a", "c"]);
        assert_eq!(reordered[3].order, 3);
    }

    #[test]
    fn test_stats() {
        assert_eq!(
            stats(&abc()),
            PostStats {
                total: 3,
                active: 2,
                inactive: 1
            }
        );
        assert_eq!(next_order(&abc()), 3);
    }
}
