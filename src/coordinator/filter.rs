use crate::models::career::CareerPost;

/// Postings whose title, location and body contain `search` (case-insensitive)
/// and, when a category is selected, whose category matches exactly.
/// Server order is preserved.
pub fn filter_postings(posts: &[CareerPost], search: &str, category: Option<i64>) -> Vec<CareerPost> {
    let needle = search.to_lowercase();
    posts
        .iter()
        .filter(|post| needle.is_empty() || post.search_haystack().contains(&needle))
        .filter(|post| match category {
            Some(id) => post.category_id() == Some(id),
            None => true,
        })
        .cloned()
        .collect()
}
