// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only views for the public site.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use vouch_core::types::{Testimonial, TestimonialFilter, TestimonialType};
use vouch_core::{TestimonialRepository, VouchError};

use crate::ordering::display_order;
use crate::tags::TagCatalog;

/// Upper bound on a single page, whatever the caller asks for.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Filter and paging parameters for the public listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicQuery {
    pub testimonial_type: Option<TestimonialType>,
    pub tags: Vec<String>,
    pub offset: usize,
    /// `None` (or zero) uses the configured page size.
    pub limit: Option<usize>,
}

/// One slice of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<Testimonial>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl Page {
    pub fn empty(offset: usize, limit: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            offset,
            limit,
            has_more: false,
        }
    }
}

/// True when `t` has the given type (if any) and at least one of `tags`
/// (if any).
pub fn matches_type_and_tags(
    t: &Testimonial,
    testimonial_type: Option<TestimonialType>,
    tags: &[String],
) -> bool {
    testimonial_type.is_none_or(|kind| t.testimonial_type == kind)
        && (tags.is_empty() || t.tags.iter().any(|tag| tags.contains(tag)))
}

#[derive(Clone)]
pub struct PublicReadSurface {
    repo: Arc<dyn TestimonialRepository>,
    page_size: usize,
}

impl PublicReadSurface {
    pub fn new(repo: Arc<dyn TestimonialRepository>, page_size: usize) -> Self {
        Self {
            repo,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Active testimonials in display order.
    pub async fn list_active_ordered(&self) -> Result<Vec<Testimonial>, VouchError> {
        self.list(TestimonialFilter::active()).await
    }

    /// Active and featured testimonials in display order.
    pub async fn list_featured(&self) -> Result<Vec<Testimonial>, VouchError> {
        self.list(TestimonialFilter::featured()).await
    }

    /// Active testimonials narrowed by type and any-of tags.
    pub async fn filter_by_type_and_tags(
        &self,
        testimonial_type: Option<TestimonialType>,
        tags: &[String],
    ) -> Result<Vec<Testimonial>, VouchError> {
        let rows = self.list_active_ordered().await?;
        Ok(rows
            .into_iter()
            .filter(|t| matches_type_and_tags(t, testimonial_type, tags))
            .collect())
    }

    /// A filtered page for the "load more" listing.
    pub async fn page(&self, query: &PublicQuery) -> Result<Page, VouchError> {
        let limit = self.effective_limit(query.limit);
        let rows = self
            .filter_by_type_and_tags(query.testimonial_type, &query.tags)
            .await?;
        let total = rows.len();
        let items: Vec<Testimonial> = rows.into_iter().skip(query.offset).take(limit).collect();
        let has_more = query.offset.saturating_add(items.len()) < total;
        Ok(Page {
            items,
            total,
            offset: query.offset,
            limit,
            has_more,
        })
    }

    /// Engagement-type tags present on active testimonials, sorted.
    pub async fn available_engagement_types(
        &self,
        catalog: &TagCatalog,
    ) -> Result<Vec<String>, VouchError> {
        let rows = self.list_active_ordered().await?;
        let found: BTreeSet<String> = rows
            .iter()
            .flat_map(|t| t.tags.iter())
            .filter(|tag| catalog.is_engagement_type(tag))
            .cloned()
            .collect();
        Ok(found.into_iter().collect())
    }

    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|l| *l > 0)
            .unwrap_or(self.page_size)
            .min(MAX_PAGE_LIMIT)
    }

    async fn list(&self, filter: TestimonialFilter) -> Result<Vec<Testimonial>, VouchError> {
        let mut rows = self.repo.list_testimonials(filter).await?;
        rows.sort_by(display_order);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_core::types::TestimonialPatch;
    use vouch_test_utils::MemoryRepository;

    async fn put(
        repo: &MemoryRepository,
        id: &str,
        position: i64,
        kind: TestimonialType,
        tags: &[&str],
        active: bool,
        featured: bool,
    ) {
        let mut t = repo.seed(id, position).await;
        t.testimonial_type = kind;
        t.tags = tags.iter().map(|s| s.to_string()).collect();
        t.is_active = active;
        t.featured = featured;
        repo.put(t).await;
    }

    async fn fixture() -> (PublicReadSurface, MemoryRepository) {
        use TestimonialType::*;
        let repo = MemoryRepository::new();
        put(&repo, "a", 1, Client, &["Keynote Speaking"], true, true).await;
        put(&repo, "b", 2, CharacterWitness, &["AI Fluency"], true, false).await;
        put(&repo, "c", 3, Client, &["Workshop Facilitation", "AI Fluency"], false, true).await;
        put(&repo, "d", 4, Client, &["Executive Coaching"], true, false).await;
        put(&repo, "e", 5, Client, &[], true, true).await;
        (PublicReadSurface::new(Arc::new(repo.clone()), 2), repo)
    }

    fn ids(rows: &[Testimonial]) -> Vec<&str> {
        rows.iter().map(|t| t.id.as_str()).collect()
    }

    fn tags(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn active_list_hides_inactive_and_keeps_order() {
        let (surface, _repo) = fixture().await;
        let rows = surface.list_active_ordered().await.unwrap();
        assert_eq!(ids(&rows), vec!["a", "b", "d", "e"]);
    }

    #[tokio::test]
    async fn featured_requires_active() {
        let (surface, _repo) = fixture().await;
        let rows = surface.list_featured().await.unwrap();
        assert_eq!(ids(&rows), vec!["a", "e"]);
    }

    #[tokio::test]
    async fn type_and_tags_filters_compose() {
        let (surface, _repo) = fixture().await;

        let all = surface.filter_by_type_and_tags(None, &[]).await.unwrap();
        assert_eq!(ids(&all), vec!["a", "b", "d", "e"]);

        let clients = surface
            .filter_by_type_and_tags(Some(TestimonialType::Client), &[])
            .await
            .unwrap();
        assert_eq!(ids(&clients), vec!["a", "d", "e"]);

        let any_of = surface
            .filter_by_type_and_tags(None, &tags(&["AI Fluency", "Executive Coaching"]))
            .await
            .unwrap();
        assert_eq!(ids(&any_of), vec!["b", "d"]);

        let both = surface
            .filter_by_type_and_tags(Some(TestimonialType::Client), &tags(&["AI Fluency"]))
            .await
            .unwrap();
        assert!(both.is_empty());
    }

    #[tokio::test]
    async fn any_of_tag_filter_keeps_records_with_the_tag() {
        use TestimonialType::Client;
        let repo = MemoryRepository::new();
        put(&repo, "first", 1, Client, &["A"], true, false).await;
        put(&repo, "second", 2, Client, &["B"], true, false).await;
        put(&repo, "third", 3, Client, &["A", "B"], true, false).await;
        put(&repo, "fourth", 4, Client, &[], true, false).await;
        let surface = PublicReadSurface::new(Arc::new(repo), 10);

        let rows = surface
            .filter_by_type_and_tags(None, &tags(&["A"]))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec!["first", "third"]);
    }

    #[tokio::test]
    async fn pages_slice_the_filtered_list() {
        let (surface, _repo) = fixture().await;
        let first = surface.page(&PublicQuery::default()).await.unwrap();
        assert_eq!(ids(&first.items), vec!["a", "b"]);
        assert_eq!((first.total, first.limit, first.has_more), (4, 2, true));

        let last = surface
            .page(&PublicQuery {
                offset: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&last.items), vec!["d", "e"]);
        assert!(!last.has_more);

        let beyond = surface
            .page(&PublicQuery {
                offset: 10,
                limit: Some(5),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.limit, 5);
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let (surface, _repo) = fixture().await;
        assert_eq!(surface.effective_limit(Some(0)), 2);
        assert_eq!(surface.effective_limit(Some(1_000)), MAX_PAGE_LIMIT);
    }

    #[tokio::test]
    async fn engagement_types_come_from_active_rows_only() {
        let (surface, _repo) = fixture().await;
        let types = surface
            .available_engagement_types(&TagCatalog::default())
            .await
            .unwrap();
        // "Workshop Facilitation" only appears on the inactive record.
        assert_eq!(types, tags(&["Executive Coaching", "Keynote Speaking"]));
    }

    #[tokio::test]
    async fn reads_never_write() {
        let (surface, repo) = fixture().await;
        surface.page(&PublicQuery::default()).await.unwrap();
        surface.list_featured().await.unwrap();
        assert_eq!(repo.apply_calls(), 0);
    }

    #[tokio::test]
    async fn featured_cap_is_not_reapplied_on_read() {
        let repo = MemoryRepository::new();
        for i in 0..7 {
            let t = repo.seed(&format!("f{i}"), i + 1).await;
            repo.update_testimonial(
                &t.id,
                &TestimonialPatch {
                    featured: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }
        let surface = PublicReadSurface::new(Arc::new(repo), 8);
        assert_eq!(surface.list_featured().await.unwrap().len(), 7);
    }
}
