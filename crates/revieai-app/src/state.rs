//! Application state: the review store plus every UI flag around it.
//!
//! All writes go through the named operations below. The display list is
//! memoized and recomputed only after the reviews, the query or the sort key
//! actually change.

use std::sync::OnceLock;

use revieai_core::{
    AISummaryData, Product, RatingStats, Review, SortKey, filter_and_sort, seed,
};
use revieai_store::{ReviewStore, StoreError};

use crate::summary::SummarySlot;

#[derive(Debug)]
pub struct AppState {
    store: ReviewStore,
    product: Product,
    query: String,
    sort: SortKey,
    merchant_mode: bool,
    form_open: bool,
    summary: SummarySlot,
    display: OnceLock<Vec<Review>>,
}

impl AppState {
    pub fn new(product: Product, store: ReviewStore) -> Self {
        Self {
            store,
            product,
            query: String::new(),
            sort: SortKey::default(),
            merchant_mode: false,
            form_open: false,
            summary: SummarySlot::default(),
            display: OnceLock::new(),
        }
    }

    /// The built-in product and its seed reviews.
    pub fn seeded() -> Self {
        Self::new(seed::mock_product(), ReviewStore::seeded())
    }

    // ── Reads ──

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    pub fn reviews(&self) -> &[Review] {
        self.store.reviews()
    }

    pub fn review_count(&self) -> usize {
        self.store.len()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn merchant_mode(&self) -> bool {
        self.merchant_mode
    }

    pub fn form_open(&self) -> bool {
        self.form_open
    }

    /// Filtered and sorted view of the reviews.
    pub fn display_list(&self) -> &[Review] {
        self.display
            .get_or_init(|| filter_and_sort(self.store.reviews(), &self.query, self.sort))
    }

    pub fn stats(&self) -> RatingStats {
        RatingStats::from_reviews(self.store.reviews())
    }

    pub fn summary(&self) -> Option<&AISummaryData> {
        self.summary.data()
    }

    pub fn summary_loading(&self) -> bool {
        self.summary.loading()
    }

    pub fn summary_slot(&self) -> &SummarySlot {
        &self.summary
    }

    pub fn fresh_id(&self) -> String {
        self.store.fresh_id()
    }

    // ── Writes ──

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.invalidate_display();
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.sort {
            self.sort = sort;
            self.invalidate_display();
        }
    }

    pub fn set_merchant_mode(&mut self, on: bool) {
        self.merchant_mode = on;
    }

    /// Flip merchant mode and return the new value.
    pub fn toggle_merchant_mode(&mut self) -> bool {
        self.merchant_mode = !self.merchant_mode;
        self.merchant_mode
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    pub fn prepend_review(&mut self, review: Review) -> Result<(), StoreError> {
        self.store.prepend(review)?;
        self.invalidate_display();
        Ok(())
    }

    pub fn patch_reply(&mut self, id: &str, reply: String) -> Result<(), StoreError> {
        self.store.attach_reply(id, reply)?;
        self.invalidate_display();
        Ok(())
    }

    /// Summary loading state and result slot.
    pub fn summary_mut(&mut self) -> &mut SummarySlot {
        &mut self.summary
    }

    fn invalidate_display(&mut self) {
        self.display = OnceLock::new();
    }
}
