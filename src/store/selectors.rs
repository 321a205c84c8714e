//! Read-only projections over [`CatalogState`] used by the presentation side.

use super::state::CatalogState;
use crate::catalog::{CatalogGroup, Product};

pub const PRODUCT_MISSING: &str = "Produto não encontrado";

pub fn products_for(state: &CatalogState, group: CatalogGroup) -> &[Product] {
    match group {
        CatalogGroup::Male => &state.male_products,
        CatalogGroup::Female => &state.female_products,
    }
}

pub fn is_loading(state: &CatalogState) -> bool {
    state.loading
}

pub fn last_error(state: &CatalogState) -> Option<&str> {
    state.error.as_deref()
}

pub fn current_product(state: &CatalogState) -> Option<&Product> {
    state.current_product.as_ref()
}

/// The list only blocks on a spinner before it has anything to show.
pub fn show_list_spinner(state: &CatalogState, group: CatalogGroup) -> bool {
    state.loading && products_for(state, group).is_empty()
}

/// What the product detail screen should render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailView<'a> {
    Loading,
    Failed(&'a str),
    Missing,
    Ready(&'a Product),
}

impl DetailView<'_> {
    /// Message for the non-ready states.
    pub fn message(&self) -> Option<&str> {
        match self {
            DetailView::Loading => None,
            DetailView::Failed(text) => Some(*text),
            DetailView::Missing => Some(PRODUCT_MISSING),
            DetailView::Ready(_) => None,
        }
    }
}

pub fn detail_view(state: &CatalogState) -> DetailView<'_> {
    if state.loading {
        return DetailView::Loading;
    }
    if let Some(err) = last_error(state) {
        return DetailView::Failed(err);
    }
    match current_product(state) {
        Some(p) => DetailView::Ready(p),
        None => DetailView::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::scripted::product;

    #[test]
    fn projections_follow_state() {
        let mut s = CatalogState::default();
        assert!(products_for(&s, CatalogGroup::Male).is_empty());
        assert!(!is_loading(&s));
        assert_eq!(last_error(&s), None);
        assert_eq!(current_product(&s), None);

        s.female_products = vec![product(1, "womens-bags")];
        s.error = Some("boom".into());
        assert_eq!(products_for(&s, CatalogGroup::Female).len(), 1);
        assert!(products_for(&s, CatalogGroup::Male).is_empty());
        assert_eq!(last_error(&s), Some("boom"));
    }

    #[test]
    fn spinner_only_while_group_is_empty() {
        let mut s = CatalogState { loading: true, ..Default::default() };
        assert!(show_list_spinner(&s, CatalogGroup::Male));

        s.male_products = vec![product(1, "mens-shirts")];
        assert!(!show_list_spinner(&s, CatalogGroup::Male));
        assert!(show_list_spinner(&s, CatalogGroup::Female));

        s.loading = false;
        assert!(!show_list_spinner(&s, CatalogGroup::Female));
    }

    #[test]
    fn detail_view_precedence() {
        let mut s = CatalogState::default();
        assert_eq!(detail_view(&s), DetailView::Missing);
        assert_eq!(detail_view(&s).message(), Some("Produto não encontrado"));

        s.current_product = Some(product(3, "mens-shoes"));
        assert!(matches!(detail_view(&s), DetailView::Ready(p) if p.id == 3));

        // A stale product is hidden behind the error of a later failed load.
        s.error = Some("Product with id '4' not found".into());
        assert_eq!(detail_view(&s), DetailView::Failed("Product with id '4' not found"));

        s.loading = true;
        assert_eq!(detail_view(&s), DetailView::Loading);
        assert_eq!(detail_view(&s).message(), None);
    }
}
