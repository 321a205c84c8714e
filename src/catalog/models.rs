use serde::{Deserialize, Serialize};

/// One catalog item as served by the remote REST catalog.
///
/// The payload is camelCase on the wire; fields the catalog adds beyond these
/// (reviews, dimensions, tags, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Price after applying `discount_percentage`.
    pub fn discounted_price(&self) -> f64 {
        self.price * (1.0 - self.discount_percentage / 100.0)
    }

    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// e.g. `-12%`
    pub fn discount_label(&self) -> String {
        format!("-{:.0}%", self.discount_percentage)
    }

    /// Brand when the catalog sent a non-empty one.
    pub fn brand_label(&self) -> Option<&str> {
        self.brand.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }
}

/// Renders an amount with the storefront currency label.
pub fn format_price(value: f64) -> String {
    format!("R$ {value:.2}")
}

/// Envelope returned by `/products/category/{slug}`.
///
/// Only `products` is consumed; the paging counters are kept for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Product {
        serde_json::from_value(json!({
            "id": 7,
            "title": "Blue & Black Check Shirt",
            "description": "A stylish check shirt",
            "price": 29.99,
            "discountPercentage": 15.35,
            "rating": 3.64,
            "stock": 38,
            "brand": "Fashion Trends",
            "category": "mens-shirts",
            "thumbnail": "https://cdn.example.com/7/thumbnail.png",
            "images": ["https://cdn.example.com/7/1.png", "https://cdn.example.com/7/2.png"],
            "tags": ["clothing"],
            "reviews": []
        }))
        .unwrap()
    }

    #[test]
    fn decodes_camel_case_payload_and_ignores_extra_fields() {
        let p = sample();
        assert_eq!(p.id, 7);
        assert_eq!(p.discount_percentage, 15.35);
        assert_eq!(p.category, "mens-shirts");
        assert_eq!(p.images.len(), 2);
        assert_eq!(p.brand_label(), Some("Fashion Trends"));
    }

    #[test]
    fn missing_or_blank_brand_has_no_label() {
        let mut p: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Bag",
            "price": 10.0
        }))
        .unwrap();
        assert_eq!(p.brand, None);
        assert!(p.images.is_empty());
        assert_eq!(p.brand_label(), None);

        p.brand = Some("  ".into());
        assert_eq!(p.brand_label(), None);
    }

    #[test]
    fn discount_helpers() {
        let p = sample();
        assert!(p.has_discount());
        assert_eq!(p.discount_label(), "-15%");
        assert_eq!(format_price(p.discounted_price()), "R$ 25.39");
        assert_eq!(format_price(p.price), "R$ 29.99");
    }

    #[test]
    fn page_counters_default_to_zero() {
        let page: CategoryPage = serde_json::from_value(json!({ "products": [] })).unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.limit, 0);
    }
}
