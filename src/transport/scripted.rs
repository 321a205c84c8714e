use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Transport, TransportError};
use crate::catalog::models::Product;

#[derive(Clone)]
struct Reply {
    delay: Duration,
    result: Result<Value, TransportError>,
    served: bool,
}

/// In-memory transport answering from a per-path script.
///
/// Unscripted paths fail with a 404. Replies can be delayed (use a paused
/// tokio clock) to force a particular completion order.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, Vec<Reply>>>,
    calls: Mutex<Vec<String>>,
}

pub fn product(id: u64, category: &str) -> Product {
    Product {
        id,
        title: format!("product {id}"),
        description: String::new(),
        price: 10.0 * id as f64,
        discount_percentage: 0.0,
        rating: 4.0,
        stock: 5,
        brand: None,
        category: category.to_string(),
        thumbnail: format!("https://cdn.example.com/{id}/thumbnail.png"),
        images: Vec::new(),
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, path: String, delay: Duration, result: Result<Value, TransportError>) {
        self.replies
            .lock()
            .unwrap()
            .entry(path)
            .or_default()
            .push(Reply { delay, result, served: false });
    }

    /// Script one answer for `path`. Answers for the same path are served in
    /// order; the last one repeats until a newer answer is scripted.
    pub fn reply(&self, path: &str, delay: Duration, result: Result<Value, TransportError>) {
        self.push(path.to_string(), delay, result);
    }

    pub fn category(&self, slug: &str, ids: &[u64], delay: Duration) {
        let products: Vec<Product> = ids.iter().map(|id| product(*id, slug)).collect();
        self.push(
            format!("/products/category/{slug}"),
            delay,
            Ok(json!({ "products": products, "total": ids.len(), "skip": 0, "limit": 30 })),
        );
    }

    pub fn category_error(&self, slug: &str, err: TransportError, delay: Duration) {
        self.push(format!("/products/category/{slug}"), delay, Err(err));
    }

    pub fn product(&self, id: u64, delay: Duration) {
        let p = product(id, "mens-shirts");
        self.push(format!("/products/{id}"), delay, Ok(serde_json::to_value(p).unwrap()));
    }

    pub fn product_error(&self, id: u64, err: TransportError, delay: Duration) {
        self.push(format!("/products/{id}"), delay, Err(err));
    }

    /// Paths requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(path.to_string());
        let reply = {
            let mut replies = self.replies.lock().unwrap();
            replies.get_mut(path).and_then(|queue| {
                // A served answer only repeats while nothing newer is queued.
                while queue.len() > 1 && queue[0].served {
                    queue.remove(0);
                }
                let head = queue.first_mut()?;
                head.served = true;
                Some(head.clone())
            })
        };
        let Some(reply) = reply else {
            return Err(TransportError::Remote { status: 404, message: None });
        };
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn served_answer_gives_way_to_newer_script() {
        let t = ScriptedTransport::new();
        t.product(1, Duration::ZERO);
        assert!(t.get("/products/1").await.is_ok());
        assert!(t.get("/products/1").await.is_ok());

        t.product_error(1, TransportError::Network("down".into()), Duration::ZERO);
        assert_eq!(
            t.get("/products/1").await.unwrap_err(),
            TransportError::Network("down".into())
        );
        // The newest answer now repeats.
        assert!(t.get("/products/1").await.is_err());
        assert_eq!(t.calls().len(), 4);
    }
}
