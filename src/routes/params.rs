use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    Newest,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
    /// Decimal price bounds, converted to cents before filtering.
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// `true` keeps stock > 0, `false` keeps stock == 0.
    pub in_stock: Option<bool>,
    pub sort: Option<ProductSort>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserListQuery {
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct V2ProductQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub category_id: Option<Uuid>,
    pub q: Option<String>,
}

impl V2ProductQuery {
    pub fn normalize_paging(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(20).clamp(1, 100);
        (page, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_and_clamps() {
        let query = V2ProductQuery {
            page: None,
            page_size: None,
            category_id: None,
            q: None,
        };
        assert_eq!(query.normalize_paging(), (1, 20));

        let query = V2ProductQuery {
            page: Some(0),
            page_size: Some(500),
            category_id: None,
            q: None,
        };
        assert_eq!(query.normalize_paging(), (1, 100));

        let query = V2ProductQuery {
            page: Some(3),
            page_size: Some(0),
            category_id: None,
            q: None,
        };
        assert_eq!(query.normalize_paging(), (3, 1));
    }
}
