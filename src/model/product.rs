use std::collections::HashMap;

use crate::constant::shipping::{
    METADATA_DIMENSION_FIELDS, METADATA_TARIFF_NUMBER, PRODUCT_TYPE_GOOD,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ProductKind {
    Good,
    Other,
}

impl From<&str> for ProductKind {
    fn from(value: &str) -> Self {
        if value == PRODUCT_TYPE_GOOD {
            Self::Good
        } else {
            Self::Other
        }
    }
}

/// product snapshot loaded from the catalog service, all the dimension
/// attributes are kept in `metadata` as numeric strings
#[derive(Debug, Clone)]
pub struct ProductModel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ProductKind,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct OrderLineModel {
    pub product: ProductModel,
    pub quantity: u32,
}

impl ProductModel {
    pub fn missing_dimension_fields(&self) -> Vec<&'static str> {
        METADATA_DIMENSION_FIELDS
            .into_iter()
            .filter(|k| !self.metadata.contains_key(*k))
            .collect()
    }

    pub fn hs_tariff_number(&self) -> Option<String> {
        self.metadata.get(METADATA_TARIFF_NUMBER).cloned()
    }
}
