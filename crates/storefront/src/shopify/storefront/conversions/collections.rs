//! Collection type conversion functions.

use prier_core::CollectionId;

use crate::shopify::types::{Collection, CollectionSummary};

use super::super::responses::{CollectionFields, CollectionItemFields};
use super::{convert_image, convert_page_info, convert_product_item};

pub fn convert_collection(collection: CollectionFields) -> Collection {
    Collection {
        id: CollectionId::new(collection.id),
        handle: collection.handle,
        title: collection.title,
        description: collection.description,
        image: collection.image.map(convert_image),
        products: collection
            .products
            .nodes
            .into_iter()
            .map(convert_product_item)
            .collect(),
        page_info: convert_page_info(collection.products.page_info),
    }
}

pub fn convert_collection_item(collection: CollectionItemFields) -> CollectionSummary {
    CollectionSummary {
        id: CollectionId::new(collection.id),
        handle: collection.handle,
        title: collection.title,
        description: collection.description,
        image: collection.image.map(convert_image),
    }
}
