//! GraphQL documents used by the provisioner.
//!
//! Read selections are shared through macros so that mutation payloads and
//! reads decode into the same remote types.

/// A GraphQL document together with the root field its payload lives under.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

macro_rules! user_errors {
    () => {
        "userErrors { field message }"
    };
}

macro_rules! option_fields {
    () => {
        "options { id name position optionValues { name } }"
    };
}

macro_rules! variant_fields {
    () => {
        "id title sku price compareAtPrice barcode taxable inventoryPolicy position \
         createdAt updatedAt selectedOptions { name value } \
         inventoryItem { id measurement { weight { value unit } } } \
         media(first: 1) { edges { node { id } } }"
    };
}

macro_rules! product_fields {
    () => {
        concat!(
            "id title descriptionHtml vendor productType handle tags status createdAt updatedAt ",
            option_fields!(),
            " featuredMedia { id alt mediaContentType ... on MediaImage { image { url } } }",
            " media(first: 250) { edges { node { id alt mediaContentType ... on MediaImage { image { url } } } } }",
            " variants(first: 250) { edges { node { ",
            variant_fields!(),
            " } } }"
        )
    };
}

macro_rules! address_fields {
    () => {
        "firstName lastName address1 address2 city province country zip phone"
    };
}

macro_rules! order_fields {
    () => {
        concat!(
            "id name email note tags currencyCode displayFinancialStatus createdAt updatedAt cancelledAt ",
            "totalPriceSet { shopMoney { amount currencyCode } } ",
            "lineItems(first: 250) { edges { node { id title quantity sku variant { id } ",
            "originalUnitPriceSet { shopMoney { amount currencyCode } } } } } ",
            "shippingAddress { ",
            address_fields!(),
            " } billingAddress { ",
            address_fields!(),
            " }"
        )
    };
}

pub(crate) const PRODUCT: Operation = Operation {
    name: "product",
    document: concat!(
        "query Product($id: ID!) { product(id: $id) { ",
        product_fields!(),
        " } }"
    ),
};

pub(crate) const PRODUCT_OPTIONS: Operation = Operation {
    name: "product",
    document: concat!(
        "query ProductOptions($id: ID!) { product(id: $id) { id ",
        option_fields!(),
        " } }"
    ),
};

pub(crate) const VARIANT_CONTEXT: Operation = Operation {
    name: "productVariant",
    document: concat!(
        "query VariantContext($id: ID!) { productVariant(id: $id) { id product { id ",
        option_fields!(),
        " } } }"
    ),
};

pub(crate) const PRODUCT_CREATE: Operation = Operation {
    name: "productCreate",
    document: concat!(
        "mutation ProductCreate($product: ProductCreateInput!) { productCreate(product: $product) { product { ",
        product_fields!(),
        " } ",
        user_errors!(),
        " } }"
    ),
};

pub(crate) const PRODUCT_UPDATE: Operation = Operation {
    name: "productUpdate",
    document: concat!(
        "mutation ProductUpdate($product: ProductUpdateInput!) { productUpdate(product: $product) { product { id handle updatedAt } ",
        user_errors!(),
        " } }"
    ),
};

pub(crate) const PRODUCT_CREATE_MEDIA: Operation = Operation {
    name: "productCreateMedia",
    document: "mutation ProductCreateMedia($productId: ID!, $media: [CreateMediaInput!]!) { \
               productCreateMedia(productId: $productId, media: $media) { \
               media { id alt mediaContentType status } \
               mediaUserErrors { field message code } } }",
};

pub(crate) const VARIANTS_BULK_CREATE: Operation = Operation {
    name: "productVariantsBulkCreate",
    document: concat!(
        "mutation ProductVariantsBulkCreate($productId: ID!, $variants: [ProductVariantsBulkInput!]!) { ",
        "productVariantsBulkCreate(productId: $productId, variants: $variants) { productVariants { ",
        variant_fields!(),
        " } userErrors { field message code } } }"
    ),
};

pub(crate) const VARIANTS_BULK_UPDATE: Operation = Operation {
    name: "productVariantsBulkUpdate",
    document: concat!(
        "mutation ProductVariantsBulkUpdate($productId: ID!, $variants: [ProductVariantsBulkInput!]!) { ",
        "productVariantsBulkUpdate(productId: $productId, variants: $variants) { productVariants { ",
        variant_fields!(),
        " } userErrors { field message code } } }"
    ),
};

pub(crate) const VARIANTS_BULK_DELETE: Operation = Operation {
    name: "productVariantsBulkDelete",
    document: concat!(
        "mutation ProductVariantsBulkDelete($productId: ID!, $variantsIds: [ID!]!) { ",
        "productVariantsBulkDelete(productId: $productId, variantsIds: $variantsIds) { product { id } ",
        user_errors!(),
        " } }"
    ),
};

pub(crate) const ORDER: Operation = Operation {
    name: "order",
    document: concat!(
        "query Order($id: ID!) { order(id: $id) { ",
        order_fields!(),
        " } }"
    ),
};

pub(crate) const ORDER_CREATE: Operation = Operation {
    name: "orderCreate",
    document: concat!(
        "mutation OrderCreate($order: OrderCreateOrderInput!) { orderCreate(order: $order) { order { ",
        order_fields!(),
        " } ",
        user_errors!(),
        " } }"
    ),
};

pub(crate) const ORDER_UPDATE: Operation = Operation {
    name: "orderUpdate",
    document: concat!(
        "mutation OrderUpdate($input: OrderInput!) { orderUpdate(input: $input) { order { ",
        order_fields!(),
        " } ",
        user_errors!(),
        " } }"
    ),
};

pub(crate) const ORDER_CANCEL: Operation = Operation {
    name: "orderCancel",
    document: "mutation OrderCancel($orderId: ID!, $reason: OrderCancelReason!, $refund: Boolean!, \
               $restock: Boolean!, $notifyCustomer: Boolean, $staffNote: String) { \
               orderCancel(orderId: $orderId, reason: $reason, refund: $refund, restock: $restock, \
               notifyCustomer: $notifyCustomer, staffNote: $staffNote) { \
               job { id done } \
               orderCancelUserErrors { field message code } \
               userErrors { field message } } }",
};

pub(crate) const FULFILLMENT_ORDERS: Operation = Operation {
    name: "order",
    document: "query FulfillmentOrders($id: ID!) { order(id: $id) { id \
               fulfillmentOrders(first: 50) { edges { node { id status } } } } }",
};

pub(crate) const FULFILLMENT_CREATE: Operation = Operation {
    name: "fulfillmentCreate",
    document: concat!(
        "mutation FulfillmentCreate($fulfillment: FulfillmentInput!) { ",
        "fulfillmentCreate(fulfillment: $fulfillment) { fulfillment { id status } ",
        user_errors!(),
        " } }"
    ),
};

pub(crate) const METAFIELDS_SET: Operation = Operation {
    name: "metafieldsSet",
    document: "mutation MetafieldsSet($metafields: [MetafieldsSetInput!]!) { \
               metafieldsSet(metafields: $metafields) { \
               metafields { id namespace key value type createdAt updatedAt } \
               userErrors { field message code } } }",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_select_payload_fields() {
        assert!(PRODUCT_CREATE.document.contains("productCreate(product: $product)"));
        assert!(PRODUCT_CREATE.document.contains("optionValues { name }"));
        assert!(PRODUCT_CREATE.document.contains("variants(first: 250)"));
        assert!(ORDER_CANCEL.document.contains("orderCancelUserErrors"));
        assert!(ORDER_UPDATE.document.contains("shippingAddress { firstName"));
        assert!(VARIANTS_BULK_DELETE.document.contains("$variantsIds: [ID!]!"));
    }

    #[test]
    fn test_braces_balance() {
        for operation in [
            PRODUCT,
            PRODUCT_OPTIONS,
            VARIANT_CONTEXT,
            PRODUCT_CREATE,
            PRODUCT_UPDATE,
            PRODUCT_CREATE_MEDIA,
            VARIANTS_BULK_CREATE,
            VARIANTS_BULK_UPDATE,
            VARIANTS_BULK_DELETE,
            ORDER,
            ORDER_CREATE,
            ORDER_UPDATE,
            ORDER_CANCEL,
            FULFILLMENT_ORDERS,
            FULFILLMENT_CREATE,
            METAFIELDS_SET,
        ] {
            let opens = operation.document.matches('{').count();
            let closes = operation.document.matches('}').count();
            assert_eq!(opens, closes, "unbalanced braces in {}", operation.name);
        }
    }
}
