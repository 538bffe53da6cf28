use common::{OrderOrigin, PurchaseOrderStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A line of a purchase order. Stored as a JSON array on the order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub user_id: String,

    #[sea_orm(unique)]
    pub order_number: String,

    pub supplier_id: Option<String>,

    pub supplier_name: String,

    #[sea_orm(indexed)]
    pub status: PurchaseOrderStatus,

    pub order_date: DateTimeUtc,

    pub expected_delivery: Option<Date>,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_amount: Decimal,

    /// Order lines stored as JSON array of {product_id, product_name, quantity} objects.
    #[sea_orm(column_type = "JsonBinary")]
    pub items: serde_json::Value,

    pub created_by: OrderOrigin,

    pub approved_by: Option<String>,

    pub approval_required: bool,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
