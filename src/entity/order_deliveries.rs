use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_deliveries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub order_id: i64,
    pub delivery_method_id: i64,
    pub address: String,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id"
    )]
    Orders,
    #[sea_orm(
        belongs_to = "super::delivery_methods::Entity",
        from = "Column::DeliveryMethodId",
        to = "super::delivery_methods::Column::Id"
    )]
    DeliveryMethods,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::delivery_methods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryMethods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
