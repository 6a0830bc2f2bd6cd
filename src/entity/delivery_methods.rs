use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "delivery_methods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_cost: i64,
    pub free_threshold: Option<i64>,
    pub estimated_days: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_deliveries::Entity")]
    OrderDeliveries,
}

impl Related<super::order_deliveries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderDeliveries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
