use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "characteristic_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub unit: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_characteristics::Entity")]
    ProductCharacteristics,
}

impl Related<super::product_characteristics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCharacteristics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
