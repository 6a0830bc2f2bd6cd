use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_characteristics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub characteristic_type_id: i64,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::characteristic_types::Entity",
        from = "Column::CharacteristicTypeId",
        to = "super::characteristic_types::Column::Id"
    )]
    CharacteristicType,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::characteristic_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CharacteristicType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
