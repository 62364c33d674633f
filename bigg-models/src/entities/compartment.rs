use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "compartment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Short code such as `c` or `e`
    #[sea_orm(unique)]
    pub bigg_id: String,
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::compartmentalized_component::Entity")]
    CompartmentalizedComponent,
}

impl ActiveModelBehavior for ActiveModel {}
