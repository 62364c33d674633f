use sea_orm::entity::prelude::*;

/// A universal metabolite, independent of compartment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "metabolite")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
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
