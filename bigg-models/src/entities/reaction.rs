use sea_orm::entity::prelude::*;

/// A universal reaction, shared by every model that contains it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub bigg_id: String,
    pub name: Option<String>,
    /// Exchange, demand, sink and biomass reactions
    pub pseudoreaction: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::model_reaction::Entity")]
    ModelReaction,
}

impl ActiveModelBehavior for ActiveModel {}
