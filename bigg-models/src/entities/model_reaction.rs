use sea_orm::entity::prelude::*;

/// A reaction as it appears in one model, with that model's bounds.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "model_reaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reaction_id: i32,
    pub model_id: i32,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub objective_coefficient: f64,
    pub gene_reaction_rule: String,
    pub subsystem: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reaction::Entity",
        from = "Column::ReactionId",
        to = "super::reaction::Column::Id"
    )]
    Reaction,

    #[sea_orm(
        belongs_to = "super::model::Entity",
        from = "Column::ModelId",
        to = "super::model::Column::Id"
    )]
    Model,
}

impl Related<super::reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reaction.def()
    }
}

impl Related<super::model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Model.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
