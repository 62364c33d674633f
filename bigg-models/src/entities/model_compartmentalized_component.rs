use sea_orm::entity::prelude::*;

/// A compartmentalized metabolite as one model defines it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "model_compartmentalized_component")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub compartmentalized_component_id: i32,
    pub model_id: i32,
    pub formula: Option<String>,
    pub charge: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::compartmentalized_component::Entity",
        from = "Column::CompartmentalizedComponentId",
        to = "super::compartmentalized_component::Column::Id"
    )]
    CompartmentalizedComponent,

    #[sea_orm(
        belongs_to = "super::model::Entity",
        from = "Column::ModelId",
        to = "super::model::Column::Id"
    )]
    Model,
}

impl Related<super::compartmentalized_component::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompartmentalizedComponent.def()
    }
}

impl Related<super::model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Model.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
