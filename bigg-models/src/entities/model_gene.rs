use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "model_gene")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gene_id: i32,
    pub model_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gene::Entity",
        from = "Column::GeneId",
        to = "super::gene::Column::Id"
    )]
    Gene,

    #[sea_orm(
        belongs_to = "super::model::Entity",
        from = "Column::ModelId",
        to = "super::model::Column::Id"
    )]
    Model,
}

impl Related<super::gene::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gene.def()
    }
}

impl Related<super::model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Model.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
