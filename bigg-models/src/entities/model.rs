use sea_orm::entity::prelude::*;

/// A genome-scale metabolic model, e.g. `iJO1366`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "model")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub bigg_id: String,
    pub genome_id: Option<i32>,
    pub organism: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::genome::Entity",
        from = "Column::GenomeId",
        to = "super::genome::Column::Id"
    )]
    Genome,

    #[sea_orm(has_many = "super::model_count::Entity")]
    ModelCount,

    #[sea_orm(has_many = "super::model_reaction::Entity")]
    ModelReaction,

    #[sea_orm(has_many = "super::model_gene::Entity")]
    ModelGene,

    #[sea_orm(has_many = "super::model_compartmentalized_component::Entity")]
    ModelCompartmentalizedComponent,
}

impl Related<super::genome::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genome.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
