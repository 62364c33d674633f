use sea_orm::entity::prelude::*;

/// A metabolite placed in a compartment, e.g. `g6p_c`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "compartmentalized_component")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub metabolite_id: i32,
    pub compartment_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::metabolite::Entity",
        from = "Column::MetaboliteId",
        to = "super::metabolite::Column::Id"
    )]
    Metabolite,

    #[sea_orm(
        belongs_to = "super::compartment::Entity",
        from = "Column::CompartmentId",
        to = "super::compartment::Column::Id"
    )]
    Compartment,

    #[sea_orm(has_many = "super::model_compartmentalized_component::Entity")]
    ModelCompartmentalizedComponent,
}

impl Related<super::metabolite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Metabolite.def()
    }
}

impl Related<super::compartment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Compartment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
