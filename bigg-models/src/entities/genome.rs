use sea_orm::entity::prelude::*;

/// A sequenced genome one or more models were built from.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "genome")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// e.g. `ncbi_accession` or `ncbi_assembly`
    pub accession_type: String,
    pub accession_value: String,
    pub organism: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::model::Entity")]
    Model,
}

impl ActiveModelBehavior for ActiveModel {}
