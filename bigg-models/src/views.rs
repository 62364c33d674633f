//! The list views the site serves, and the scopes that restrict the
//! model-specific ones to a single model.

use bigg_tables::{
    Aggregation, ColumnDescriptor, JoinStep, ListScope, ListView, ViewRegistry,
    core::RegistryError,
};
use sea_orm::{ColumnTrait, Order, RelationDef, RelationTrait};

use crate::entities::{
    compartment, compartmentalized_component, gene, genome, metabolite, model,
    model_compartmentalized_component, model_count, model_gene, model_reaction, reaction,
};

pub const MODELS: &str = "models";
pub const UNIVERSAL_REACTIONS: &str = "universal_reactions";
pub const UNIVERSAL_METABOLITES: &str = "universal_metabolites";
pub const GENES: &str = "genes";
pub const GENOMES: &str = "genomes";
pub const MODEL_REACTIONS: &str = "model_reactions";
pub const MODEL_METABOLITES: &str = "model_metabolites";
pub const MODEL_GENES: &str = "model_genes";

/// Builds the scope of a model-specific view from the model's primary key.
pub type ModelScope = fn(i32) -> ListScope;

// Relationship hops, named by the table they reach.
fn model_to_count() -> RelationDef {
    model::Relation::ModelCount.def()
}

fn genome_to_model() -> RelationDef {
    genome::Relation::Model.def()
}

fn reaction_to_model_reaction() -> RelationDef {
    reaction::Relation::ModelReaction.def()
}

fn model_reaction_to_model() -> RelationDef {
    model_reaction::Relation::Model.def()
}

fn metabolite_to_compartmentalized() -> RelationDef {
    metabolite::Relation::CompartmentalizedComponent.def()
}

fn compartmentalized_to_compartment() -> RelationDef {
    compartmentalized_component::Relation::Compartment.def()
}

fn compartmentalized_to_model_component() -> RelationDef {
    compartmentalized_component::Relation::ModelCompartmentalizedComponent.def()
}

fn model_component_to_model() -> RelationDef {
    model_compartmentalized_component::Relation::Model.def()
}

fn gene_to_model_gene() -> RelationDef {
    gene::Relation::ModelGene.def()
}

fn model_gene_to_model() -> RelationDef {
    model_gene::Relation::Model.def()
}

fn models() -> ListView<model::Entity> {
    let count = || JoinStep::left("model_count", model_to_count);
    ListView::new(MODELS, "Models")
        .column(
            ColumnDescriptor::for_column(model::Column::BiggId, "BiGG ID")
                .link("/models/{{ model__bigg_id|urlencode }}")
                .priority(1),
        )
        .column(ColumnDescriptor::for_column(model::Column::Organism, "Organism").priority(2))
        .column(
            ColumnDescriptor::for_column(model_count::Column::MetaboliteCount, "Metabolites")
                .join(count())
                .number(),
        )
        .column(
            ColumnDescriptor::for_column(model_count::Column::ReactionCount, "Reactions")
                .join(count())
                .number(),
        )
        .column(
            ColumnDescriptor::for_column(model_count::Column::GeneCount, "Genes")
                .join(count())
                .number(),
        )
        .sorted_by("model__bigg_id", Order::Asc)
}

fn universal_reactions() -> ListView<reaction::Entity> {
    ListView::new(UNIVERSAL_REACTIONS, "Universal reactions")
        .column(
            ColumnDescriptor::for_column(reaction::Column::BiggId, "BiGG ID")
                .link("/universal/reactions/{{ reaction__bigg_id|urlencode }}")
                .priority(1),
        )
        .column(ColumnDescriptor::for_column(reaction::Column::Name, "Name").priority(2))
        .column(
            ColumnDescriptor::for_column(reaction::Column::Pseudoreaction, "Pseudoreaction")
                .boolean()
                .global(false),
        )
        .column(
            ColumnDescriptor::new("reaction__model_count", "Models", model_reaction::Column::ModelId)
                .join(JoinStep::left("model_reaction", reaction_to_model_reaction))
                .number()
                .aggregate(Aggregation::CountDistinct),
        )
        .group_by(reaction::Column::Id)
        .sorted_by("reaction__bigg_id", Order::Asc)
}

fn universal_metabolites() -> ListView<metabolite::Entity> {
    ListView::new(UNIVERSAL_METABOLITES, "Universal metabolites")
        .column(
            ColumnDescriptor::for_column(metabolite::Column::BiggId, "BiGG ID")
                .link("/universal/metabolites/{{ metabolite__bigg_id|urlencode }}")
                .priority(1),
        )
        .column(ColumnDescriptor::for_column(metabolite::Column::Name, "Name").priority(2))
        .column(
            ColumnDescriptor::new(
                "metabolite__model_count",
                "Models",
                model_compartmentalized_component::Column::ModelId,
            )
            .joins([
                JoinStep::left("compartmentalized_component", metabolite_to_compartmentalized),
                JoinStep::left(
                    "model_compartmentalized_component",
                    compartmentalized_to_model_component,
                ),
            ])
            .number()
            .aggregate(Aggregation::CountDistinct),
        )
        .group_by(metabolite::Column::Id)
        .sorted_by("metabolite__bigg_id", Order::Asc)
}

fn genes() -> ListView<gene::Entity> {
    ListView::new(GENES, "Genes")
        .column(ColumnDescriptor::for_column(gene::Column::BiggId, "BiGG ID").priority(1))
        .column(ColumnDescriptor::for_column(gene::Column::Name, "Name").priority(2))
        .column(ColumnDescriptor::for_column(gene::Column::LocusTag, "Locus tag"))
        .column(
            ColumnDescriptor::new("gene__model_count", "Models", model_gene::Column::ModelId)
                .join(JoinStep::left("model_gene", gene_to_model_gene))
                .number()
                .aggregate(Aggregation::CountDistinct),
        )
        .group_by(gene::Column::Id)
        .sorted_by("gene__bigg_id", Order::Asc)
}

fn genomes() -> ListView<genome::Entity> {
    ListView::new(GENOMES, "Genomes")
        .column(
            ColumnDescriptor::for_column(genome::Column::AccessionValue, "Accession")
                .link("/genomes/{{ genome__accession_type|urlencode }}:{{ genome__accession_value|urlencode }}")
                .priority(1),
        )
        .column(ColumnDescriptor::for_column(genome::Column::AccessionType, "Accession type"))
        .column(ColumnDescriptor::for_column(genome::Column::Organism, "Organism").priority(2))
        .column(
            ColumnDescriptor::new("genome__model_count", "Models", model::Column::Id)
                .join(JoinStep::left("model", genome_to_model))
                .number()
                .aggregate(Aggregation::Count),
        )
        .group_by(genome::Column::Id)
        .sorted_by("genome__accession_value", Order::Asc)
}

fn model_reactions() -> ListView<reaction::Entity> {
    let to_model_reaction = || JoinStep::left("model_reaction", reaction_to_model_reaction);
    ListView::new(MODEL_REACTIONS, "Reactions in model")
        .column(
            ColumnDescriptor::for_column(reaction::Column::BiggId, "BiGG ID")
                .link(
                    "/models/{{ model__bigg_id|urlencode }}/reactions/{{ reaction__bigg_id|urlencode }}",
                )
                .priority(1),
        )
        .column(ColumnDescriptor::for_column(reaction::Column::Name, "Name").priority(2))
        .column(
            ColumnDescriptor::for_column(model::Column::BiggId, "Model")
                .joins([
                    to_model_reaction(),
                    JoinStep::left("model", model_reaction_to_model),
                ])
                .global(false),
        )
        .column(
            ColumnDescriptor::for_column(model_reaction::Column::Subsystem, "Subsystem")
                .join(to_model_reaction()),
        )
        .column(
            ColumnDescriptor::for_column(model_reaction::Column::LowerBound, "Lower bound")
                .join(to_model_reaction())
                .number(),
        )
        .column(
            ColumnDescriptor::for_column(model_reaction::Column::UpperBound, "Upper bound")
                .join(to_model_reaction())
                .number(),
        )
        .tie_break(model_reaction::Column::Id, [to_model_reaction()])
        .sorted_by("reaction__bigg_id", Order::Asc)
}

fn model_metabolites() -> ListView<metabolite::Entity> {
    let to_component = || {
        JoinStep::left("compartmentalized_component", metabolite_to_compartmentalized)
    };
    let to_model_component = || {
        JoinStep::left(
            "model_compartmentalized_component",
            compartmentalized_to_model_component,
        )
    };
    ListView::new(MODEL_METABOLITES, "Metabolites in model")
        .column(
            ColumnDescriptor::for_column(metabolite::Column::BiggId, "BiGG ID")
                .link(
                    "/models/{{ model__bigg_id|urlencode }}/metabolites/{{ metabolite__bigg_id|urlencode }}_{{ compartment__bigg_id|urlencode }}",
                )
                .priority(1),
        )
        .column(ColumnDescriptor::for_column(metabolite::Column::Name, "Name").priority(2))
        .column(
            ColumnDescriptor::for_column(compartment::Column::BiggId, "Compartment")
                .joins([
                    to_component(),
                    JoinStep::left("compartment", compartmentalized_to_compartment),
                ]),
        )
        .column(
            ColumnDescriptor::for_column(model::Column::BiggId, "Model")
                .joins([
                    to_component(),
                    to_model_component(),
                    JoinStep::left("model", model_component_to_model),
                ])
                .global(false),
        )
        .column(
            ColumnDescriptor::for_column(
                model_compartmentalized_component::Column::Formula,
                "Formula",
            )
            .joins([to_component(), to_model_component()]),
        )
        .column(
            ColumnDescriptor::for_column(model_compartmentalized_component::Column::Charge, "Charge")
                .joins([to_component(), to_model_component()])
                .number(),
        )
        .tie_break(
            model_compartmentalized_component::Column::Id,
            [to_component(), to_model_component()],
        )
        .sorted_by("metabolite__bigg_id", Order::Asc)
}

fn model_genes() -> ListView<gene::Entity> {
    ListView::new(MODEL_GENES, "Genes in model")
        .column(
            ColumnDescriptor::for_column(gene::Column::BiggId, "BiGG ID")
                .link("/models/{{ model__bigg_id|urlencode }}/genes/{{ gene__bigg_id|urlencode }}")
                .priority(1),
        )
        .column(ColumnDescriptor::for_column(gene::Column::Name, "Name").priority(2))
        .column(ColumnDescriptor::for_column(gene::Column::LocusTag, "Locus tag"))
        .column(
            ColumnDescriptor::for_column(model::Column::BiggId, "Model")
                .joins([
                    JoinStep::left("model_gene", gene_to_model_gene),
                    JoinStep::left("model", model_gene_to_model),
                ])
                .global(false),
        )
        .tie_break(
            model_gene::Column::Id,
            [JoinStep::left("model_gene", gene_to_model_gene)],
        )
        .sorted_by("gene__bigg_id", Order::Asc)
}

/// Rows of `model_reactions` that belong to model `model_id`.
#[must_use]
pub fn model_reactions_scope(model_id: i32) -> ListScope {
    ListScope::default().join(
        JoinStep::inner("model_reaction", reaction_to_model_reaction)
            .on(model_reaction::Column::ModelId.eq(model_id)),
    )
}

/// Rows of `model_metabolites` that belong to model `model_id`.
#[must_use]
pub fn model_metabolites_scope(model_id: i32) -> ListScope {
    ListScope::default()
        .join(JoinStep::inner(
            "compartmentalized_component",
            metabolite_to_compartmentalized,
        ))
        .join(
            JoinStep::inner(
                "model_compartmentalized_component",
                compartmentalized_to_model_component,
            )
            .on(model_compartmentalized_component::Column::ModelId.eq(model_id)),
        )
}

/// Rows of `model_genes` that belong to model `model_id`.
#[must_use]
pub fn model_genes_scope(model_id: i32) -> ListScope {
    ListScope::default().join(
        JoinStep::inner("model_gene", gene_to_model_gene).on(model_gene::Column::ModelId.eq(model_id)),
    )
}

/// Every view, validated.
///
/// # Errors
///
/// Returns the first [`RegistryError`] a view declaration produces.
pub fn registry() -> Result<ViewRegistry, RegistryError> {
    ViewRegistry::builder()
        .register(models())
        .register(universal_reactions())
        .register(universal_metabolites())
        .register(genes())
        .register(genomes())
        .register(model_reactions())
        .register(model_metabolites())
        .register(model_genes())
        .build()
}

/// View behind a `search_type` value on the search page.
#[must_use]
pub fn search_view(search_type: &str) -> Option<&'static str> {
    match search_type {
        "models" => Some(MODELS),
        "reactions" => Some(UNIVERSAL_REACTIONS),
        "metabolites" => Some(UNIVERSAL_METABOLITES),
        "genes" => Some(GENES),
        "genomes" => Some(GENOMES),
        _ => None,
    }
}
