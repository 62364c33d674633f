use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bigg_models::entities::{
    compartment, compartmentalized_component, gene, genome, metabolite, model,
    model_compartmentalized_component, model_count, model_gene, model_reaction, reaction,
};
use bigg_models::{AppState, router};
use sea_orm::{Database, DatabaseConnection, DbErr, EntityTrait, Schema};
use sea_orm_migration::prelude::*;
use serde_json::Value;
use tower::ServiceExt;

fn get_test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateBiggSchema)]
    }
}

#[derive(DeriveMigrationName)]
pub struct CreateBiggSchema;

#[async_trait::async_trait]
impl MigrationTrait for CreateBiggSchema {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Referenced tables first
        manager.create_table(schema.create_table_from_entity(genome::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(model::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(model_count::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(reaction::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(model_reaction::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(metabolite::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(compartment::Entity)).await?;
        manager
            .create_table(schema.create_table_from_entity(compartmentalized_component::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(model_compartmentalized_component::Entity))
            .await?;
        manager.create_table(schema.create_table_from_entity(gene::Entity)).await?;
        manager.create_table(schema.create_table_from_entity(model_gene::Entity)).await?;
        Ok(())
    }
}

const K12: &str = "Escherichia coli str. K-12 substr. MG1655";

/// Seven models, seven reactions, four metabolites in two compartments, four
/// genes and three genomes (one with no models).
///
/// Gene counts are 137, 1367, 844, 20, 5, 15 and 8, so `">=5&<=10,20"` selects
/// `ecoli_min`, `iMin8` and `iECOLI_K12`.
async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    let genomes = [
        (1, "ncbi_accession", "NC_000913.3", Some(K12)),
        (2, "ncbi_accession", "AL009126.3", Some("Bacillus subtilis subsp. subtilis str. 168")),
        (3, "ncbi_assembly", "GCF_000027325.1", None),
    ];
    genome::Entity::insert_many(genomes.into_iter().map(|(id, kind, value, organism)| {
        genome::ActiveModel::from(genome::Model {
            id,
            accession_type: kind.to_string(),
            accession_value: value.to_string(),
            organism: organism.map(str::to_string),
        })
    }))
    .exec(db)
    .await?;

    // (id, bigg_id, genome, organism, reactions, metabolites, genes)
    let models = [
        (1, "e_coli_core", Some(1), Some(K12), 95, 72, 137),
        (2, "iJO1366", Some(1), Some(K12), 2583, 1805, 1367),
        (3, "iYO844", Some(2), Some("Bacillus subtilis subsp. subtilis str. 168"), 1250, 990, 844),
        (4, "iECOLI_K12", Some(1), Some(K12), 30, 25, 20),
        (5, "ecoli_min", None, None, 10, 8, 5),
        (6, "iTest15", None, Some("Synthetic construct"), 15, 15, 15),
        (7, "iMin8", None, Some("Mycoplasma genitalium"), 9, 9, 8),
    ];
    model::Entity::insert_many(models.iter().map(|&(id, bigg_id, genome_id, organism, ..)| {
        model::ActiveModel::from(model::Model {
            id,
            bigg_id: bigg_id.to_string(),
            genome_id,
            organism: organism.map(str::to_string),
        })
    }))
    .exec(db)
    .await?;
    model_count::Entity::insert_many(models.iter().map(
        |&(id, _, _, _, reaction_count, metabolite_count, gene_count)| {
            model_count::ActiveModel::from(model_count::Model {
                id,
                model_id: id,
                reaction_count,
                metabolite_count,
                gene_count,
            })
        },
    ))
    .exec(db)
    .await?;

    let reactions = [
        (1, "PGI", "Glucose-6-phosphate isomerase", false),
        (2, "PFK", "Phosphofructokinase", false),
        (3, "FBA", "Fructose-bisphosphate aldolase", false),
        (4, "TPI", "Triose-phosphate isomerase", false),
        (5, "GAPD", "Glyceraldehyde-3-phosphate dehydrogenase", false),
        (6, "EX_glc__D_e", "D-Glucose exchange", true),
        (7, "BIOMASS_Ec_iJO1366_core_53p95M", "E. coli biomass objective function", true),
    ];
    reaction::Entity::insert_many(reactions.into_iter().map(|(id, bigg_id, name, pseudo)| {
        reaction::ActiveModel::from(reaction::Model {
            id,
            bigg_id: bigg_id.to_string(),
            name: Some(name.to_string()),
            pseudoreaction: pseudo,
        })
    }))
    .exec(db)
    .await?;

    // (model, reaction, lower, upper, subsystem). e_coli_core carries PGI twice.
    let model_reactions = [
        (1, 1, -1000.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (1, 1, -1000.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (1, 2, 0.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (1, 3, -1000.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (1, 4, -1000.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (1, 5, -1000.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (1, 6, -10.0, 1000.0, "Extracellular exchange"),
        (1, 7, 0.0, 1000.0, "Biomass and maintenance functions"),
        (2, 1, -1000.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (2, 2, 0.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (2, 3, -1000.0, 1000.0, "Glycolysis/Gluconeogenesis"),
        (2, 6, -10.0, 1000.0, "Extracellular exchange"),
        (2, 7, 0.0, 1000.0, "Biomass and maintenance functions"),
        (3, 1, -1000.0, 1000.0, "Glycolysis"),
        (3, 4, -1000.0, 1000.0, "Glycolysis"),
    ];
    model_reaction::Entity::insert_many(model_reactions.into_iter().zip(1..).map(
        |((model_id, reaction_id, lower_bound, upper_bound, subsystem), id)| {
            model_reaction::ActiveModel::from(model_reaction::Model {
                id,
                reaction_id,
                model_id,
                lower_bound,
                upper_bound,
                objective_coefficient: if reaction_id == 7 { 1.0 } else { 0.0 },
                gene_reaction_rule: String::new(),
                subsystem: Some(subsystem.to_string()),
            })
        },
    ))
    .exec(db)
    .await?;

    let metabolites = [
        (1, "g6p", "D-Glucose 6-phosphate"),
        (2, "f6p", "D-Fructose 6-phosphate"),
        (3, "fdp", "D-Fructose 1,6-bisphosphate"),
        (4, "glc__D", "D-Glucose"),
    ];
    metabolite::Entity::insert_many(metabolites.into_iter().map(|(id, bigg_id, name)| {
        metabolite::ActiveModel::from(metabolite::Model {
            id,
            bigg_id: bigg_id.to_string(),
            name: Some(name.to_string()),
        })
    }))
    .exec(db)
    .await?;

    let compartments = [(1, "c", "cytosol"), (2, "e", "extracellular space")];
    compartment::Entity::insert_many(compartments.into_iter().map(|(id, bigg_id, name)| {
        compartment::ActiveModel::from(compartment::Model {
            id,
            bigg_id: bigg_id.to_string(),
            name: Some(name.to_string()),
        })
    }))
    .exec(db)
    .await?;

    // g6p_c, f6p_c, fdp_c, glc__D_c, glc__D_e
    let components = [(1, 1, 1), (2, 2, 1), (3, 3, 1), (4, 4, 1), (5, 4, 2)];
    compartmentalized_component::Entity::insert_many(components.into_iter().map(
        |(id, metabolite_id, compartment_id)| {
            compartmentalized_component::ActiveModel::from(compartmentalized_component::Model {
                id,
                metabolite_id,
                compartment_id,
            })
        },
    ))
    .exec(db)
    .await?;

    // (model, component, formula, charge)
    let model_components = [
        (1, 1, "C6H11O9P", -2),
        (1, 2, "C6H11O9P", -2),
        (1, 3, "C6H10O12P2", -4),
        (1, 4, "C6H12O6", 0),
        (1, 5, "C6H12O6", 0),
        (2, 1, "C6H11O9P", -2),
        (2, 5, "C6H12O6", 0),
        (3, 1, "C6H11O9P", -2),
    ];
    model_compartmentalized_component::Entity::insert_many(model_components.into_iter().zip(1..).map(
        |((model_id, component_id, formula, charge), id)| {
            model_compartmentalized_component::ActiveModel::from(
                model_compartmentalized_component::Model {
                    id,
                    compartmentalized_component_id: component_id,
                    model_id,
                    formula: Some(formula.to_string()),
                    charge: Some(charge),
                },
            )
        },
    ))
    .exec(db)
    .await?;

    let genes = [
        (1, "b4025", "pgi", "b4025"),
        (2, "b3916", "pfkA", "b3916"),
        (3, "b2097", "fbaB", "b2097"),
        (4, "BSU31350", "pgi", "BSU31350"),
    ];
    gene::Entity::insert_many(genes.into_iter().map(|(id, bigg_id, name, locus_tag)| {
        gene::ActiveModel::from(gene::Model {
            id,
            bigg_id: bigg_id.to_string(),
            name: Some(name.to_string()),
            locus_tag: Some(locus_tag.to_string()),
        })
    }))
    .exec(db)
    .await?;

    let model_genes = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (3, 4)];
    model_gene::Entity::insert_many(model_genes.into_iter().zip(1..).map(
        |((model_id, gene_id), id)| {
            model_gene::ActiveModel::from(model_gene::Model { id, gene_id, model_id })
        },
    ))
    .exec(db)
    .await?;

    Ok(())
}

#[allow(dead_code)]
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(&get_test_database_url()).await?;
    Migrator::up(&db, None).await?;
    seed(&db).await?;
    Ok(db)
}

#[allow(dead_code)]
pub async fn setup_test_app() -> Router {
    let db = setup_test_db().await.expect("Failed to setup test database");
    router(AppState::new(db).expect("Failed to build app state"))
}

/// `columns[i][data]` for each identifier, in order.
#[allow(dead_code)]
pub fn column_pairs(identifiers: &[&str]) -> Vec<(String, String)> {
    identifiers
        .iter()
        .enumerate()
        .map(|(index, identifier)| (format!("columns[{index}][data]"), (*identifier).to_string()))
        .collect()
}

#[allow(dead_code)]
pub fn encode<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(key, value)| (key.as_ref(), value.as_ref())))
        .finish()
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET `path` with `pairs` as the query string and parse the JSON body.
#[allow(dead_code)]
pub async fn get_json<K: AsRef<str>, V: AsRef<str>>(
    app: &Router,
    path: &str,
    pairs: &[(K, V)],
) -> (StatusCode, Value) {
    let (status, body) = get(app, &format!("{path}?{}", encode(pairs))).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// POST `pairs` as a urlencoded form and parse the JSON body.
#[allow(dead_code)]
pub async fn post_json<K: AsRef<str>, V: AsRef<str>>(
    app: &Router,
    path: &str,
    pairs: &[(K, V)],
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(encode(pairs)))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// Values of `identifier` across the rows of a list response.
#[allow(dead_code)]
pub fn column_values(body: &Value, identifier: &str) -> Vec<Value> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row[identifier].clone())
        .collect()
}

#[allow(dead_code)]
pub fn strings(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.as_str().unwrap().to_string())
        .collect()
}
