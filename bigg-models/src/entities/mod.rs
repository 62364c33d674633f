//! The subset of the BiGG schema the list views read.

pub mod compartment;
pub mod compartmentalized_component;
pub mod gene;
pub mod genome;
pub mod metabolite;
pub mod model;
pub mod model_compartmentalized_component;
pub mod model_count;
pub mod model_gene;
pub mod model_reaction;
pub mod reaction;
