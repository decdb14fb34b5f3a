pub mod parameter;
pub mod gene_consumer;
pub mod configuration;
pub mod parameter_space;
pub mod description;

pub use parameter::{Domain, Parameter, ParameterKind};
pub use gene_consumer::GeneConsumer;
pub use configuration::Configuration;
pub use parameter_space::ParameterSpace;
pub use description::{ParameterDescription, SpaceDescription};
