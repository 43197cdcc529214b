// Library interface for turismo-bogota
// This allows integration tests and benches to access internal modules

pub mod config;
pub mod data;
pub mod errors;
pub mod localidades;
pub mod profile;
pub mod questionnaire;
pub mod recommendations;
pub mod routing;
pub mod writer;

// Re-export commonly used types
pub use data::{DashboardData, DataPaths};
pub use errors::TurismoError;
pub use profile::{ProfileGroup, ProfileModel, ScoringModel};
pub use questionnaire::{
    ChoiceQuestion, FormState, FormValidator, NumericQuestion, QuestionnaireSession, ViewState,
};
pub use recommendations::RecommendationTable;
pub use routing::Route;
