use thiserror::Error;

/// Failures from the lookup flow. The `Display` impl is the user-facing
/// message, in the widget's locale; everything surfaces to the user through
/// the error region as one of these strings.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Rejected city text. Caught before any network call is made.
    #[error("Nom de ville invalide. Veuillez corriger la saisie.")]
    InvalidCity,
    /// Non-success HTTP status on a city query
    #[error("Ville introuvable, veuillez vérifier le nom.")]
    CityNotFound,
    /// Non-success HTTP status on a coordinate query
    #[error("Erreur lors de la récupération des données météo.")]
    Service,
    /// Transport failure before any HTTP status was received
    #[error("Erreur réseau, veuillez vérifier votre connexion.")]
    Network(#[source] reqwest::Error),
    /// The provider answered 200 with a body we can't make sense of. The
    /// detail is for the log only, never shown to the user.
    #[error("Réponse météo inattendue, veuillez réessayer.")]
    Parse(String),
}
