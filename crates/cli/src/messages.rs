//! Localized user-facing messages for the error taxonomy.
//!
//! Known statuses map to specific messages (401 invalid credentials,
//! 403 access denied); 400 responses surface the backend's validation
//! detail; everything else falls back to a generic localized message.
//! No error is allowed to crash a command - every failure becomes one
//! of these strings plus a non-zero exit.

use faranga_client::ApiError;
use faranga_core::Language;

#[derive(Debug, Clone, Copy)]
pub(crate) enum MessageKey {
    InvalidCredentials,
    AccessDenied,
    NetworkFailure,
    GenericFailure,
    NotLoggedIn,
}

pub(crate) fn message(key: MessageKey, language: Language) -> &'static str {
    use Language::{En, Fr, Rw};
    use MessageKey::*;
    match (key, language) {
        (InvalidCredentials, En) => "Invalid email or password.",
        (InvalidCredentials, Fr) => "E-mail ou mot de passe invalide.",
        (InvalidCredentials, Rw) => "Imeyili cyangwa ijambobanga si byo.",

        (AccessDenied, En) => "You do not have access to this resource.",
        (AccessDenied, Fr) => "Vous n'avez pas accès à cette ressource.",
        (AccessDenied, Rw) => "Ntabwo wemerewe kubona iyi serivisi.",

        (NetworkFailure, En) => "Could not reach the server. Check your connection and try again.",
        (NetworkFailure, Fr) => {
            "Impossible de joindre le serveur. Vérifiez votre connexion et réessayez."
        }
        (NetworkFailure, Rw) => {
            "Ntibishobotse kugera kuri seriveri. Suzuma umurongo wawe hanyuma wongere ugerageze."
        }

        (GenericFailure, En) => "Something went wrong. Please try again.",
        (GenericFailure, Fr) => "Une erreur est survenue. Veuillez réessayer.",
        (GenericFailure, Rw) => "Habaye ikibazo. Wongere ugerageze.",

        (NotLoggedIn, En) => "You are not signed in. Run `faranga login` first.",
        (NotLoggedIn, Fr) => "Vous n'êtes pas connecté. Lancez d'abord `faranga login`.",
        (NotLoggedIn, Rw) => "Ntabwo winjiye. Banza ukoreshe `faranga login`.",
    }
}

/// Map an API error to the message a user should see.
pub(crate) fn describe_api_error(err: &ApiError, language: Language) -> String {
    if err.is_unauthorized() {
        return message(MessageKey::InvalidCredentials, language).to_string();
    }
    if err.is_forbidden() {
        return message(MessageKey::AccessDenied, language).to_string();
    }
    match err {
        ApiError::Transport(_) => message(MessageKey::NetworkFailure, language).to_string(),
        _ => err
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| message(MessageKey::GenericFailure, language).to_string()),
    }
}
