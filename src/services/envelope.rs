// ============================================================================
// ENVELOPE - interpretación de respuestas `{success, message, data, errors}`
// ============================================================================

use serde::de::DeserializeOwned;
use crate::error::{ClientError, SESSION_EXPIRED_MESSAGE};
use crate::models::ApiEnvelope;

const DEFAULT_API_ERROR: &str = "Error en la solicitud";

/// Clasifica una respuesta HTTP ya leída como texto
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<ApiEnvelope<T>, ClientError> {
    let ok = (200..300).contains(&status);

    if !ok {
        let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.error_message());

        if status == 401 {
            return Err(ClientError::Auth(
                message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
            ));
        }

        return Err(match message {
            Some(message) => ClientError::Api { status, message },
            None => ClientError::Network(format!("HTTP {} sin cuerpo legible", status)),
        });
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|e| ClientError::Network(format!("Parse error: {}", e)))?;

    if !envelope.success {
        return Err(ClientError::Api {
            status,
            message: envelope
                .error_message()
                .unwrap_or_else(|| DEFAULT_API_ERROR.to_string()),
        });
    }

    Ok(envelope)
}

/// `data` de una respuesta exitosa
pub fn into_data<T>(envelope: ApiEnvelope<T>) -> Result<T, ClientError> {
    envelope
        .data
        .ok_or_else(|| ClientError::Network("Respuesta sin datos".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthPayload, TripsPayload};

    #[test]
    fn successful_login_envelope() {
        let body = r#"{"success":true,"data":{"token":"tok","user":{
            "nombre":"Ana","apellido":"Gómez","correo":"ana@unisabana.edu.co","rol":"pasajero"}}}"#;
        let payload = into_data(decode_envelope::<AuthPayload>(200, body).unwrap()).unwrap();
        assert_eq!(payload.token, "tok");
        assert_eq!(payload.user.full_name(), "Ana Gómez");
    }

    #[test]
    fn field_errors_are_joined() {
        let body = r#"{"success":false,"errors":[{"msg":"Correo inválido"},{"msg":"Teléfono requerido"}]}"#;
        let err = decode_envelope::<AuthPayload>(400, body).unwrap_err();
        assert_eq!(
            err,
            ClientError::Api { status: 400, message: "Correo inválido, Teléfono requerido".to_string() }
        );
    }

    #[test]
    fn message_is_used_when_there_are_no_field_errors() {
        let body = r#"{"success":false,"message":"Credenciales inválidas"}"#;
        let err = decode_envelope::<AuthPayload>(400, body).unwrap_err();
        assert_eq!(err.user_message(), "Credenciales inválidas");
    }

    #[test]
    fn unreadable_error_body_is_a_network_error() {
        let err = decode_envelope::<TripsPayload>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }

    #[test]
    fn unauthorized_requires_login() {
        let err = decode_envelope::<TripsPayload>(401, r#"{"success":false,"message":"Token inválido"}"#)
            .unwrap_err();
        assert!(err.requires_login());
        assert_eq!(err.user_message(), "Token inválido");

        let err = decode_envelope::<TripsPayload>(401, "").unwrap_err();
        assert_eq!(err, ClientError::missing_session());
    }

    #[test]
    fn ok_status_with_success_false_is_an_api_error() {
        let err = decode_envelope::<TripsPayload>(200, r#"{"success":false}"#).unwrap_err();
        assert_eq!(err, ClientError::Api { status: 200, message: DEFAULT_API_ERROR.to_string() });
    }

    #[test]
    fn missing_data_is_reported() {
        let envelope = decode_envelope::<TripsPayload>(200, r#"{"success":true}"#).unwrap();
        assert!(into_data(envelope).is_err());
    }
}
