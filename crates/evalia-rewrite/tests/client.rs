use evalia_rewrite::client::{AnthropicClient, RewriteConfig, parse_response};
use evalia_rewrite::prompt::build_prompt;
use evalia_rewrite::{RewriteError, TextImprover};

#[test]
fn prompt_embeds_text_after_instruction() {
    let prompt = build_prompt("paciente estable");
    assert!(prompt.starts_with("Por favor, corrige errores gramaticales"));
    assert!(prompt.ends_with("profesional y claro:\n\npaciente estable"));
}

#[test]
fn success_returns_first_text_block() {
    let body = r#"{
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [
            {"type": "text", "text": "Paciente estable."},
            {"type": "text", "text": "ignorado"}
        ]
    }"#;
    assert_eq!(parse_response(200, body).unwrap(), "Paciente estable.");
}

#[test]
fn error_status_carries_code_and_body() {
    let body = r#"{"type":"error","error":{"type":"overloaded_error"}}"#;
    match parse_response(529, body).unwrap_err() {
        RewriteError::Status { status, body: raw } => {
            assert_eq!(status, 529);
            assert_eq!(raw, body);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn status_error_message_names_status() {
    let err = parse_response(401, "unauthorized").unwrap_err();
    assert_eq!(err.to_string(), "Error al procesar el texto: 401 - unauthorized");
}

#[test]
fn empty_content_is_a_parse_error() {
    let err = parse_response(200, r#"{"content": []}"#).unwrap_err();
    assert!(matches!(err, RewriteError::ResponseParse(_)));

    let err = parse_response(200, "not json").unwrap_err();
    assert!(matches!(err, RewriteError::ResponseParse(_)));
}

#[test]
fn client_requires_api_key() {
    let err = AnthropicClient::new(RewriteConfig::new("  ")).err().unwrap();
    assert!(matches!(err, RewriteError::MissingApiKey));
}

#[test]
fn empty_text_is_rejected_without_a_request() {
    let client = AnthropicClient::new(RewriteConfig::new("sk-test")).unwrap();
    assert!(matches!(client.improve("   "), Err(RewriteError::EmptyText)));
}

#[test]
fn request_body_has_model_budget_and_prompt() {
    let client = AnthropicClient::new(RewriteConfig::new("sk-test")).unwrap();
    let body: serde_json::Value = serde_json::from_str(&client.request_body("hola").unwrap()).unwrap();

    assert_eq!(body["model"], "claude-3-haiku-20240307");
    assert_eq!(body["max_tokens"], 1024);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], build_prompt("hola"));
}

#[test]
fn error_messages_are_in_spanish() {
    let messages = [
        RewriteError::MissingApiKey.to_string(),
        RewriteError::EmptyText.to_string(),
        RewriteError::NotImprovable("nombre_completo").to_string(),
        RewriteError::ResponseParse("x".to_string()).to_string(),
        RewriteError::Transport("x".to_string()).to_string(),
    ];
    assert!(messages[0].starts_with("no hay clave de API"));
    assert_eq!(messages[2], "el campo nombre_completo no admite mejora de texto");
    for message in &messages {
        assert!(!message.contains("field"), "{message}");
        assert!(!message.contains("failed"), "{message}");
    }

    let err = parse_response(200, r#"{"content": []}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "respuesta de la API no válida: la respuesta no contiene texto"
    );
}
