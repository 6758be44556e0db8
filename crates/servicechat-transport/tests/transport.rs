//! Transport tests against a one-shot HTTP server on 127.0.0.1.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use servicechat_transport::chat::{
    ChatReply, ChatTransport, HttpChatTransport, HttpTransportConfig, format_outbound,
};
use servicechat_transport::error::TransportError;
use servicechat_transport::prompts::{
    NOT_ANSWERED, birth_form_question, custom_greeting, reset_notice, scenario_greeting,
};

/// What the server saw.
struct Captured {
    headers: Vec<String>,
    body: String,
}

/// Serve exactly one request with `status` and `body`, returning the endpoint
/// URL and a receiver for the captured request.
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut headers = Vec::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().unwrap();
            }
            headers.push(line.to_ascii_lowercase());
        }
        let mut buf = vec![0u8; content_length];
        reader.read_exact(&mut buf).unwrap();

        let reason = if status < 400 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        let _ = tx.send(Captured {
            headers,
            body: String::from_utf8(buf).unwrap(),
        });
    });

    (format!("http://{addr}/chat"), rx)
}

fn transport(endpoint: String, bypass: bool) -> HttpChatTransport {
    let mut config = HttpTransportConfig::new(endpoint);
    config.timeout = Duration::from_secs(5);
    config.bypass_interstitial = bypass;
    HttpChatTransport::new(config).unwrap()
}

#[test]
fn successful_reply_returns_message_field() {
    let (url, rx) = serve_once(200, r#"{"message":"Welcome! How can I help?","extra":1}"#);
    let reply = transport(url, true)
        .send("When is the deadline?", Some("new-baby"), "session-1")
        .unwrap();
    assert_eq!(reply, "Welcome! How can I help?");

    let captured = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["message"], "Scenario: new-baby\nUser: When is the deadline?");
    assert_eq!(body["user_id"], "session-1");
    assert_eq!(body["role"], "user");
    assert!(captured.headers.iter().any(|h| h == "skip_zrok_interstitial: true"));
    assert!(captured.headers.iter().any(|h| h.starts_with("content-type: application/json")));
}

#[test]
fn custom_messages_are_sent_untagged() {
    let (url, rx) = serve_once(200, r#"{"message":"Hi"}"#);
    transport(url, false).send("hello", None, "s").unwrap();
    let captured = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["message"], "hello");
    assert!(!captured.headers.iter().any(|h| h.starts_with("skip_zrok_interstitial")));
}

#[test]
fn non_success_status_is_an_error() {
    let (url, _rx) = serve_once(500, r#"{"message":"boom"}"#);
    let err = transport(url, false).send("hi", None, "s").unwrap_err();
    assert!(matches!(err, TransportError::Status { status: 500 }), "{err:?}");
}

#[test]
fn missing_message_field_is_an_error() {
    let (url, _rx) = serve_once(200, r#"{"reply":"hi"}"#);
    let err = transport(url, false).send("hi", None, "s").unwrap_err();
    assert!(matches!(err, TransportError::MissingMessage), "{err:?}");
}

#[test]
fn unreachable_endpoint_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = transport(format!("http://{addr}/chat"), false)
        .send("hi", None, "s")
        .unwrap_err();
    assert!(
        matches!(err, TransportError::Network(_) | TransportError::Timeout),
        "{err:?}"
    );
}

#[test]
fn rejects_bad_config() {
    assert!(matches!(
        HttpChatTransport::new(HttpTransportConfig::new("ftp://example.com")),
        Err(TransportError::Config(_))
    ));
    let mut config = HttpTransportConfig::new("http://localhost/chat");
    config.timeout = Duration::ZERO;
    assert!(matches!(HttpChatTransport::new(config), Err(TransportError::Config(_))));
}

#[test]
fn reply_envelope_handling() {
    let reply: ChatReply = serde_json::from_str(r#"{"message":""}"#).unwrap();
    assert!(matches!(reply.into_text(), Err(TransportError::MissingMessage)));

    let reply: ChatReply = serde_json::from_str(r#"{"message":{"nextQuestion":"x"}}"#).unwrap();
    assert_eq!(reply.into_text().unwrap(), r#"{"nextQuestion":"x"}"#);
}

#[test]
fn falsy_message_counts_as_missing() {
    for body in [r#"{"message":false}"#, r#"{"message":0}"#, r#"{"message":0.0}"#, r#"{"message":null}"#] {
        let reply: ChatReply = serde_json::from_str(body).unwrap();
        assert!(matches!(reply.into_text(), Err(TransportError::MissingMessage)), "{body}");
    }

    let reply: ChatReply = serde_json::from_str(r#"{"message":true}"#).unwrap();
    assert_eq!(reply.into_text().unwrap(), "true");
    let reply: ChatReply = serde_json::from_str(r#"{"message":42}"#).unwrap();
    assert_eq!(reply.into_text().unwrap(), "42");
}

#[test]
fn silent_endpoint_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (_stream, _) = listener.accept().unwrap();
        thread::sleep(Duration::from_secs(5));
    });

    let mut config = HttpTransportConfig::new(format!("http://{addr}/chat"));
    config.timeout = Duration::from_millis(500);
    let started = std::time::Instant::now();
    let err = HttpChatTransport::new(config)
        .unwrap()
        .send("hi", None, "s")
        .unwrap_err();
    assert!(matches!(err, TransportError::Timeout), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[test]
fn outbound_format() {
    assert_eq!(format_outbound("hi", Some("storm-damage")), "Scenario: storm-damage\nUser: hi");
    assert_eq!(format_outbound("hi", None), "hi");
}

#[test]
fn prompt_wording() {
    assert_eq!(
        scenario_greeting("I just had a baby"),
        "I've selected the scenario: \"I just had a baby\". Please greet me and ask how you can assist with this."
    );
    assert!(custom_greeting().contains("NSW government services"));
    assert_eq!(
        reset_notice(None),
        "User requested to clean the chat history for this scenario: custom scenario"
    );
    assert!(reset_notice(Some("A storm damaged my property")).ends_with("A storm damaged my property"));
}

#[test]
fn birth_form_prompt_picks_last_real_answer() {
    let answers = vec![
        ("bornInNSW".to_string(), "yes".to_string()),
        ("childFullName".to_string(), "Ada".to_string()),
        ("childDOB".to_string(), NOT_ANSWERED.to_string()),
        ("declaration".to_string(), "false".to_string()),
    ];
    let prompt = birth_form_question("What ID do I need?", &answers, &["Extra info"]);
    assert_eq!(
        prompt,
        "User question about birth registration form: What ID do I need?\n\
         Current QA: childFullName: Ada\n\n\
         Current form answers:\n\
         bornInNSW: yes\nchildFullName: Ada\nchildDOB: Not answer\ndeclaration: false\n\n\
         Extra info"
    );
}
