//! Integration tests for the HTTP prediction adapter against a stub service.
//!
//! The stub is a minimal single-connection HTTP/1.1 server on a loopback
//! port, enough to exercise every branch of the error taxonomy without a
//! real model server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use churnscope::adapters::HttpPredictionClient;
use churnscope::application::{PredictionService, SessionState};
use churnscope::domain::{CustomerRecord, RiskTier};
use churnscope::ports::{PredictionBackend, PredictionError};
use std::sync::Arc;

const SHORT: Duration = Duration::from_millis(500);

fn client_for(url: &str) -> HttpPredictionClient {
    HttpPredictionClient::new(url)
        .expect("Should build client")
        .with_timeouts(SHORT, SHORT, SHORT)
}

/// Read one HTTP request (head plus content-length body) off the stream.
fn read_request(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream.try_clone().expect("Should clone stream"));
    let mut head = String::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).expect("Should read line") == 0 {
            break;
        }
        head.push_str(&line);
        if line == "\r\n" {
            break;
        }
    }

    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).expect("Should read body");
    format!("{head}{}", String::from_utf8_lossy(&body))
}

/// Spawn a stub that serves one request with the given status line and body,
/// forwarding the raw request it saw.
fn spawn_stub(status_line: &'static str, body: &'static str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
    let addr = listener.local_addr().expect("Should have addr");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let request = read_request(&mut stream);
            let _ = tx.send(request);
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (format!("http://{addr}"), rx)
}

fn sample_record() -> CustomerRecord {
    CustomerRecord {
        tenure: 12,
        monthly_charges: 45.0,
        ..CustomerRecord::default()
    }
}

#[test]
fn predict_parses_successful_response() {
    let (url, requests) = spawn_stub("HTTP/1.1 200 OK", r#"{"prediction":"No","probability":0.23}"#);
    let client = client_for(&url);

    let mut record = sample_record();
    record.recompute_total();
    let result = client.predict(&record).expect("Should predict");

    assert_eq!(result.prediction, "No");
    assert!((result.probability - 0.23).abs() < f64::EPSILON);

    let request = requests.recv_timeout(Duration::from_secs(2)).expect("Stub saw a request");
    assert!(request.starts_with("POST /predict HTTP/1.1"));
    assert!(request.contains(r#""SeniorCitizen":0"#));
    assert!(request.contains(r#""TotalCharges":540.0"#));
}

#[test]
fn end_to_end_prediction_updates_session() {
    let (url, _requests) =
        spawn_stub("HTTP/1.1 200 OK", r#"{"prediction":"No","probability":0.23}"#);
    let service = PredictionService::new(Arc::new(client_for(&url)));
    let mut session = SessionState::new();
    let before = session.predictions_count();

    let assessment = service.run_prediction(sample_record()).expect("Should predict");
    session.record_prediction(assessment);

    assert!(session.prediction_made());
    assert_eq!(session.predictions_count(), before + 1);
    let last = session.last_assessment().expect("Should have a result");
    assert!((last.result.probability - 0.23).abs() < f64::EPSILON);
    assert_eq!(last.risk_tier, RiskTier::Low);
    assert!((last.customer.total_charges - 540.0).abs() < f64::EPSILON);
}

#[test]
fn non_200_response_surfaces_status_and_body() {
    let (url, _requests) = spawn_stub(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"detail":"model not loaded"}"#,
    );
    let client = client_for(&url);

    match client.predict(&sample_record()) {
        Err(PredictionError::Api { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("model not loaded"));
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[test]
fn malformed_success_body_is_a_parse_error() {
    let (url, _requests) = spawn_stub("HTTP/1.1 200 OK", r#"{"verdict":"maybe"}"#);
    let client = client_for(&url);

    assert!(matches!(
        client.predict(&sample_record()),
        Err(PredictionError::Parse(_))
    ));
}

#[test]
fn connection_refused_is_unreachable() {
    // Grab a free port, then close the listener so nothing is there.
    let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
    let addr = listener.local_addr().expect("Should have addr");
    drop(listener);

    let client = client_for(&format!("http://{addr}"));
    match client.predict(&sample_record()) {
        Err(PredictionError::Unreachable(_)) => {}
        other => panic!("Expected unreachable, got {other:?}"),
    }
}

#[test]
fn slow_service_is_a_timeout_distinct_from_unreachable() {
    // Accept the connection but never answer.
    let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
    let addr = listener.local_addr().expect("Should have addr");
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let _ = read_request(&mut stream);
            thread::sleep(Duration::from_secs(2));
        }
    });

    let client = client_for(&format!("http://{addr}"));
    let error = client.predict(&sample_record()).unwrap_err();
    assert!(matches!(error, PredictionError::Timeout));

    let unreachable = PredictionError::Unreachable("connection refused".to_string());
    assert_ne!(error.to_string(), unreachable.to_string());
}

#[test]
fn readiness_probe_hits_docs_endpoint() {
    let (url, requests) = spawn_stub("HTTP/1.1 200 OK", "{}");
    let client = client_for(&url);

    client.check_ready().expect("Service should be ready");

    let request = requests.recv_timeout(Duration::from_secs(2)).expect("Stub saw a request");
    assert!(request.starts_with("GET /docs HTTP/1.1"));
}

#[test]
fn failed_prediction_leaves_session_unchanged() {
    let (url, _requests) = spawn_stub("HTTP/1.1 503 Service Unavailable", "busy");
    let service = PredictionService::new(Arc::new(client_for(&url)));
    let session = SessionState::new();

    assert!(service.run_prediction(sample_record()).is_err());
    assert!(!session.prediction_made());
    assert_eq!(session.predictions_count(), 0);
    assert!(session.last_assessment().is_none());
}
