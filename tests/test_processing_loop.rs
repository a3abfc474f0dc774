//! End-to-end runs of the processing loop against a local HTTP stub that
//! plays both the web page and the Ollama server.

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use quick_capture::config::Config;
use quick_capture::note::find_unprocessed;
use quick_capture::processor::{ProcessingLoop, RunReport};
use tempfile::TempDir;

const PAGE_HTML: &str = "<html><head><title>Stub</title><script>var x = 1;</script></head>
<body>
  <h1>Release notes</h1>
  <p>Version two ships today.</p>
</body></html>";

const MODEL_REPLY: &str =
    r#"{"model":"test-model","response":"<think>what matters here</think>\n\nSummary. #tag","done":true}"#;

const HEADING_REPLY: &str =
    r#"{"model":"heading-model","response":"Gist.\n###### Key points\nMore. #tag","done":true}"#;

/// Requests seen by the stub, as `(request line, body)`.
type Seen = Arc<Mutex<Vec<(String, String)>>>;

struct Stub {
    base: String,
    seen: Seen,
}

impl Stub {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let seen: Seen = Arc::default();
        let log = Arc::clone(&seen);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = serve(stream, &log);
            }
        });
        Self { base, seen }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn generate_bodies(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(line, _)| line.starts_with("POST /api/generate"))
            .map(|(_, body)| body.clone())
            .collect()
    }
}

fn serve(stream: TcpStream, seen: &Seen) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" || header == "\n" {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    let body = String::from_utf8_lossy(&body).into_owned();

    let request_line = request_line.trim_end().to_string();
    let (status, content_type, payload) = if request_line.starts_with("GET /page") {
        ("200 OK", "text/html", PAGE_HTML.to_string())
    } else if request_line.starts_with("POST /api/generate") {
        if body.contains("\"broken-model\"") {
            ("500 Internal Server Error", "text/plain", "model exploded".to_string())
        } else if body.contains("\"heading-model\"") {
            ("200 OK", "application/json", HEADING_REPLY.to_string())
        } else {
            ("200 OK", "application/json", MODEL_REPLY.to_string())
        }
    } else {
        ("404 Not Found", "text/plain", "nope".to_string())
    };
    seen.lock().unwrap().push((request_line, body));

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    )?;
    stream.flush()
}

fn config_for(dir: &Path, stub: &Stub) -> Config {
    let mut config = Config::test_default(dir);
    config.api.ollama_endpoint = stub.base.clone();
    config
}

fn run_with(config: &Config, note: &str) -> (RunReport, String) {
    fs::write(&config.paths.note_path, note).unwrap();
    let mut processing = ProcessingLoop::from_config(config).unwrap();
    let report = processing.run();
    assert!(!processing.summarizer().session().is_open(), "session must be released");
    let after = fs::read_to_string(&config.paths.note_path).unwrap();
    (report, after)
}

#[test]
fn web_entry_gets_sanitized_summary() {
    let stub = Stub::start();
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), &stub);
    let url = stub.url("/page");

    let (report, after) = run_with(&config, &format!("###### 2024-01-01\n[My Link]({url})\n"));

    assert_eq!(report, RunReport { processed: 1, failed: 0, halted: None });
    assert_eq!(
        after,
        format!("###### 2024-01-01\n[My Link]({url})\n\nSummary. #tag\n\n---\n")
    );

    let bodies = stub.generate_bodies();
    assert_eq!(bodies.len(), 1);
    let request: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(request["model"], "test-model");
    assert_eq!(request["stream"], false);
    let prompt = request["prompt"].as_str().unwrap();
    assert!(prompt.contains("following webpage content"));
    assert!(prompt.contains("Release notes Version two ships today."));
    assert!(!prompt.contains("var x"));
}

#[cfg(unix)]
#[test]
fn video_entry_without_transcript_records_the_error() {
    let stub = Stub::start();
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), &stub);
    let note = "###### 2024-01-01\n[Clip](https://www.youtube.com/watch?v=x)\n";

    let (report, after) = run_with(&config, note);

    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 1);
    assert!(after.starts_with(
        "###### 2024-01-01\n[Clip](https://www.youtube.com/watch?v=x)\n\n\
         Error processing transcript content: Transcription output not found"
    ));
    assert!(after.ends_with("\n\n---\n"));
    assert!(stub.generate_bodies().is_empty(), "model must not be called");
}

#[test]
fn nothing_to_process_leaves_note_alone() {
    let stub = Stub::start();
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), &stub);

    for note in [
        "",
        "# Inbox\nno headings here [x](https://example.com)\n",
        "###### a\n[A](https://a.example)\n\nDone. #tag\n\n---\n",
    ] {
        let (report, after) = run_with(&config, note);
        assert_eq!(report, RunReport::default());
        assert_eq!(after, note);
    }
    assert!(stub.seen.lock().unwrap().is_empty());
}

#[test]
fn entries_are_processed_in_order_and_others_kept() {
    let stub = Stub::start();
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), &stub);
    let page = stub.url("/page");
    let gone = stub.url("/gone");
    let note = format!(
        "# Inbox\n\n\
         ###### one\n[First]({page})\n\
         ###### thought\njust an idea, no link\n\
         ###### two\n[Second]({gone})\n"
    );

    let (report, after) = run_with(&config, &note);

    assert_eq!(report, RunReport { processed: 2, failed: 1, halted: None });
    assert_eq!(
        after,
        format!(
            "# Inbox\n\n\
             ###### one\n[First]({page})\n\nSummary. #tag\n\n---\n\
             ###### thought\njust an idea, no link\n\
             ###### two\n[Second]({gone})\n\n\
             Error summarizing webpage: fetch failed: HTTP 404 Not Found for {gone}\n\n---\n"
        )
    );
    assert_eq!(find_unprocessed(&after), None);
}

#[test]
fn model_error_status_is_written_and_not_retried() {
    let stub = Stub::start();
    let dir = TempDir::new().unwrap();
    let mut config = config_for(dir.path(), &stub);
    config.api.model = "broken-model".into();
    let note = format!("###### a\n[Page]({})\n", stub.url("/page"));

    let (report, after) = run_with(&config, &note);
    assert_eq!(report.failed, 1);
    assert!(after.contains("Error summarizing webpage: error getting summary from Ollama: HTTP 500"));

    // a second run finds nothing left to do
    let mut again = ProcessingLoop::from_config(&config).unwrap();
    assert_eq!(again.run(), RunReport::default());
    assert_eq!(stub.generate_bodies().len(), 1);
}

#[test]
fn missing_note_halts_the_run() {
    let stub = Stub::start();
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path(), &stub);

    let mut processing = ProcessingLoop::from_config(&config).unwrap();
    let report = processing.run();
    assert_eq!(report.processed, 0);
    assert!(report.halted.unwrap().contains("cannot read note"));
    assert!(!config.paths.note_path.exists());
}

#[test]
fn heading_in_model_reply_is_processed_once() {
    let stub = Stub::start();
    let dir = TempDir::new().unwrap();
    let mut config = config_for(dir.path(), &stub);
    config.api.model = "heading-model".into();
    let url = stub.url("/page");

    let (report, after) = run_with(&config, &format!("###### a\n[T]({url})\n"));

    assert_eq!(report, RunReport { processed: 1, failed: 0, halted: None });
    assert_eq!(
        after,
        format!("###### a\n[T]({url})\n\nGist.\n ###### Key points\nMore. #tag\n\n---\n")
    );
    assert_eq!(stub.generate_bodies().len(), 1);
}
