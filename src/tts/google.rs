//! Google Translate text-to-speech backend.
//!
//! Speaks through the same `batchexecute` RPC the Translate web page uses.
//! Each request carries at most [`MAX_CHUNK_CHARS`] characters, so longer
//! text is split with [`split_text`] and the returned MP3 segments are
//! concatenated in order.  MPEG audio frames are self-delimiting, so the
//! concatenation is itself a playable MP3 stream.
//!
//! # Wire format
//!
//! ```text
//! POST <base_url>/_/TranslateWebserverUi/data/batchexecute
//! Content-Type: application/x-www-form-urlencoded
//!
//! f.req=[[["jQ1olc","[\"<text>\",\"<lang>\",<true|null>,\"null\"]",null,"generic"]]]
//! ```
//!
//! The response is a sequence of JSON-ish lines; the one mentioning `jQ1olc`
//! carries the base64-encoded MP3 as `jQ1olc","[\"<base64>\"]`.

use std::sync::OnceLock;
use std::time::Duration;

use base64::Engine as _;
use regex::Regex;

use crate::config::TtsConfig;

use super::backend::{SpeechBackend, TtsError};
use super::chunk::{split_text, MAX_CHUNK_CHARS};

const RPC_ID: &str = "jQ1olc";
const BATCH_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

// ---------------------------------------------------------------------------
// GoogleTranslateTts
// ---------------------------------------------------------------------------

/// Blocking [`SpeechBackend`] backed by the Google Translate web endpoint.
pub struct GoogleTranslateTts {
    client: reqwest::blocking::Client,
    endpoint: String,
    slow: bool,
}

impl GoogleTranslateTts {
    /// Build a backend from the `[tts]` config section.
    ///
    /// The client has no request timeout: a long document simply takes as
    /// long as the service needs.  A default client is used as a fallback if
    /// the builder fails (e.g. TLS backend unavailable).
    pub fn from_config(config: &TtsConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            client,
            endpoint: format!("{}{BATCH_PATH}", config.base_url.trim_end_matches('/')),
            slow: config.slow,
        }
    }

    fn speak_piece(&self, piece: &str, locale: &str) -> Result<Vec<u8>, TtsError> {
        let payload = request_payload(piece, locale, self.slow)?;

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("rpcids", RPC_ID)])
            .form(&[("f.req", payload)])
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        parse_audio(&body)
    }
}

impl SpeechBackend for GoogleTranslateTts {
    fn speak(&self, text: &str, locale: &str) -> Result<Vec<u8>, TtsError> {
        let pieces = split_text(text, MAX_CHUNK_CHARS);
        if pieces.is_empty() {
            return Err(TtsError::NoAudio);
        }

        log::debug!(
            "tts: speaking {} char(s) in {} request(s)",
            text.chars().count(),
            pieces.len()
        );

        let mut audio = Vec::new();
        for (i, piece) in pieces.iter().enumerate() {
            let segment = self.speak_piece(piece, locale)?;
            log::debug!("tts: piece {}/{} -> {} bytes", i + 1, pieces.len(), segment.len());
            audio.extend_from_slice(&segment);
        }

        Ok(audio)
    }
}

// ---------------------------------------------------------------------------
// Wire helpers
// ---------------------------------------------------------------------------

/// The `f.req` form value for one piece of text.
pub(crate) fn request_payload(text: &str, lang: &str, slow: bool) -> Result<String, TtsError> {
    let speed = if slow {
        serde_json::Value::Bool(true)
    } else {
        serde_json::Value::Null
    };
    let parameter = serde_json::to_string(&serde_json::json!([text, lang, speed, "null"]))
        .map_err(|e| TtsError::Request(format!("could not encode request: {e}")))?;

    serde_json::to_string(&serde_json::json!([[[RPC_ID, parameter, null, "generic"]]]))
        .map_err(|e| TtsError::Request(format!("could not encode request: {e}")))
}

fn audio_regex() -> &'static Regex {
    static AUDIO: OnceLock<Regex> = OnceLock::new();
    AUDIO.get_or_init(|| {
        Regex::new(r#"jQ1olc","\[\\"(.*)\\"]"#).expect("static regex is valid")
    })
}

/// Pull the MP3 bytes out of a `batchexecute` response body.
pub(crate) fn parse_audio(body: &str) -> Result<Vec<u8>, TtsError> {
    let encoded = body
        .lines()
        .filter(|line| line.contains(RPC_ID))
        .find_map(|line| audio_regex().captures(line))
        .and_then(|caps| caps.get(1))
        .ok_or(TtsError::NoAudio)?;

    // Padding may arrive JSON-escaped.
    let encoded = encoded.as_str().replace("\\u003d", "=");

    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| TtsError::Decode(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::{Arc, Mutex};

    fn config(base_url: &str) -> TtsConfig {
        TtsConfig {
            base_url: base_url.to_string(),
            slow: false,
        }
    }

    fn response_line(b64: &str) -> String {
        format!(r#"[["wrb.fr","jQ1olc","[\"{b64}\"]",null,null,null,"generic"]]"#)
    }

    fn batch_body(b64: &str) -> String {
        let mut body = String::from(")]}'\n\n");
        body.push_str(&format!("{}\n", response_line(b64).len()));
        body.push_str(&response_line(b64));
        body.push_str("\n57\n[[\"di\",42],[\"af.httprm\",41,\"-1\",7]]\n");
        body
    }

    // ---- payload -----------------------------------------------------------

    #[test]
    fn payload_matches_wire_format() {
        assert_eq!(
            request_payload("Hello", "en", false).unwrap(),
            r#"[[["jQ1olc","[\"Hello\",\"en\",null,\"null\"]",null,"generic"]]]"#
        );
    }

    #[test]
    fn slow_payload_sets_speed_flag() {
        assert_eq!(
            request_payload("Hi", "en", true).unwrap(),
            r#"[[["jQ1olc","[\"Hi\",\"en\",true,\"null\"]",null,"generic"]]]"#
        );
    }

    #[test]
    fn payload_escapes_quotes_in_text() {
        let payload = request_payload(r#"say "hi""#, "en", false).unwrap();
        let outer: serde_json::Value = serde_json::from_str(&payload).unwrap();
        let inner: serde_json::Value =
            serde_json::from_str(outer[0][0][1].as_str().unwrap()).unwrap();
        assert_eq!(inner[0], r#"say "hi""#);
    }

    // ---- response parsing --------------------------------------------------

    #[test]
    fn parses_audio_from_batch_response() {
        assert_eq!(parse_audio(&batch_body("SUQz")).unwrap(), b"ID3");
    }

    #[test]
    fn escaped_padding_is_decoded() {
        // "ID" base64-encodes to "SUQ=".
        assert_eq!(parse_audio(&batch_body("SUQ\\u003d")).unwrap(), b"ID");
    }

    #[test]
    fn response_without_payload_is_no_audio() {
        let body = ")]}'\n\n[[\"wrb.fr\",\"jQ1olc\",null,null,null,[3],\"generic\"]]\n";
        assert!(matches!(parse_audio(body), Err(TtsError::NoAudio)));
        assert!(matches!(parse_audio(""), Err(TtsError::NoAudio)));
    }

    #[test]
    fn bad_base64_is_decode_error() {
        assert!(matches!(
            parse_audio(&batch_body("!!not-base64!!")),
            Err(TtsError::Decode(_))
        ));
    }

    // ---- backend ------------------------------------------------------------

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let tts = GoogleTranslateTts::from_config(&config("http://localhost:1/"));
        assert_eq!(
            tts.endpoint,
            "http://localhost:1/_/TranslateWebserverUi/data/batchexecute"
        );
    }

    #[test]
    fn punctuation_only_text_is_no_audio() {
        let tts = GoogleTranslateTts::from_config(&config("http://127.0.0.1:9"));
        assert!(matches!(tts.speak("...", "en"), Err(TtsError::NoAudio)));
    }

    #[test]
    fn unreachable_service_is_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let tts = GoogleTranslateTts::from_config(&config(&format!("http://127.0.0.1:{port}")));
        let err = tts.speak("Hello world.", "en").unwrap_err();
        assert!(matches!(err, TtsError::Request(_)), "got {err:?}");
    }

    /// Read one HTTP/1.1 request (headers plus `Content-Length` body).
    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).into_owned();
            if let Some(end) = text.find("\r\n\r\n") {
                let len = text[..end]
                    .to_ascii_lowercase()
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:").map(|v| v.trim().to_string()))
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serve `status` with a batch body carrying "ID3" to every connection.
    fn spawn_server(status: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let request = read_request(&mut stream);
                seen.lock().unwrap().push(request);

                let body = batch_body("SUQz");
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (format!("http://{addr}"), requests)
    }

    #[test]
    fn speaks_through_local_service() {
        let (base_url, requests) = spawn_server("200 OK");
        let tts = GoogleTranslateTts::from_config(&config(&base_url));

        let audio = tts.speak("Hello world.", "en").unwrap();
        assert_eq!(audio, b"ID3");

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("POST /_/TranslateWebserverUi/data/batchexecute?rpcids=jQ1olc"));
        assert!(requests[0].contains("f.req="));
    }

    #[test]
    fn long_text_is_sent_in_pieces_and_concatenated() {
        let (base_url, requests) = spawn_server("200 OK");
        let tts = GoogleTranslateTts::from_config(&config(&base_url));

        let sentence = "This sentence is long enough that two of them exceed the limit.";
        let text = format!("{sentence} {sentence}");
        let audio = tts.speak(&text, "en").unwrap();

        let calls = requests.lock().unwrap().len();
        assert_eq!(calls, 2);
        assert_eq!(audio, b"ID3ID3");
    }

    #[test]
    fn error_status_is_reported() {
        let (base_url, _requests) = spawn_server("429 Too Many Requests");
        let tts = GoogleTranslateTts::from_config(&config(&base_url));

        let err = tts.speak("Hello world.", "en").unwrap_err();
        assert!(matches!(err, TtsError::Status(429)), "got {err:?}");
    }
}
