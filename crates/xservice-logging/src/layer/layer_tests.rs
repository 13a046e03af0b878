#![allow(non_snake_case)]

use super::*;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn env_filter___missing_or_blank___no_override() {
    assert!(env_filter(None).unwrap().is_none());
    assert!(env_filter(Some("   ")).unwrap().is_none());
}

#[test]
fn env_filter___valid_directives___override() {
    let filter = env_filter(Some("xservice_generator=debug,warn")).unwrap();

    assert!(filter.is_some());
}

#[test]
fn env_filter___malformed_directive___rejected() {
    let result = env_filter(Some("xservice_generator=loud"));

    assert!(result.is_err());
}

#[test]
fn text_layer___event_above_filter___written_without_ansi() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(text_layer(captured.clone()));

    tracing::subscriber::with_default(subscriber, || {
        info!(file = "hello.proto.go", "generated file");
    });

    let output = captured.contents();
    assert!(output.contains("INFO"));
    assert!(output.contains("generated file"));
    assert!(output.contains("hello.proto.go"));
    assert!(!output.contains('\u{1b}'));
}

#[test]
fn text_layer___event_below_filter___dropped() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::WARN)
        .with(text_layer(captured.clone()));

    tracing::subscriber::with_default(subscriber, || {
        debug!("generating service");
    });

    assert!(captured.contents().is_empty());
}
