use std::{
    io,
    sync::{Arc, Mutex},
};

use scanfilter::{compile, ColumnType, Domain, ValueRange, ValueSet};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("scanfilter=debug"))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.contents()
}

#[test]
fn compilation_emits_a_debug_event() {
    let logs = with_captured_logs(|| {
        compile(&Domain::single_value(4i64), &ColumnType::Integer).unwrap();
    });
    assert!(logs.contains("compile_filter"), "{logs}");
    assert!(logs.contains("bigint_range"), "{logs}");
    assert!(logs.contains("integer"), "{logs}");
}

#[test]
fn rejected_domains_are_logged_as_warnings() {
    let logs = with_captured_logs(|| {
        let domain = Domain::create(
            ValueSet::from_ranges_unchecked(vec![ValueRange::equal(9i64), ValueRange::equal(1i64)]),
            false,
        );
        assert!(compile(&domain, &ColumnType::BigInt).is_err());
    });
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("compile_filter_rejected"), "{logs}");
}
