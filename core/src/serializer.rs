use crate::verdict::ExecResult;

/// Writes one verdict record in JSON-shaped form to `out`, byte-for-byte.
///
/// This intentionally does not go through a JSON library: `output` and
/// `compile_log` are raw bytes captured from an untrusted child process and
/// a third-party compiler, with no guarantee of valid UTF-8. Escaping is
/// done manually so arbitrary bytes survive the round trip unchanged except
/// for the handful JSON strings require.
pub fn write_record(out: &mut Vec<u8>, job_id: i64, result: &ExecResult) {
    out.push(b'{');

    write_key(out, "job_id");
    write_i64(out, job_id);
    out.push(b',');

    write_key(out, "status");
    write_escaped_str(out, result.status.as_str());
    out.push(b',');

    write_key(out, "output");
    write_escaped_bytes(out, &result.output);
    out.push(b',');

    write_key(out, "compile_log");
    write_escaped_bytes(out, &result.compile_log);
    out.push(b',');

    write_key(out, "time_ms");
    write_i64(out, result.time_ms as i64);
    out.push(b',');

    write_key(out, "max_rss_kb");
    write_i64(out, result.max_rss_kb as i64);
    out.push(b',');

    write_key(out, "exit_code");
    write_i64(out, result.exit_code as i64);
    out.push(b',');

    write_key(out, "signal");
    write_i64(out, result.term_signal as i64);
    out.push(b',');

    write_key(out, "timed_out");
    write_bool(out, result.timed_out);
    out.push(b',');

    write_key(out, "banned");
    write_bool(out, result.banned);

    out.push(b'}');
    out.push(b'\n');
}

fn write_key(out: &mut Vec<u8>, key: &str) {
    out.push(b'"');
    out.extend_from_slice(key.as_bytes());
    out.push(b'"');
    out.push(b':');
}

fn write_i64(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(value.to_string().as_bytes());
}

fn write_bool(out: &mut Vec<u8>, value: bool) {
    out.extend_from_slice(if value { b"true" } else { b"false" });
}

fn write_escaped_str(out: &mut Vec<u8>, value: &str) {
    write_escaped_bytes(out, value.as_bytes());
}

/// Escapes `"`, `\`, and the control characters JSON forbids unescaped
/// (`\n`, `\r`, `\t`); every other byte, including non-UTF-8 bytes from
/// captured process output, is copied through verbatim.
fn write_escaped_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(b'"');
    for &byte in bytes {
        match byte {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            _ => out.push(byte),
        }
    }
    out.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Status;

    fn base_result() -> ExecResult {
        ExecResult {
            status: Status::Success,
            output: Vec::new(),
            compile_log: Vec::new(),
            time_ms: 12,
            max_rss_kb: 1024,
            exit_code: 0,
            term_signal: 0,
            timed_out: false,
            banned: false,
        }
    }

    #[test]
    fn escapes_quotes_and_backslashes_in_output() {
        let mut result = base_result();
        result.output = b"say \"hi\"\\bye".to_vec();

        let mut out = Vec::new();
        write_record(&mut out, 1, &result);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r#""output":"say \"hi\"\\bye""#));
    }

    #[test]
    fn passes_non_utf8_bytes_through_verbatim() {
        let mut result = base_result();
        result.output = vec![b'a', 0xff, 0xfe, b'b'];

        let mut out = Vec::new();
        write_record(&mut out, 2, &result);
        assert!(out.windows(4).any(|w| w == [b'a', 0xff, 0xfe, b'b']));
    }

    #[test]
    fn escapes_newlines_and_tabs() {
        let mut result = base_result();
        result.output = b"line1\nline2\tend\r".to_vec();

        let mut out = Vec::new();
        write_record(&mut out, 3, &result);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r"line1\nline2\tend\r"));
    }

    #[test]
    fn emits_expected_field_order_and_scalars() {
        let result = base_result();
        let mut out = Vec::new();
        write_record(&mut out, 42, &result);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(r#"{"job_id":42,"status":"Success","output":"""#));
        assert!(text.trim_end().ends_with(r#""timed_out":false,"banned":false}"#));
    }
}
