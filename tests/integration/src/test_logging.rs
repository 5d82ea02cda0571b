//! Verification log output must never carry MAC material.

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use serde_json::json;
    use xsignature_auth::{StaticSecretResolver, canonicalize, compute_mac, validate};

    use crate::{PARTNER_XYZ, PARTNER_XYZ_KEY};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_should_not_log_recomputed_mac_on_mismatch() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let resolver = StaticSecretResolver::new(vec![(
            PARTNER_XYZ.to_owned(),
            PARTNER_XYZ_KEY.to_owned(),
        )]);
        let payload = json!({"userId": "attacker", "action": "transfer_all"});
        let now = Utc::now().timestamp_millis().to_string();
        let forged = format!("{PARTNER_XYZ}.{now}.00");

        let accepted = validate(&forged, &payload, &resolver, 300_000).await.unwrap();
        assert!(!accepted);

        let valid_mac = compute_mac(PARTNER_XYZ_KEY.as_bytes(), &canonicalize(&payload), &now);
        let output = logs.contents();
        assert!(output.contains("Signature mismatch"), "mismatch not logged: {output}");
        assert!(!output.contains(&valid_mac), "recomputed MAC leaked: {output}");
        assert!(!output.contains("expected="));
    }
}
